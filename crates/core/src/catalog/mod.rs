//! The fixed entry collection backing a browsing session.

mod loader;

pub use loader::{builtin, from_path, load};

use thiserror::Error;

use crate::models::GameEntry;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog document is not valid JSON or has malformed fields.
    #[error("failed to parse catalog {path}")]
    Parse {
        /// Path that was being parsed.
        path: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
    /// Two entries share the same identifier.
    #[error("duplicate entry id `{0}` in catalog")]
    DuplicateId(String),
}

/// An ordered, id-unique sequence of game entries.
///
/// The collection is fixed for the lifetime of a session: it is built once
/// at startup and never grows or shrinks afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<GameEntry>,
}

impl Catalog {
    /// Build a catalog from the given entries, rejecting duplicate ids.
    pub fn new(entries: Vec<GameEntry>) -> Result<Self, CatalogError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|other| other.id == entry.id) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// All entries in their original catalog order.
    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by identifier.
    pub fn find(&self, id: &str) -> Option<&GameEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: &str, date: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: "desc".to_string(),
            platform: "PC".to_string(),
            release_date: date.parse::<NaiveDate>().expect("valid date"),
            released: false,
            image_url: String::new(),
            detail_url: String::new(),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![entry("g1", "2025-01-01"), entry("g1", "2025-02-01")]);
        match result {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "g1"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn find_resolves_known_ids_only() -> Result<(), CatalogError> {
        let catalog = Catalog::new(vec![entry("g1", "2025-01-01"), entry("g2", "2025-02-01")])?;
        assert_eq!(catalog.find("g2").map(|e| e.title.as_str()), Some("Title g2"));
        assert!(catalog.find("missing").is_none());
        Ok(())
    }

    #[test]
    fn preserves_insertion_order() -> Result<(), CatalogError> {
        let catalog = Catalog::new(vec![entry("b", "2025-02-01"), entry("a", "2025-01-01")])?;
        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        Ok(())
    }
}
