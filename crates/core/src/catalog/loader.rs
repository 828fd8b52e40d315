use std::{fs, path::Path};

use once_cell::sync::Lazy;
use tracing::info;

use super::{Catalog, CatalogError};
use crate::models::GameEntry;

/// Seed catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

static BUILTIN: Lazy<Vec<GameEntry>> =
    Lazy::new(|| serde_json::from_str(BUILTIN_CATALOG).expect("embedded catalog is valid JSON"));

/// Catalog built from the embedded seed data.
pub fn builtin() -> Catalog {
    Catalog::new(BUILTIN.clone()).expect("embedded catalog ids are unique")
}

/// Load a catalog from a JSON file on disk.
pub fn from_path(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: display.clone(),
        source,
    })?;
    let entries: Vec<GameEntry> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: display,
            source,
        })?;
    Catalog::new(entries)
}

/// Load the catalog for a session: the configured file when one is set,
/// otherwise the embedded seed data.
pub fn load(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = from_path(path)?;
            info!(path = %path.display(), entries = catalog.len(), "Catalog loaded");
            Ok(catalog)
        }
        None => {
            let catalog = builtin();
            info!(entries = catalog.len(), "Using builtin catalog");
            Ok(catalog)
        }
    }
}
