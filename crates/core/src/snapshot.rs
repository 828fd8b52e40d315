//! Writing rendered HTML snapshots to disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Local;

use crate::markup;
use crate::view::{CalendarView, ListView};

/// Directory under the user's config dir used for snapshot files.
pub const DEFAULT_SNAPSHOT_DIR: &str = "gamecal/snapshots";

/// Writer producing standalone HTML pages of the current list and calendar.
pub struct SnapshotWriter {
    root: PathBuf,
}

impl SnapshotWriter {
    /// Create a writer rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location under the user's config directory.
    pub fn default_root() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_SNAPSHOT_DIR)
    }

    /// Render the views to a page and write it under the root with a
    /// timestamped file name. Returns the path of the written file.
    pub fn write(&self, list: &ListView, calendar: &CalendarView) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;

        let file_name = format!(
            "{}_{}.html",
            sanitize_component("catalog"),
            Local::now().format("%Y%m%d%H%M%S")
        );
        let path = self.root.join(file_name);
        let page = markup::render_page(list, calendar);
        write_page(&path, &page)?;
        Ok(path)
    }
}

fn write_page(path: &Path, page: &str) -> Result<()> {
    fs::write(path, page).with_context(|| format!("failed to write {}", path.display()))
}

fn sanitize_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            result.push(ch);
        }
    }
    if result.is_empty() {
        "snapshot".to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameEntry;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_entries() -> Vec<GameEntry> {
        vec![GameEntry {
            id: "g1".to_string(),
            title: "Shadow & Light".to_string(),
            description: "desc".to_string(),
            platform: "PC".to_string(),
            release_date: "2025-12-05".parse().expect("valid date"),
            released: false,
            image_url: String::new(),
            detail_url: "#".to_string(),
        }]
    }

    #[test]
    fn writes_an_escaped_page() -> Result<()> {
        let dir = tempdir()?;
        let writer = SnapshotWriter::new(dir.path());
        let entries = sample_entries();
        let today: NaiveDate = "2025-06-01".parse().expect("valid date");

        let path = writer.write(
            &ListView::build(&entries, today),
            &CalendarView::build(&entries),
        )?;

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
        let page = fs::read_to_string(&path)?;
        assert!(page.contains("Shadow &amp; Light"));
        Ok(())
    }

    #[test]
    fn sanitize_creates_safe_filenames() {
        assert_eq!(sanitize_component("Hello World!* 18??"), "HelloWorld18");
        assert_eq!(sanitize_component("***"), "snapshot");
    }
}
