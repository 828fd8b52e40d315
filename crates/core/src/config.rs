//! User configuration handling.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory under the user's config dir holding all app files.
pub const CONFIG_DIR: &str = "gamecal";

const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r##"# gamecal configuration.

# Path to a JSON catalog file. Leave unset to use the builtin catalog.
# catalog_path = "/path/to/catalog.json"

# Directory for exported HTML snapshots. Defaults to the snapshots
# directory next to this file.
# snapshot_dir = "/path/to/snapshots"

# Optional palette overrides, hex colors ("#rrggbb" or "#rgb").
[theme]
# accent = "#22d3ee"
# accent_alt = "#60a5fa"
# muted = "#6b7280"
# selection_bg = "#374151"
# selection_fg = "#f9fafb"
# success = "#4ade80"
# warning = "#facc15"
# danger = "#f87171"
"##;

/// Palette overrides read from the `[theme]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    /// Accent color for highlights and badges.
    pub accent: Option<String>,
    /// Secondary accent.
    pub accent_alt: Option<String>,
    /// De-emphasized text.
    pub muted: Option<String>,
    /// Selection background.
    pub selection_bg: Option<String>,
    /// Selection foreground.
    pub selection_fg: Option<String>,
    /// Positive status color.
    pub success: Option<String>,
    /// Cautionary status color.
    pub warning: Option<String>,
    /// Error status color.
    pub danger: Option<String>,
}

/// Application configuration loaded from the user's config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Alternate catalog file. `None` selects the builtin catalog.
    pub catalog_path: Option<PathBuf>,
    /// Alternate snapshot directory.
    pub snapshot_dir: Option<PathBuf>,
    /// Palette overrides.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Load configuration from the default path. A missing file yields the
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = config::Config::builder()
            .add_source(config::File::from(path.clone()).required(false))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Path of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = config_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))
}
