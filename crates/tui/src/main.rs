mod app;
mod theme;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use tracing_subscriber::{prelude::*, EnvFilter};

use gamecal_core::{
    catalog,
    config::{self, AppConfig},
    snapshot::SnapshotWriter,
};

use crate::theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    // Catalog problems (missing file, malformed dates, duplicate ids)
    // surface here, before the terminal enters raw mode.
    let catalog = catalog::load(config.catalog_path.as_deref())?;

    let theme = Theme::from_config(&config.theme);
    let snapshots = config
        .snapshot_dir
        .clone()
        .map(SnapshotWriter::new)
        .unwrap_or_else(|| SnapshotWriter::new(SnapshotWriter::default_root()));

    let mut app = app::GamecalApp::new(catalog, theme, snapshots);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamecal.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
