//! Main application entry point.

use anyhow::Context;
use clap::Parser;
use floorplan_app::{Cli, init_logging, run};
use floorplan_core::{EditorConfig, FileStorage};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)?,
        None => EditorConfig::discover()?,
    };
    init_logging(&config);

    let storage_dir = cli
        .storage_dir
        .clone()
        .or_else(|| config.storage_dir())
        .context("Could not determine a storage directory")?;
    log::debug!("Using storage directory {}", storage_dir.display());
    let storage = FileStorage::new(storage_dir)?;

    run(cli.command, &config, &storage, &mut std::io::stdout().lock())
}
