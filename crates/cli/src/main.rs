mod report;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use vgcat_core::{
    config::{self, AppConfig},
    DatasetLoader, GameRepository,
};

use crate::report::Report;

fn main() -> Result<()> {
    let created = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;
    if created {
        info!(path = %config::config_path().display(), "Wrote default configuration");
    }

    let loader = DatasetLoader::new(&config.dataset_path);
    let games = loader
        .load()
        .context("failed to load the video game catalog")?;
    let mut repository = GameRepository::new();
    let total = repository.add(games);
    info!(total, path = %loader.path().display(), "Catalog ready");

    for section in Report::new(&repository, &config.report).sections() {
        info!("{section}\n");
    }

    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("vgcat.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
