mod app;
mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;

use shimmer_engine::device::GpuInit;
use shimmer_engine::logging::{init_logging, LoggingConfig};
use shimmer_engine::window::Runtime;

use crate::app::StudioApp;
use crate::cli::Cli;
use crate::config::{Assets, FileConfig, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file).context("invalid settings")?;

    init_logging(LoggingConfig {
        env_filter: settings.log.clone(),
        ..Default::default()
    });

    let assets = Assets::load(&settings).context("failed to load assets")?;
    log::info!("widgets: {:?}, speed {}", settings.widget, settings.speed);

    let app = StudioApp::new(settings, assets);
    let windows = app.windows();
    Runtime::run(windows, GpuInit::default(), app)
}
