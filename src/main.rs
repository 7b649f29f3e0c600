mod analysis;
mod app;
mod color;
mod config;
mod data;
mod error;
mod interaction;
mod loading;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::CorrScopeApp;
use clap::Parser;
use config::EngineConfig;
use eframe::egui;

/// Interactive correlation explorer for tabular research datasets.
#[derive(Parser, Debug)]
#[command(name = "corrscope", version, about)]
struct Cli {
    /// Dataset to open on start (.csv, .tsv or .json)
    data: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of top-ranked features to keep
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Share of rows that must parse as numbers, in (0, 1]
    #[arg(short, long)]
    threshold: Option<f64>,
}

fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(k) = cli.top_k {
        config.top_k = k;
    }
    if let Some(t) = cli.threshold {
        config.coverage_threshold = t;
    }
    if let Err(e) = config.validate() {
        log::warn!("Rejected configuration: {e:#}");
        return Err(e.context("invalid command line options"));
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    log::debug!("Using {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let data = cli.data.clone();
    eframe::run_native(
        "corrscope – Correlation Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(CorrScopeApp::new(cc, config, data)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
