// main.rs - Conway's Game of Life viewer

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use golife::Conway;
use tracing_subscriber::EnvFilter;

use life_sim::{LifeApp, SimConfig, SimulationClock};

#[derive(Parser, Debug)]
#[command(name = "life_sim", version, about = "Conway's Game of Life viewer")]
struct Args {
    /// Pattern file (.rle, .cells) or built-in pattern name; the Gosper glider gun when omitted.
    pattern: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = SimConfig::default();

    let (population, pattern_name) =
        golife::load_or_default(args.pattern.as_deref()).context("no initial pattern could be loaded")?;

    // Runs the step driver and status poller; must outlive the window.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let handle = runtime.handle().clone();
    let clock = Arc::new(SimulationClock::new(Box::new(Conway), population));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_surface),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc.egui_ctx.clone(), handle, clock, config, pattern_name))),
    )
    .map_err(|err| anyhow::anyhow!("window error: {err}"))?;

    tracing::info!("window closed");
    Ok(())
}
