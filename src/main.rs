//! NongoFit - treadmill workout tracker.
//!
//! Main entry point for the desktop workout screen.

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NongoFit v{}", env!("CARGO_PKG_VERSION"));

    let config = match nongofit::storage::config::init_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default configuration: {}", e);
            nongofit::storage::config::AppConfig::default()
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("NongoFit"),
        ..Default::default()
    };

    eframe::run_native(
        "NongoFit",
        options,
        Box::new(move |cc| Ok(Box::new(app::NongoFitApp::new(cc, config, runtime)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run workout window: {}", e))
}
