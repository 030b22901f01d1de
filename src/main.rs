// src/main.rs
use anyhow::Result;
use eframe::egui;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod api;
mod app;
mod config;
mod model;
mod state;
mod ui;

use api::{ForecastApi, HttpForecastApi};
use app::ForecastApp;
use config::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    info!("Using forecast service at {}", settings.base_url);
    let api: Arc<dyn ForecastApi> = Arc::new(HttpForecastApi::new(&settings.base_url)?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_title("Liquor Sales Forecast"),
        ..Default::default()
    };

    eframe::run_native(
        "Liquor Sales Forecast",
        options,
        Box::new(move |cc| Box::new(ForecastApp::new(cc, settings, api))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
