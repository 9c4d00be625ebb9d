mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::SalesDashboardApp;
use config::DashboardConfig;
use dashboard::Dashboard;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(config::CONFIG_FILE))?;

    // Loading happens once; a bad file stops the program before any window opens.
    let raw = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let dataset = data::normalize::normalize(&raw, &config.date_format)
        .with_context(|| format!("normalizing {}", config.data_path.display()))?;

    let dashboard = Dashboard::new(dataset, config.display_units(), config.histogram_bins);
    let state = AppState::new(dashboard);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tableau de bord des ventes",
        options,
        Box::new(|_cc| Ok(Box::new(SalesDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
