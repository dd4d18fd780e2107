mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::DashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::parse();
    log::debug!("Starting with {config:?}");
    let state = AppState::from_config(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Global Happiness vs Economy Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
