mod app;
mod color;
mod config;
mod data;
mod series;
mod startup;
mod state;
mod ui;

use app::EvDashboardApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let config = match DashboardConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring configuration: {e:#}");
            DashboardConfig {
                data_path: cli.data_path.clone(),
                ..DashboardConfig::default()
            }
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EV Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EvDashboardApp::new(&config)))),
    )
}
