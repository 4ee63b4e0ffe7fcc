mod app;
mod color;
mod config;
mod data;
mod engine;
mod reactive;
mod state;
mod ui;

use app::DashApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = DashApp::default();
            match config.startup_dataset() {
                Some(path) => ui::panels::load_into(&mut app.state, &path),
                None => log::info!("No dataset given; use File → Open"),
            }
            Ok(Box::new(app))
        }),
    )
}
