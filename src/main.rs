mod app;
mod config;
mod error;
mod modules;
mod style;

use app::AdminPanelApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();
    let window = &config.window;
    log::info!("Starting admin panel with asset root {}", config.assets.root.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.initial_width, window.initial_height])
            .with_min_inner_size([window.min_width, window.min_height])
            .with_title("Gabáy - Admin Panel"),
        ..Default::default()
    };

    eframe::run_native(
        "Gabáy - Admin Panel",
        options,
        Box::new(|cc| Ok(Box::new(AdminPanelApp::new(cc, config)))),
    )
}
