use eframe::egui;
use log::{error, info};

mod app;
mod command;
mod config;
mod models;
mod shortcut;
mod textures;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = config::load_config();

    let registry = nodes::global_registry();
    if let Err(e) = models::register_data_models(&registry) {
        error!("Failed to register data models: {}", e);
        std::process::exit(1);
    }
    info!(
        "Registered node models: {}",
        registry.registered_model_names().join(", ")
    );

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&title)
                .with_inner_size([config.window.width, config.window.height]),
            ..Default::default()
        },
        Box::new(move |cc| Ok(Box::new(app::FlowEditorApp::new(cc, &config)))),
    )
}
