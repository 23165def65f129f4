mod ops;
mod types;
mod ui;

use eframe::egui;

use crate::types::config::{CONFIG_FILE, WorkoutConfig};
use crate::ui::app::{AppState, SetioApp};

fn main() -> eframe::Result<()> {
    let config_path = std::path::PathBuf::from(CONFIG_FILE);
    let config = WorkoutConfig::load_or_default(&config_path);
    let app = SetioApp::new(AppState::new(config, config_path));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([440.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Setio Workout Timer",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
