mod app;
mod color;
mod data;
mod error;
mod state;
mod ui;

use std::path::PathBuf;

use app::NeighborscopeApp;
use eframe::egui;

/// Dataset loaded at startup when no path is given on the command line.
const DEFAULT_DATASET: &str = "data/train_reduced.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let dataset_path = startup_dataset();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Neighborscope – Embedding Viewer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the tooltip jpegs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(NeighborscopeApp::new(dataset_path)))
        }),
    )
}

/// First CLI argument if given, else the default dataset when present.
fn startup_dataset() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let default = PathBuf::from(DEFAULT_DATASET);
    default.exists().then_some(default)
}
