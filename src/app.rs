use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NeighborscopeApp {
    pub state: AppState,
}

impl NeighborscopeApp {
    /// Build the app, loading `dataset_path` when one exists.
    pub fn new(dataset_path: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = dataset_path {
            state.load_from_path(&path);
        }
        Self { state }
    }
}

impl Default for NeighborscopeApp {
    fn default() -> Self {
        Self::new(None)
    }
}

impl eframe::App for NeighborscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: neighbor controls, legend, hovered point ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &mut self.state);
        });
    }
}
