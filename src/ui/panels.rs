use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, MAX_NEIGHBOR_COUNT};

// ---------------------------------------------------------------------------
// Left side panel – neighbor controls, legend, hovered point
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Neighbor inspection");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Neighbor count slider ----
            ui.strong("Neighbors");
            let mut count = state.neighbor_count;
            ui.add(egui::Slider::new(&mut count, 1..=MAX_NEIGHBOR_COUNT).text("nearest points"));
            if count != state.neighbor_count {
                if let Err(e) = state.set_neighbor_count(count as i64) {
                    log::warn!("Rejected neighbor count {count}: {e}");
                    state.status_message = Some(format!("Error: {e}"));
                }
            }
            ui.separator();

            // ---- Class legend with point counts ----
            ui.strong("Classes");
            let counts = state
                .dataset
                .as_ref()
                .map(|ds| ds.label_counts(state.classes.len()))
                .unwrap_or_default();
            for (label, (name, color)) in state
                .color_map
                .legend_entries(&state.classes)
                .into_iter()
                .enumerate()
            {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(name).color(color).strong());
                    let n_points = counts.get(label).copied().unwrap_or(0);
                    ui.label(format!("({n_points})"));
                });
            }
            ui.separator();

            // ---- Hovered point details ----
            ui.strong("Hovered point");
            match &state.tooltip {
                None => {
                    ui.label("Hover a point to inspect its neighbors.");
                }
                Some(tooltip) => {
                    ui.label(format!("point label: {}", tooltip.label));
                    ui.add(
                        egui::Image::from_uri(format!(
                            "file://{}",
                            tooltip.image_path.display()
                        ))
                        .fit_to_exact_size(egui::vec2(100.0, 100.0)),
                    );
                    ui.label(format!(
                        "neighbor labels: {}",
                        tooltip.neighbor_labels.join(", ")
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} points, {} classes",
                ds.len(),
                state.classes.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open point table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
