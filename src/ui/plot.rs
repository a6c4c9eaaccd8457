use eframe::egui::{Color32, CursorIcon, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoint, Points};

use crate::state::AppState;

/// Pixel radius around the cursor inside which a point counts as hovered.
const PICK_RADIUS_PX: f32 = 8.0;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the embedding scatter plot in the central panel.
///
/// The plot owns hover detection: whichever point sits closest to the cursor
/// (within [`PICK_RADIUS_PX`] on screen) becomes the hovered point, and the
/// resulting state transitions drive the highlight rings and the tooltip
/// shown in the side panel.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a point table to view the embedding  (File → Open…)");
        });
        return;
    }

    Plot::new("embedding_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("x")
        .y_axis_label("y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Pick in screen space so the hit radius stays constant under
            // zoom; ties go to the lowest index.
            let pick: Option<usize> = state.dataset.as_ref().and_then(|dataset| {
                let pointer = plot_ui.response().hover_pos()?;
                dataset
                    .points()
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| {
                        let screen = plot_ui.screen_from_plot(PlotPoint::new(p.x, p.y));
                        let dist = screen.distance(pointer);
                        (dist <= PICK_RADIUS_PX).then_some((i, dist))
                    })
                    .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                    .map(|(i, _)| i)
            });

            match pick {
                Some(index) if state.hovered != Some(index) => {
                    if let Err(e) = state.hover(index) {
                        log::warn!("Hover failed for point {index}: {e}");
                    }
                }
                None if state.hovered.is_some() => state.hover_end(),
                _ => {}
            }

            if pick.is_some() {
                plot_ui
                    .response()
                    .ctx
                    .output_mut(|o| o.cursor_icon = CursorIcon::PointingHand);
            }

            let Some(dataset) = &state.dataset else {
                return;
            };

            // One series per class so the legend lists every class once.
            for (label, name) in state.classes.names().iter().enumerate() {
                let coords: Vec<[f64; 2]> = dataset
                    .points()
                    .iter()
                    .filter(|p| p.label == label)
                    .map(|p| [p.x, p.y])
                    .collect();
                if coords.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(coords)
                        .name(name)
                        .color(state.color_map.color_for(label))
                        .radius(3.0),
                );
            }

            // Highlight rings drawn on top: neighbors first, then the
            // hovered point with a larger ring.
            let rings: Vec<[f64; 2]> = state
                .highlighted
                .iter()
                .filter_map(|&i| dataset.get(i))
                .map(|p| [p.x, p.y])
                .collect();
            if !rings.is_empty() {
                plot_ui.points(
                    Points::new(rings)
                        .shape(MarkerShape::Circle)
                        .radius(6.0)
                        .filled(false)
                        .color(Color32::BLACK),
                );
            }
            if let Some(p) = state.hovered.and_then(|i| dataset.get(i)) {
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .shape(MarkerShape::Circle)
                        .radius(8.0)
                        .filled(false)
                        .color(Color32::BLACK),
                );
            }
        });
}
