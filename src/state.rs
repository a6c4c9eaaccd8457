use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::loader::load_file;
use crate::data::model::{ClassTable, EmbeddingDataset};
use crate::data::neighbor::nearest_to_index;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Neighbor count shown at startup.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 7;

/// Upper bound of the neighbor-count slider.
pub const MAX_NEIGHBOR_COUNT: usize = 30;

/// Content of the hovered-point tooltip, rebuilt on every hover transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Class name of the hovered point.
    pub label: String,
    /// Representative image for that class.  The file may be absent; the
    /// image widget then shows its broken-image state without blocking the
    /// hover interaction.
    pub image_path: PathBuf,
    /// Class names of the neighbors, nearest first.
    pub neighbor_labels: Vec<String>,
}

/// The full UI state, independent of rendering.
///
/// Single-owner: mutated only by user-input events on the UI thread, read by
/// the renderers on every frame.  An empty `highlighted` plus `None` tooltip
/// is the "nothing hovered" rendering instruction.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<EmbeddingDataset>,

    /// Class-name table, fixed at startup.
    pub classes: ClassTable,

    /// Colour per class label.
    pub color_map: ColorMap,

    /// Neighbor count `n` selected by the slider; always >= 1.
    pub neighbor_count: usize,

    /// Index of the point under the pointer, if any.
    pub hovered: Option<usize>,

    /// Indices to draw highlighted, nearest first.
    pub highlighted: Vec<usize>,

    /// Tooltip for the hovered point (None hides it).
    pub tooltip: Option<Tooltip>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let classes = ClassTable::cifar10();
        let color_map = ColorMap::for_classes(&classes);
        Self {
            dataset: None,
            classes,
            color_map,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            hovered: None,
            highlighted: Vec::new(),
            tooltip: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset.  Hover state is dropped: its indices
    /// refer to the previous dataset.
    pub fn set_dataset(&mut self, dataset: EmbeddingDataset) {
        self.hover_end();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a point table from disk into the session.  On failure the
    /// previous dataset is kept and the error is surfaced as a status
    /// message instead.
    pub fn load_from_path(&mut self, path: &Path) {
        match load_file(path, &self.classes) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} points from {}",
                    dataset.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// React to the pointer settling on the point at `index`: recompute its
    /// neighbor set with the current count and rebuild the highlight list
    /// and tooltip.  Invalid indices are rejected with the state untouched.
    pub fn hover(&mut self, index: usize) -> Result<()> {
        let (neighbors, tooltip) = {
            let dataset = self
                .dataset
                .as_ref()
                .ok_or(Error::IndexOutOfBounds { index, len: 0 })?;
            let point = *dataset.get(index).ok_or(Error::IndexOutOfBounds {
                index,
                len: dataset.len(),
            })?;

            let neighbors = nearest_to_index(dataset, index, self.neighbor_count)?;
            let neighbor_labels: Vec<String> = neighbors
                .iter()
                .filter_map(|&i| dataset.get(i))
                .map(|p| self.class_name(p.label))
                .collect();

            let tooltip = Tooltip {
                label: self.class_name(point.label),
                image_path: self.classes.image_path(point.label).unwrap_or_default(),
                neighbor_labels,
            };
            (neighbors, tooltip)
        };

        self.hovered = Some(index);
        self.highlighted = neighbors;
        self.tooltip = Some(tooltip);
        Ok(())
    }

    /// React to the pointer leaving all points: hide the tooltip and drop
    /// every highlight.
    pub fn hover_end(&mut self) {
        self.hovered = None;
        self.highlighted.clear();
        self.tooltip = None;
    }

    /// Change the neighbor count from the slider.  Values below 1 are
    /// rejected and leave the current count untouched.  While a point is
    /// hovered, the highlight set and tooltip are recomputed immediately so
    /// the display stays consistent with the new count.
    pub fn set_neighbor_count(&mut self, raw: i64) -> Result<()> {
        if raw < 1 {
            return Err(Error::InvalidNeighborCount(raw));
        }
        self.neighbor_count = raw as usize;
        if let Some(index) = self.hovered {
            self.hover(index)?;
        }
        Ok(())
    }

    fn class_name(&self, label: usize) -> String {
        self.classes.name(label).unwrap_or("unknown").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LabeledPoint;

    fn state_with(points: &[(f64, f64, usize)]) -> AppState {
        let mut state = AppState::default();
        state.set_dataset(EmbeddingDataset::from_points(
            points
                .iter()
                .map(|&(x, y, label)| LabeledPoint { x, y, label })
                .collect(),
        ));
        state
    }

    #[test]
    fn hover_builds_highlights_and_tooltip() {
        let mut state = state_with(&[
            (0.0, 0.0, 3), // cat
            (1.0, 0.0, 6), // frog
            (0.0, 5.0, 4), // deer
            (10.0, 10.0, 1),
        ]);
        state.neighbor_count = 2;

        state.hover(0).unwrap();

        assert_eq!(state.hovered, Some(0));
        assert_eq!(state.highlighted, vec![1, 2]);
        let tooltip = state.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.label, "cat");
        assert_eq!(
            tooltip.image_path,
            PathBuf::from("images").join("cat.jpeg")
        );
        assert_eq!(tooltip.neighbor_labels, vec!["frog", "deer"]);
    }

    #[test]
    fn hover_then_hover_end_clears_everything() {
        let mut state = state_with(&[(0.0, 0.0, 0), (1.0, 1.0, 1)]);
        state.hover(0).unwrap();
        assert!(!state.highlighted.is_empty());
        assert!(state.tooltip.is_some());

        state.hover_end();

        assert_eq!(state.hovered, None);
        assert!(state.highlighted.is_empty());
        assert!(state.tooltip.is_none());
    }

    #[test]
    fn slider_rejects_counts_below_one_and_keeps_state() {
        let mut state = state_with(&[(0.0, 0.0, 0), (1.0, 1.0, 1), (2.0, 2.0, 2)]);
        state.hover(0).unwrap();
        let highlighted_before = state.highlighted.clone();

        for raw in [0, -3] {
            let err = state.set_neighbor_count(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidNeighborCount(r) if r == raw));
            assert_eq!(state.neighbor_count, DEFAULT_NEIGHBOR_COUNT);
            assert_eq!(state.highlighted, highlighted_before);
        }
    }

    #[test]
    fn slider_change_while_hovering_recomputes_the_highlight_set() {
        let mut state = state_with(&[
            (0.0, 0.0, 0),
            (1.0, 0.0, 1),
            (2.0, 0.0, 2),
            (3.0, 0.0, 3),
        ]);
        state.neighbor_count = 1;
        state.hover(0).unwrap();
        assert_eq!(state.highlighted, vec![1]);

        state.set_neighbor_count(3).unwrap();

        assert_eq!(state.neighbor_count, 3);
        assert_eq!(state.hovered, Some(0));
        assert_eq!(state.highlighted, vec![1, 2, 3]);
        let tooltip = state.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.neighbor_labels, vec!["car", "bird", "cat"]);
    }

    #[test]
    fn slider_change_without_hover_only_updates_the_count() {
        let mut state = state_with(&[(0.0, 0.0, 0)]);
        state.set_neighbor_count(12).unwrap();
        assert_eq!(state.neighbor_count, 12);
        assert!(state.highlighted.is_empty());
        assert!(state.tooltip.is_none());
    }

    #[test]
    fn invalid_hover_index_is_rejected_without_side_effects() {
        let mut state = state_with(&[(0.0, 0.0, 0)]);
        let err = state.hover(5).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 5, len: 1 }));
        assert_eq!(state.hovered, None);
        assert!(state.tooltip.is_none());

        let mut empty = AppState::default();
        assert!(empty.hover(0).is_err());
    }

    #[test]
    fn new_dataset_drops_stale_hover_state() {
        let mut state = state_with(&[(0.0, 0.0, 0), (1.0, 1.0, 1)]);
        state.hover(1).unwrap();

        state.set_dataset(EmbeddingDataset::from_points(vec![LabeledPoint {
            x: 9.0,
            y: 9.0,
            label: 2,
        }]));

        assert_eq!(state.hovered, None);
        assert!(state.highlighted.is_empty());
        assert!(state.tooltip.is_none());
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
    }

    #[test]
    fn failed_load_keeps_no_dataset_and_surfaces_a_status() {
        let path = std::env::temp_dir().join(format!(
            "neighborscope-state-bad-{}.csv",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "x,y,label\n0.0,0.0,1\n1.0,1.0,2\n2.0,2.0,oops\n3.0,3.0,3\n4.0,4.0,4\n",
        )
        .unwrap();

        let mut state = AppState::default();
        state.load_from_path(&path);
        let _ = std::fs::remove_file(&path);

        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn successful_load_replaces_the_dataset_and_clears_the_status() {
        let path = std::env::temp_dir().join(format!(
            "neighborscope-state-good-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "x,y,label\n1.0,2.0,0\n3.0,4.0,9\n").unwrap();

        let mut state = AppState::default();
        state.status_message = Some("old error".to_string());
        state.load_from_path(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(2));
        assert!(state.status_message.is_none());
    }
}
