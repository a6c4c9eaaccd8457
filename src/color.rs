use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ClassTable;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: class label → Color32
// ---------------------------------------------------------------------------

/// Maps label values to distinct colours, one per class-table entry.
#[derive(Debug, Clone)]
pub struct ColorMap {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map covering every label of the class table.
    pub fn for_classes(classes: &ClassTable) -> Self {
        ColorMap {
            colors: generate_palette(classes.len()),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label value.
    pub fn color_for(&self, label: usize) -> Color32 {
        self.colors
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (class name → colour) in label order.
    pub fn legend_entries<'a>(&'a self, classes: &'a ClassTable) -> Vec<(&'a str, Color32)> {
        classes
            .names()
            .iter()
            .enumerate()
            .map(|(label, name)| (name.as_str(), self.color_for(label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_yields_distinct_colors_per_class() {
        let colors = generate_palette(10);
        assert_eq!(colors.len(), 10);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_labels_fall_back_to_the_default_color() {
        let map = ColorMap::for_classes(&ClassTable::cifar10());
        assert_ne!(map.color_for(0), Color32::GRAY);
        assert_eq!(map.color_for(99), Color32::GRAY);
    }

    #[test]
    fn legend_pairs_names_with_their_label_colors() {
        let classes = ClassTable::cifar10();
        let map = ColorMap::for_classes(&classes);
        let legend = map.legend_entries(&classes);
        assert_eq!(legend.len(), 10);
        assert_eq!(legend[0].0, "plane");
        assert_eq!(legend[0].1, map.color_for(0));
    }
}
