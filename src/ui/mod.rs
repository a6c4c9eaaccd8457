/// UI layer: egui panels and the central scatter plot.

pub mod panels;
pub mod plot;
