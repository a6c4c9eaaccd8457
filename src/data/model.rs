use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ClassTable – label value → human-readable class name
// ---------------------------------------------------------------------------

/// CIFAR-10 class names; label value `i` maps to entry `i`.
pub const CIFAR10_CLASSES: [&str; 10] = [
    "plane", "car", "bird", "cat", "deer", "dog", "frog", "horse", "ship", "truck",
];

/// Directory holding one representative image per class.
pub const IMAGE_DIR: &str = "images";

/// Ordered, read-only table of class names, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    /// The ten CIFAR-10 classes.
    pub fn cifar10() -> Self {
        Self::new(CIFAR10_CLASSES)
    }

    /// Build a table from arbitrary ordered names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassTable {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the class a label value maps to, if the label is in range.
    pub fn name(&self, label: usize) -> Option<&str> {
        self.names.get(label).map(String::as_str)
    }

    /// All class names in label order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no classes.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Representative image location for a label: `images/<name>.jpeg`.
    pub fn image_path(&self, label: usize) -> Option<PathBuf> {
        self.name(label)
            .map(|name| PathBuf::from(IMAGE_DIR).join(format!("{name}.jpeg")))
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::cifar10()
    }
}

// ---------------------------------------------------------------------------
// LabeledPoint – one row of the source table
// ---------------------------------------------------------------------------

/// A single labeled sample of the 2D embedding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    /// Embedding x coordinate (finite).
    pub x: f64,
    /// Embedding y coordinate (finite).
    pub y: f64,
    /// Class label, an index into the [`ClassTable`].
    pub label: usize,
}

// ---------------------------------------------------------------------------
// EmbeddingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded embedding, in source row order.
///
/// The point sequence is fixed at construction; neighbor queries report
/// indices into this order.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingDataset {
    points: Vec<LabeledPoint>,
}

impl EmbeddingDataset {
    /// Wrap an ordered sequence of validated points.
    pub fn from_points(points: Vec<LabeledPoint>) -> Self {
        EmbeddingDataset { points }
    }

    /// All points in source order.
    pub fn points(&self) -> &[LabeledPoint] {
        &self.points
    }

    /// The point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&LabeledPoint> {
        self.points.get(index)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point count per label value, indexed by label.
    ///
    /// Labels at or above `n_classes` are ignored; loaded datasets cannot
    /// contain them.
    pub fn label_counts(&self, n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0usize; n_classes];
        for p in &self.points {
            if let Some(slot) = counts.get_mut(p.label) {
                *slot += 1;
            }
        }
        counts
    }
}
