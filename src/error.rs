use thiserror::Error;

/// Errors returned by data loading and interaction handling.
#[derive(Debug, Error)]
pub enum Error {
    /// File extension not handled by any loader.
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// The input table lacks one of the required columns.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A coordinate field failed to parse as a finite number.
    #[error("row {row}: column '{column}' value '{value}' is not a finite number")]
    InvalidNumber {
        /// Zero-based data row (header excluded).
        row: usize,
        /// Column name.
        column: &'static str,
        /// Offending raw value.
        value: String,
    },

    /// A label field does not index the class table.
    #[error("row {row}: label {label} does not name any of the {n_classes} known classes")]
    LabelOutOfRange {
        /// Zero-based data row (header excluded).
        row: usize,
        /// Raw label value.
        label: i64,
        /// Number of known classes.
        n_classes: usize,
    },

    /// Input file or column has an unusable shape or type.
    #[error("{0}")]
    Format(String),

    /// Requested neighbor count is below the minimum of 1.
    #[error("neighbor count must be at least 1, got {0}")]
    InvalidNeighborCount(i64),

    /// A point index does not refer to a dataset member.
    #[error("point index {index} is out of bounds for a dataset of {len} points")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Dataset length.
        len: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
