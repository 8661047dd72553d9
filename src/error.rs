//! Error types for marker statistics.
//!
//! Every variant is fatal for the run that raised it: the statistics table is
//! joined by marker position in several places, so skipping a single marker
//! would misalign everything downstream of it.

use thiserror::Error;

/// Main error type for marker-level analysis
#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("Invalid group label {value} at sample {sample}: labels must be 0 or 1")]
    InvalidLabel { sample: usize, value: i64 },

    #[error(
        "Log2 fold change undefined for marker '{marker}': group means are {group0_mean} (group 0) and {group1_mean} (group 1)"
    )]
    NonPositiveMean {
        marker: String,
        group0_mean: f64,
        group1_mean: f64,
    },

    #[error("Empty input: {reason}")]
    EmptyInput { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Marker '{marker}': group {group} has {count} samples, at least 2 are required")]
    InsufficientSamples {
        marker: String,
        group: u8,
        count: usize,
    },

    #[error("Invalid p-value for marker '{marker}': {value}")]
    InvalidPValue { marker: String, value: f64 },

    #[error("Duplicate marker name '{marker}'")]
    DuplicateMarker { marker: String },

    #[error("Group column '{column}' not found in header")]
    MissingGroupColumn { column: String },

    #[error("Missing value at row {row}, column '{column}'")]
    MissingValue { row: usize, column: String },

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    ParseValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for marker statistics operations
pub type Result<T> = std::result::Result<T, MarkerError>;
