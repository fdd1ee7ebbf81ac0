//! Error types for the obsdd library.

use std::path::PathBuf;
use thiserror::Error;

use crate::data::StorageClass;

/// Main error type for obsdd operations.
#[derive(Debug, Error)]
pub enum ObsddError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing CSV/TSV data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column has no rows, so no percentage can be computed for it.
    #[error("Empty dataset: column '{column}' has no rows")]
    EmptyColumn { column: String },

    /// A column's storage class is not one the classifier understands.
    #[error("Unsupported column type for '{column}': {storage}")]
    UnsupportedColumnType {
        column: String,
        storage: StorageClass,
    },

    /// Numeric statistics were requested for a column with no observed values.
    #[error("Insufficient data in column '{column}': no observed values")]
    InsufficientData { column: String },

    /// A value does not match the declared storage class of its column.
    #[error("Column '{column}' is declared {expected} but row {row} holds a {found} value")]
    StorageMismatch {
        column: String,
        row: usize,
        expected: StorageClass,
        found: StorageClass,
    },

    /// Two columns share a name.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length differs from the rest of the dataset.
    #[error("Column '{column}' has {actual} rows, dataset has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for obsdd operations.
pub type Result<T> = std::result::Result<T, ObsddError>;
