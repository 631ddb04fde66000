//! Error types for dataset loading.

use casaval_features::FeatureError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while loading or preparing the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// I/O error while opening the dataset file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// CSV parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset contains no rows.
    #[error("Dataset is empty")]
    Empty,

    /// A required value is missing after imputation.
    #[error("Missing value in row {row}: {field}")]
    MissingValue {
        /// Zero-based row index.
        row: usize,
        /// Column name.
        field: &'static str,
    },

    /// Feature encoding failed for a row.
    #[error("Row {row}: {source}")]
    Encoding {
        /// Zero-based row index.
        row: usize,
        /// Underlying encoding error.
        #[source]
        source: FeatureError,
    },

    /// Feature matrix assembly failed.
    #[error("Matrix error: {0}")]
    Matrix(#[from] casaval_model::ModelError),
}
