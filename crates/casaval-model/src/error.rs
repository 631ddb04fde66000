//! Error types for the numeric core.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in matrix, scaler, and regression operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Input width differs from the fitted state's column count.
    #[error("Dimension mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Column count the fitted state was built for.
        expected: usize,
        /// Column count that was supplied.
        actual: usize,
    },

    /// Matrix construction with inconsistent shape and data length.
    #[error("Shape mismatch: {rows}x{cols} matrix requires {} elements, got {len}", rows * cols)]
    ShapeMismatch {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Length of the provided data.
        len: usize,
    },

    /// An operation that requires at least one sample got none.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Predict or transform called before fit.
    #[error("Not fitted: call fit() first")]
    NotFitted,

    /// Row count of the design matrix differs from the target length.
    #[error("Sample count mismatch: {x_rows} feature rows vs {y_len} targets")]
    SampleCountMismatch {
        /// Rows in the design matrix.
        x_rows: usize,
        /// Length of the target vector.
        y_len: usize,
    },
}

impl ModelError {
    /// Create a dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
