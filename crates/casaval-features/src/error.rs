//! Error types for feature encoding.

use thiserror::Error;

/// Result type alias for feature operations.
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Errors that can occur while encoding a raw record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    /// The categorical value is not one of the five known ocean-proximity
    /// categories.
    #[error("Unknown ocean_proximity category: {0:?}")]
    InvalidCategory(String),

    /// A numeric attribute is NaN or infinite.
    #[error("Invalid value for {field}: {value} (must be finite)")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// The non-finite value that was supplied.
        value: f64,
    },

    /// A one-hot indicator pattern does not correspond to any category.
    #[error("Invalid one-hot pattern: {0:?}")]
    InvalidOneHot(Vec<f64>),
}

impl FeatureError {
    /// Create an invalid-category error.
    pub fn invalid_category(value: impl Into<String>) -> Self {
        Self::InvalidCategory(value.into())
    }

    /// Create an invalid-input error for a named field.
    pub fn invalid_input(field: &'static str, value: f64) -> Self {
        Self::InvalidInput { field, value }
    }
}
