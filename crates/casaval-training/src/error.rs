//! Error types for the training pipeline.

use casaval_artifact::ArtifactError;
use casaval_data::DataError;
use casaval_features::FeatureError;
use casaval_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for training operations.
pub type TrainingResult<T> = Result<T, TrainingError>;

/// Errors that can occur during a training run.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Dataset loading or preparation failed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Feature encoding failed.
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    /// Scaling or fitting failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Artifact persistence failed.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Output directory could not be created.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
