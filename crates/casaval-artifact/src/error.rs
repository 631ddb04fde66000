//! Error types for artifact persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors that can occur while saving or loading artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// I/O error during artifact operations.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Artifact file not found.
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),

    /// Error during serialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Corrupt or otherwise undecodable artifact bytes.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Artifact format version differs from what this build writes.
    #[error("Format version mismatch: expected {expected}, found {found}")]
    FormatVersionMismatch {
        /// Version this build writes.
        expected: u32,
        /// Version found in the artifact.
        found: u32,
    },

    /// The embedded feature schema does not match the current contract.
    ///
    /// This signals artifact/schema drift and is fatal for the session; do
    /// not retry with the same artifact.
    #[error("Schema mismatch: artifact was trained against a different feature schema ({found} columns, current contract has {expected})")]
    SchemaMismatch {
        /// Column count of the current schema.
        expected: usize,
        /// Column count embedded in the artifact.
        found: usize,
    },

    /// Internally inconsistent artifact (e.g. coefficient count differs from
    /// the embedded schema length).
    #[error("Invalid artifact state: {0}")]
    InvalidState(String),
}
