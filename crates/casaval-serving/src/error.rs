//! Error types for the serving crate.

use casaval_artifact::ArtifactError;
use casaval_features::FeatureError;
use casaval_model::ModelError;
use thiserror::Error;

/// Result type alias for serving operations.
pub type ServingResult<T> = Result<T, ServingError>;

/// Errors that can occur in the serving layer.
#[derive(Debug, Error)]
pub enum ServingError {
    /// Artifact loading failed at startup. Fatal: the server cannot predict
    /// without both artifacts.
    #[error("Failed to load artifact: {0}")]
    ArtifactLoad(#[from] ArtifactError),

    /// Dataset loading failed at startup (the chart panels need it).
    #[error("Failed to load dataset: {0}")]
    DatasetLoad(#[from] casaval_data::DataError),

    /// The request carried an invalid category or non-finite numeric.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Prediction failed after validation (artifact/schema drift mid-flight).
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// The external chat service is unreachable or returned an error.
    /// Recoverable: surfaced to the user, never affects prediction.
    #[error("Chat service unavailable: {0}")]
    ExternalService(String),

    /// Unknown chat session id.
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// Server configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServingError {
    /// Create an invalid-request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an external-service error.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::UnknownSession(_)
        )
    }

    /// True for errors the caller may retry (only the chat side-channel).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

impl From<FeatureError> for ServingError {
    fn from(e: FeatureError) -> Self {
        // Encoding failures are always the caller's input.
        Self::InvalidRequest(e.to_string())
    }
}

impl From<ModelError> for ServingError {
    fn from(e: ModelError) -> Self {
        // Post-validation numeric failures mean artifact drift, not bad input.
        Self::Prediction(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_of_errors() {
        assert!(ServingError::invalid_request("bad").is_client_error());
        assert!(!ServingError::invalid_request("bad").is_recoverable());
        assert!(ServingError::external("down").is_recoverable());
        assert!(!ServingError::external("down").is_client_error());
        assert!(!ServingError::Prediction("drift".into()).is_client_error());
    }

    #[test]
    fn feature_errors_become_client_errors() {
        let err: ServingError = FeatureError::invalid_category("RIVERSIDE").into();
        assert!(err.is_client_error());
    }
}
