//! Serialization formats and file I/O for artifacts.
//!
//! Two formats, both lossless for f64 arrays:
//!
//! - [`BincodeSerializer`]: compact binary, the default
//! - [`JsonSerializer`]: human-readable, for debugging artifacts by eye
//!
//! [`ArtifactWriter`] and [`ArtifactReader`] pair a serializer with file I/O.

use crate::error::{ArtifactError, ArtifactResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// A serialization codec for artifact types.
pub trait ArtifactSerializer {
    /// Serializes a value to bytes.
    fn serialize<T: Serialize>(&self, value: &T) -> ArtifactResult<Vec<u8>>;

    /// Deserializes a value from bytes.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> ArtifactResult<T>;

    /// Conventional file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Compact binary format (default).
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeSerializer;

impl BincodeSerializer {
    /// Creates a bincode serializer.
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactSerializer for BincodeSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> ArtifactResult<Vec<u8>> {
        bincode::serialize(value).map_err(|e| ArtifactError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> ArtifactResult<T> {
        bincode::deserialize(bytes).map_err(|e| ArtifactError::Deserialization(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "bin"
    }
}

/// Human-readable JSON format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Creates a JSON serializer.
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactSerializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> ArtifactResult<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|e| ArtifactError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> ArtifactResult<T> {
        serde_json::from_slice(bytes).map_err(|e| ArtifactError::Deserialization(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Writes artifacts to files with a chosen serializer.
#[derive(Debug, Clone)]
pub struct ArtifactWriter<S: ArtifactSerializer> {
    serializer: S,
}

impl<S: ArtifactSerializer> ArtifactWriter<S> {
    /// Creates a writer around a serializer.
    pub fn new(serializer: S) -> Self {
        Self { serializer }
    }

    /// Serializes `value` and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Serialization`] or [`ArtifactError::Io`].
    pub fn write_to_file<T: Serialize>(&self, path: &Path, value: &T) -> ArtifactResult<()> {
        let bytes = self.serializer.serialize(value)?;
        std::fs::write(path, bytes).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reads artifacts from files with a chosen serializer.
#[derive(Debug, Clone)]
pub struct ArtifactReader<S: ArtifactSerializer> {
    serializer: S,
}

impl<S: ArtifactSerializer> ArtifactReader<S> {
    /// Creates a reader around a serializer.
    pub fn new(serializer: S) -> Self {
        Self { serializer }
    }

    /// Reads and deserializes a value from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] if the file does not exist,
    /// [`ArtifactError::Io`] on other read failures, or
    /// [`ArtifactError::Deserialization`] for corrupt bytes.
    pub fn read_from_file<T: DeserializeOwned>(&self, path: &Path) -> ArtifactResult<T> {
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.serializer.deserialize(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModelArtifact, ScalerArtifact};
    use casaval_features::{FeatureSchema, FEATURE_COUNT};
    use crate::ARTIFACT_FORMAT_VERSION;

    fn scaler_artifact() -> ScalerArtifact {
        ScalerArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema: FeatureSchema::current(),
            // Awkward values on purpose: round-tripping must be bit-exact.
            means: (0..FEATURE_COUNT).map(|i| (i as f64) / 3.0 + 0.1).collect(),
            stds: (0..FEATURE_COUNT).map(|i| (i as f64).exp().recip()).collect(),
        }
    }

    fn model_artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema: FeatureSchema::current(),
            coefficients: (0..FEATURE_COUNT).map(|i| (i as f64) * 1.0e-17 - 7.0).collect(),
            intercept: 206855.816_909_090_91,
        }
    }

    #[test]
    fn bincode_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.bin");
        let writer = ArtifactWriter::new(BincodeSerializer::new());
        let reader = ArtifactReader::new(BincodeSerializer::new());

        writer.write_to_file(&path, &scaler_artifact()).unwrap();
        let restored: ScalerArtifact = reader.read_from_file(&path).unwrap();
        assert_eq!(restored, scaler_artifact());
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let writer = ArtifactWriter::new(JsonSerializer::new());
        let reader = ArtifactReader::new(JsonSerializer::new());

        writer.write_to_file(&path, &model_artifact()).unwrap();
        let restored: ModelArtifact = reader.read_from_file(&path).unwrap();
        assert_eq!(restored, model_artifact());
    }

    #[test]
    fn missing_file_is_not_found() {
        let reader = ArtifactReader::new(BincodeSerializer::new());
        let err = reader
            .read_from_file::<ScalerArtifact>(Path::new("/nonexistent/scaler.bin"))
            .unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn corrupt_bytes_fail_deserialization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let reader = ArtifactReader::new(JsonSerializer::new());
        let err = reader.read_from_file::<ModelArtifact>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Deserialization(_)));
    }
}
