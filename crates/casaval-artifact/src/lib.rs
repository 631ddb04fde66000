//! Versioned persistence for the fitted scaler and model.
//!
//! Training writes two artifacts, serving reads them back; nothing else ever
//! crosses the phase boundary. Each artifact embeds a format version and the
//! full [`FeatureSchema`](casaval_features::FeatureSchema) it was trained
//! against, and loading validates both, so schema drift between an old
//! artifact and new code fails loudly instead of silently producing wrong
//! predictions.
//!
//! Round-trip law: `load(save(x)) == x`, lossless for every f64.
//!
//! # Example
//!
//! ```no_run
//! use casaval_artifact::{ArtifactReader, ArtifactWriter, BincodeSerializer, ScalerArtifact};
//! use casaval_model::{Matrix, StandardScaler};
//! use std::path::Path;
//!
//! # fn main() -> casaval_artifact::ArtifactResult<()> {
//! let mut scaler = StandardScaler::new();
//! # let x = Matrix::from_vec(1, 12, vec![0.0; 12]).unwrap();
//! scaler.fit(&x).unwrap();
//!
//! let writer = ArtifactWriter::new(BincodeSerializer::new());
//! writer.write_to_file(Path::new("scaler.bin"), &ScalerArtifact::from_scaler(&scaler))?;
//!
//! let reader = ArtifactReader::new(BincodeSerializer::new());
//! let restored: ScalerArtifact = reader.read_from_file(Path::new("scaler.bin"))?;
//! let scaler = restored.into_scaler()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod serialization;
pub mod types;

pub use error::{ArtifactError, ArtifactResult};
pub use serialization::{
    ArtifactReader, ArtifactSerializer, ArtifactWriter, BincodeSerializer, JsonSerializer,
};
pub use types::{ModelArtifact, ScalerArtifact, ARTIFACT_FORMAT_VERSION};
