//! The two persisted artifact types.

use crate::error::{ArtifactError, ArtifactResult};
use casaval_features::FeatureSchema;
use casaval_model::{LinearRegression, StandardScaler};
use serde::{Deserialize, Serialize};

/// Artifact format version. Bump on any breaking change to the layout below.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Persisted scaler state: frozen per-feature mean and standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Artifact layout version.
    pub format_version: u32,
    /// The feature schema the statistics were computed against.
    pub schema: FeatureSchema,
    /// Per-column means, in schema order.
    pub means: Vec<f64>,
    /// Per-column standard deviations, in schema order.
    pub stds: Vec<f64>,
}

impl ScalerArtifact {
    /// Snapshots a fitted scaler under the current schema.
    pub fn from_scaler(scaler: &StandardScaler) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema: FeatureSchema::current(),
            means: scaler.means().to_vec(),
            stds: scaler.stds().to_vec(),
        }
    }

    /// Validates and reconstructs the read-only scaler.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::FormatVersionMismatch`],
    /// [`ArtifactError::SchemaMismatch`], or [`ArtifactError::InvalidState`]
    /// when the artifact does not match the current contract.
    pub fn into_scaler(self) -> ArtifactResult<StandardScaler> {
        self.validate()?;
        StandardScaler::from_state(self.means, self.stds)
            .map_err(|e| ArtifactError::InvalidState(e.to_string()))
    }

    /// Checks version, schema, and internal consistency.
    pub fn validate(&self) -> ArtifactResult<()> {
        validate_common(self.format_version, &self.schema)?;
        if self.means.len() != self.schema.len() || self.stds.len() != self.schema.len() {
            return Err(ArtifactError::InvalidState(format!(
                "scaler has {} means / {} stds for a {}-column schema",
                self.means.len(),
                self.stds.len(),
                self.schema.len()
            )));
        }
        Ok(())
    }
}

/// Persisted model parameters: fitted coefficients and intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact layout version.
    pub format_version: u32,
    /// The feature schema the model was trained against.
    pub schema: FeatureSchema,
    /// Fitted coefficients, in schema order.
    pub coefficients: Vec<f64>,
    /// Fitted intercept.
    pub intercept: f64,
}

impl ModelArtifact {
    /// Snapshots a fitted model under the current schema.
    pub fn from_model(model: &LinearRegression) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema: FeatureSchema::current(),
            coefficients: model.coefficients().to_vec(),
            intercept: model.intercept(),
        }
    }

    /// Validates and reconstructs the read-only model.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ScalerArtifact::into_scaler`].
    pub fn into_model(self) -> ArtifactResult<LinearRegression> {
        self.validate()?;
        Ok(LinearRegression::from_parameters(
            self.coefficients,
            self.intercept,
        ))
    }

    /// Checks version, schema, and internal consistency.
    pub fn validate(&self) -> ArtifactResult<()> {
        validate_common(self.format_version, &self.schema)?;
        if self.coefficients.len() != self.schema.len() {
            return Err(ArtifactError::InvalidState(format!(
                "model has {} coefficients for a {}-column schema",
                self.coefficients.len(),
                self.schema.len()
            )));
        }
        Ok(())
    }
}

fn validate_common(format_version: u32, schema: &FeatureSchema) -> ArtifactResult<()> {
    if format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::FormatVersionMismatch {
            expected: ARTIFACT_FORMAT_VERSION,
            found: format_version,
        });
    }
    let current = FeatureSchema::current();
    if !schema.matches(&current) {
        return Err(ArtifactError::SchemaMismatch {
            expected: current.len(),
            found: schema.len(),
        });
    }
    Ok(())
}
