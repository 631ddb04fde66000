//! The loaded prediction path: encode → scale → predict.

use crate::error::{ServingError, ServingResult};
use casaval_artifact::{
    ArtifactReader, BincodeSerializer, JsonSerializer, ModelArtifact, ScalerArtifact,
};
use casaval_features::RawRecord;
use casaval_model::{LinearRegression, StandardScaler};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One prediction: the raw estimate plus its display form.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Estimated median house value in dollars.
    pub estimate: f64,
    /// Currency-formatted display string, e.g. `$452,600.00`.
    pub formatted: String,
}

/// The read-only inference state: frozen scaler plus frozen model.
///
/// Both artifacts are validated against the current feature schema at load
/// time, so schema drift fails at startup instead of producing silently
/// wrong predictions. After construction the predictor is immutable and can
/// be shared freely across concurrent requests.
#[derive(Debug, Clone)]
pub struct Predictor {
    scaler: StandardScaler,
    model: LinearRegression,
}

impl Predictor {
    /// Builds a predictor from already-validated components.
    pub fn new(scaler: StandardScaler, model: LinearRegression) -> Self {
        Self { scaler, model }
    }

    /// Loads `scaler.bin`/`model.bin` (or their `.json` variants) from the
    /// artifact directory, preferring the binary format.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::ArtifactLoad`] for a missing, corrupt, or
    /// schema-drifted artifact. Fatal at startup.
    pub fn load_from_dir(dir: &Path) -> ServingResult<Self> {
        let scaler_artifact: ScalerArtifact = read_artifact(dir, "scaler")?;
        let model_artifact: ModelArtifact = read_artifact(dir, "model")?;

        let scaler = scaler_artifact.into_scaler()?;
        let model = model_artifact.into_model()?;
        info!(dir = %dir.display(), "Artifacts loaded and validated");
        Ok(Self::new(scaler, model))
    }

    /// Predicts the median house value for one raw record.
    ///
    /// Reproduces the training-time encoding exactly: the shared encoder
    /// produces the schema-ordered vector, the frozen scaler standardizes
    /// it, the frozen coefficients produce the estimate. Deterministic:
    /// identical artifacts and input yield bit-identical output.
    ///
    /// # Errors
    ///
    /// Returns [`ServingError::InvalidRequest`] for bad input and
    /// [`ServingError::Prediction`] for dimension drift past validation.
    pub fn predict(&self, record: &RawRecord) -> ServingResult<Prediction> {
        let vector = record.encode()?;
        let scaled = self.scaler.transform_vector(&vector)?;
        let estimate = self.model.predict_one(&scaled)?;
        Ok(Prediction {
            estimate,
            formatted: format_usd(estimate),
        })
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> ServingResult<T> {
    let bin_path = dir.join(format!("{name}.bin"));
    if bin_path.exists() {
        return Ok(ArtifactReader::new(BincodeSerializer::new()).read_from_file(&bin_path)?);
    }
    let json_path = dir.join(format!("{name}.json"));
    Ok(ArtifactReader::new(JsonSerializer::new()).read_from_file(&json_path)?)
}

/// Formats a dollar amount with thousands separators and two decimals.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}
