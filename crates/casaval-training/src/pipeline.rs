//! The training pipeline itself.

use crate::error::{TrainingError, TrainingResult};
use casaval_artifact::{
    ArtifactWriter, BincodeSerializer, JsonSerializer, ModelArtifact, ScalerArtifact,
};
use casaval_data::HousingDataset;
use casaval_features::{OceanProximity, RawRecord};
use casaval_model::{
    mean_squared_error, r_squared, train_test_split, LinearRegression, StandardScaler,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Serialization format for the persisted artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Compact binary (default).
    #[default]
    Bincode,
    /// Human-readable JSON.
    Json,
}

/// Configuration for one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Path to the housing CSV.
    pub data_path: PathBuf,
    /// Directory the two artifacts are written into (created if missing).
    pub output_dir: PathBuf,
    /// Held-out fraction for evaluation.
    pub test_fraction: f64,
    /// Seed for the reproducible split.
    pub seed: u64,
    /// Artifact serialization format.
    pub format: ArtifactFormat,
}

impl TrainConfig {
    /// Default run: 20% held out, seed 42, bincode artifacts.
    pub fn new(data_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            output_dir: output_dir.into(),
            test_fraction: 0.2,
            seed: 42,
            format: ArtifactFormat::Bincode,
        }
    }
}

/// What a training run produced.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub total_rows: usize,
    pub imputed_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// R² on the held-out partition.
    pub r_squared: f64,
    /// MSE on the held-out partition.
    pub mse: f64,
    /// Prediction for the fixed smoke-test sample (inland block at
    /// longitude -120, latitude 35).
    pub sample_prediction: f64,
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
}

/// Runs the full pipeline and persists both artifacts.
///
/// Scaler statistics are computed from the training partition only; the
/// `total_bedrooms` imputation mean is computed over the whole dataset before
/// the split (reference behavior, see DESIGN.md).
///
/// # Errors
///
/// Any [`TrainingError`]; nothing is retried, nothing is written on failure
/// before the persist step.
pub fn run(config: &TrainConfig) -> TrainingResult<TrainReport> {
    info!(path = %config.data_path.display(), "Loading dataset");
    let mut dataset = HousingDataset::from_csv_path(&config.data_path)?;
    let total_rows = dataset.len();
    info!(
        rows = total_rows,
        null_total_bedrooms = dataset.null_total_bedrooms(),
        "Dataset loaded"
    );

    let imputed_rows = dataset.impute_total_bedrooms()?;
    info!(imputed = imputed_rows, "Imputed missing total_bedrooms");

    let (x, y) = dataset.to_matrix()?;
    let (train_idx, test_idx) = train_test_split(x.n_rows(), config.test_fraction, config.seed)?;
    let x_train = x.take_rows(&train_idx);
    let x_test = x.take_rows(&test_idx);
    let y_train: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
    let y_test: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();
    info!(
        train = x_train.n_rows(),
        test = x_test.n_rows(),
        seed = config.seed,
        "Split dataset"
    );

    let mut scaler = StandardScaler::new();
    scaler.fit(&x_train)?;
    let x_train_scaled = scaler.transform(&x_train)?;
    let x_test_scaled = scaler.transform(&x_test)?;

    let mut model = LinearRegression::new();
    model.fit(&x_train_scaled, &y_train)?;

    let y_pred = model.predict(&x_test_scaled)?;
    let r2 = r_squared(&y_pred, &y_test);
    let mse = mean_squared_error(&y_pred, &y_test);
    for (pred, actual) in y_pred.iter().zip(&y_test).take(5) {
        info!(predicted = pred, actual = actual, "Held-out example");
    }
    info!(r_squared = r2, mse = mse, "Evaluation on held-out partition");

    let sample_prediction = predict_sample(&scaler, &model)?;
    info!(sample_prediction, "Fixed-sample smoke prediction");

    let (scaler_path, model_path) = persist(config, &scaler, &model)?;
    info!(
        scaler = %scaler_path.display(),
        model = %model_path.display(),
        "Artifacts written"
    );

    Ok(TrainReport {
        total_rows,
        imputed_rows,
        train_rows: x_train.n_rows(),
        test_rows: x_test.n_rows(),
        r_squared: r2,
        mse,
        sample_prediction,
        scaler_path,
        model_path,
    })
}

// The same sanity sample the reference runs after training:
// [-120, 35, 20, 3000, 500, 800, 400, 4.5, INLAND].
fn predict_sample(scaler: &StandardScaler, model: &LinearRegression) -> TrainingResult<f64> {
    let record = RawRecord {
        longitude: -120.0,
        latitude: 35.0,
        housing_median_age: 20.0,
        total_rooms: 3000.0,
        total_bedrooms: 500.0,
        population: 800.0,
        households: 400.0,
        median_income: 4.5,
        ocean_proximity: OceanProximity::Inland,
    };
    let scaled = scaler.transform_vector(&record.encode()?)?;
    Ok(model.predict_one(&scaled)?)
}

fn persist(
    config: &TrainConfig,
    scaler: &StandardScaler,
    model: &LinearRegression,
) -> TrainingResult<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(&config.output_dir).map_err(|source| TrainingError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let scaler_artifact = ScalerArtifact::from_scaler(scaler);
    let model_artifact = ModelArtifact::from_model(model);

    let ext = match config.format {
        ArtifactFormat::Bincode => "bin",
        ArtifactFormat::Json => "json",
    };
    let scaler_path = config.output_dir.join(format!("scaler.{ext}"));
    let model_path = config.output_dir.join(format!("model.{ext}"));

    match config.format {
        ArtifactFormat::Bincode => {
            let writer = ArtifactWriter::new(BincodeSerializer::new());
            writer.write_to_file(&scaler_path, &scaler_artifact)?;
            writer.write_to_file(&model_path, &model_artifact)?;
        }
        ArtifactFormat::Json => {
            let writer = ArtifactWriter::new(JsonSerializer::new());
            writer.write_to_file(&scaler_path, &scaler_artifact)?;
            writer.write_to_file(&model_path, &model_artifact)?;
        }
    }

    Ok((scaler_path, model_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_reference_run() {
        let config = TrainConfig::new("housing.csv", "artifacts");
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.format, ArtifactFormat::Bincode);
    }
}
