//! Train Command Implementation
//!
//! Runs the one-shot training pipeline: load the CSV, impute, encode, split,
//! scale, fit, evaluate, and persist the two artifacts.

use anyhow::{Context, Result};
use casaval_training::{ArtifactFormat, TrainConfig};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Train the housing model
///
/// This command runs the full training pipeline against the raw housing CSV
/// and writes the frozen scaler and model artifacts into the output
/// directory, printing the evaluation report as JSON.
///
/// # Example
///
/// ```bash
/// casaval train \
///     --data-path housing.csv \
///     --output-dir ./artifacts \
///     --format json
/// ```
#[derive(Args, Debug, Clone)]
pub struct TrainCommand {
    /// Path to the raw housing CSV
    #[arg(long, short = 'i', env = "CASAVAL_DATA_PATH")]
    pub data_path: PathBuf,

    /// Directory to write the scaler and model artifacts into
    #[arg(long, short = 'o', env = "CASAVAL_ARTIFACT_DIR")]
    pub output_dir: PathBuf,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_fraction: f64,

    /// Seed for the reproducible train/test split
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Artifact serialization format
    #[arg(long, value_enum, default_value = "bincode")]
    pub format: FormatArg,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
    Bincode,
    Json,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bincode => ArtifactFormat::Bincode,
            FormatArg::Json => ArtifactFormat::Json,
        }
    }
}

impl TrainCommand {
    /// Execute the train command
    pub async fn run(&self) -> Result<()> {
        info!("Starting training...");
        info!("Data path: {:?}", self.data_path);
        info!("Output directory: {:?}", self.output_dir);

        let config = TrainConfig {
            data_path: self.data_path.clone(),
            output_dir: self.output_dir.clone(),
            test_fraction: self.test_fraction,
            seed: self.seed,
            format: self.format.into(),
        };

        // The pipeline is synchronous CPU work; run it off the reactor.
        let report = tokio::task::spawn_blocking(move || casaval_training::run(&config))
            .await
            .context("Training task panicked")??;

        info!(
            r_squared = report.r_squared,
            mse = report.mse,
            "Training completed successfully"
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
