//! End-to-end training on a synthetic CSV: the pipeline must recover a known
//! linear relationship and produce artifacts the serving side can load.

use casaval_artifact::{ArtifactReader, BincodeSerializer, ModelArtifact, ScalerArtifact};
use casaval_training::{run, ArtifactFormat, TrainConfig};
use std::io::Write;

const HEADER: &str = "longitude,latitude,housing_median_age,total_rooms,total_bedrooms,population,households,median_income,median_house_value,ocean_proximity";

/// Synthetic dataset where price is an exact linear function of the features:
/// price = 50_000 * median_income + 100 * total_rooms + 80_000.
fn write_dataset(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("housing.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();

    let categories = ["<1H OCEAN", "INLAND", "ISLAND", "NEAR BAY", "NEAR OCEAN"];
    for i in 0..100 {
        let income = 1.0 + (i % 13) as f64 * 0.5;
        let rooms = 500.0 + (i % 29) as f64 * 100.0;
        let price = 50_000.0 * income + 100.0 * rooms + 80_000.0;
        // Every tenth row has a missing total_bedrooms.
        let bedrooms = if i % 10 == 0 {
            String::new()
        } else {
            format!("{}", 100.0 + (i % 7) as f64 * 20.0)
        };
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{}",
            -124.0 + (i % 11) as f64 * 0.5,
            33.0 + (i % 9) as f64 * 0.5,
            5.0 + (i % 40) as f64,
            rooms,
            bedrooms,
            600.0 + (i % 17) as f64 * 50.0,
            200.0 + (i % 19) as f64 * 30.0,
            income,
            price,
            categories[i % categories.len()],
        )
        .unwrap();
    }
    path
}

#[test]
fn recovers_linear_relationship_and_persists_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_dataset(dir.path());
    let config = TrainConfig::new(&data_path, dir.path().join("artifacts"));

    let report = run(&config).unwrap();

    assert_eq!(report.total_rows, 100);
    assert_eq!(report.imputed_rows, 10);
    assert_eq!(report.test_rows, 20);
    assert_eq!(report.train_rows, 80);
    // The target is exactly linear in two features, so the fit is near-perfect.
    assert!(report.r_squared > 0.999, "r2 = {}", report.r_squared);

    let reader = ArtifactReader::new(BincodeSerializer::new());
    let scaler: ScalerArtifact = reader.read_from_file(&report.scaler_path).unwrap();
    let model: ModelArtifact = reader.read_from_file(&report.model_path).unwrap();
    scaler.validate().unwrap();
    model.validate().unwrap();
}

#[test]
fn repeated_runs_are_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_dataset(dir.path());

    let report_a = run(&TrainConfig::new(&data_path, dir.path().join("a"))).unwrap();
    let report_b = run(&TrainConfig::new(&data_path, dir.path().join("b"))).unwrap();

    // Same seed, same data: identical split, fit, and sample prediction.
    assert_eq!(report_a.r_squared.to_bits(), report_b.r_squared.to_bits());
    assert_eq!(report_a.mse.to_bits(), report_b.mse.to_bits());
    assert_eq!(
        report_a.sample_prediction.to_bits(),
        report_b.sample_prediction.to_bits()
    );

    let reader = ArtifactReader::new(BincodeSerializer::new());
    let model_a: ModelArtifact = reader.read_from_file(&report_a.model_path).unwrap();
    let model_b: ModelArtifact = reader.read_from_file(&report_b.model_path).unwrap();
    assert_eq!(model_a, model_b);
}

#[test]
fn json_artifacts_round_trip_through_the_reader() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_dataset(dir.path());
    let mut config = TrainConfig::new(&data_path, dir.path().join("artifacts"));
    config.format = ArtifactFormat::Json;

    let report = run(&config).unwrap();
    assert!(report.scaler_path.extension().is_some_and(|e| e == "json"));

    let reader = casaval_artifact::ArtifactReader::new(casaval_artifact::JsonSerializer::new());
    let scaler: ScalerArtifact = reader.read_from_file(&report.scaler_path).unwrap();
    let restored = scaler.into_scaler().unwrap();
    assert!(restored.is_fitted());
}
