//! One-shot training pipeline for the casaval housing model.
//!
//! A linear sequence with no suspension points beyond file I/O:
//! load → impute → encode → split → scale → fit → evaluate → persist.
//! The output is two artifacts (scaler and model) plus a [`TrainReport`].

pub mod error;
pub mod pipeline;

pub use error::{TrainingError, TrainingResult};
pub use pipeline::{run, ArtifactFormat, TrainConfig, TrainReport};
