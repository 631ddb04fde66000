//! Housing dataset loading and read-only views for casaval.
//!
//! The training phase consumes [`HousingDataset`] to build the feature matrix
//! and target vector; the serving phase consumes the [`stats`] views to render
//! its chart panels (preview, summaries, histogram, correlation, scatter,
//! map). Both go through the shared encoder in `casaval-features`, so the
//! dataset crate adds no encoding logic of its own.

pub mod dataset;
pub mod error;
pub mod stats;

pub use dataset::{HousingDataset, HousingRow};
pub use error::{DataError, DataResult};
pub use stats::{ColumnSummary, CorrelationMatrix, Histogram, MapPoint, ScatterPoint};
