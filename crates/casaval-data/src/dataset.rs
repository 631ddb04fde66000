//! CSV loading and feature-matrix extraction.

use crate::error::{DataError, DataResult};
use casaval_model::Matrix;
use casaval_features::RawRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the raw housing CSV.
///
/// `total_bedrooms` is nullable in the source data; every other column is
/// required. `median_house_value` is the regression target and is never part
/// of the feature matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRow {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: Option<f64>,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub median_house_value: f64,
    pub ocean_proximity: String,
}

/// The loaded housing dataset.
///
/// # Example
///
/// ```no_run
/// use casaval_data::HousingDataset;
///
/// let mut dataset = HousingDataset::from_csv_path("housing.csv").unwrap();
/// let imputed = dataset.impute_total_bedrooms().unwrap();
/// println!("imputed {imputed} rows");
/// let (x, y) = dataset.to_matrix().unwrap();
/// assert_eq!(x.n_cols(), 12);
/// assert_eq!(x.n_rows(), y.len());
/// ```
#[derive(Debug, Clone)]
pub struct HousingDataset {
    rows: Vec<HousingRow>,
}

impl HousingDataset {
    /// Wraps already-parsed rows.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Empty`] if `rows` is empty.
    pub fn new(rows: Vec<HousingRow>) -> DataResult<Self> {
        if rows.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { rows })
    }

    /// Reads the dataset from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the file cannot be opened,
    /// [`DataError::Csv`] on a malformed row, or [`DataError::Empty`] for a
    /// header-only file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<HousingRow>, _>>()?;
        Self::new(rows)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: construction rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw rows.
    pub fn rows(&self) -> &[HousingRow] {
        &self.rows
    }

    /// Number of rows with a missing `total_bedrooms`.
    pub fn null_total_bedrooms(&self) -> usize {
        self.rows.iter().filter(|r| r.total_bedrooms.is_none()).count()
    }

    /// Fills missing `total_bedrooms` with the column mean and returns how
    /// many rows were imputed.
    ///
    /// The mean is computed over the entire dataset before any train/test
    /// split, matching the reference behavior exactly (the reference computes
    /// imputation statistics pre-split; see DESIGN.md).
    pub fn impute_total_bedrooms(&mut self) -> DataResult<usize> {
        let present: Vec<f64> = self.rows.iter().filter_map(|r| r.total_bedrooms).collect();
        if present.is_empty() {
            return Err(DataError::MissingValue {
                row: 0,
                field: "total_bedrooms",
            });
        }
        let mean = present.iter().sum::<f64>() / present.len() as f64;

        let mut imputed = 0;
        for row in &mut self.rows {
            if row.total_bedrooms.is_none() {
                row.total_bedrooms = Some(mean);
                imputed += 1;
            }
        }
        Ok(imputed)
    }

    /// Encodes every row through the shared feature encoder, returning the
    /// feature matrix (schema order) and the target vector.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingValue`] if a row still has no
    /// `total_bedrooms` (call [`impute_total_bedrooms`](Self::impute_total_bedrooms)
    /// first), or [`DataError::Encoding`] if a row fails validation.
    pub fn to_matrix(&self) -> DataResult<(Matrix, Vec<f64>)> {
        let mut features = Vec::with_capacity(self.rows.len());
        let mut targets = Vec::with_capacity(self.rows.len());

        for (i, row) in self.rows.iter().enumerate() {
            let total_bedrooms = row.total_bedrooms.ok_or(DataError::MissingValue {
                row: i,
                field: "total_bedrooms",
            })?;
            let record = RawRecord::from_fields(
                row.longitude,
                row.latitude,
                row.housing_median_age,
                row.total_rooms,
                total_bedrooms,
                row.population,
                row.households,
                row.median_income,
                &row.ocean_proximity,
            )
            .map_err(|source| DataError::Encoding { row: i, source })?;
            let vector = record
                .encode()
                .map_err(|source| DataError::Encoding { row: i, source })?;
            features.push(vector.to_vec());
            targets.push(row.median_house_value);
        }

        let matrix = Matrix::from_rows(&features)?;
        Ok((matrix, targets))
    }
}
