//! Per-column standardization with frozen training-time statistics.

use crate::error::{ModelError, ModelResult};
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// Standardizes features to zero mean and unit variance.
///
/// Statistics are computed once by [`fit`](StandardScaler::fit) and applied
/// as a pure function afterwards; [`transform`](StandardScaler::transform)
/// never mutates the fitted state and must never be re-fit at inference time.
///
/// Columns with zero training-time variance are passed through as exactly
/// `0.0` rather than dividing by zero.
///
/// # Example
///
/// ```
/// use casaval_model::{Matrix, StandardScaler};
///
/// let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
/// let mut scaler = StandardScaler::new();
/// scaler.fit(&x).unwrap();
///
/// let scaled = scaler.transform(&x).unwrap();
/// assert!(scaled.get(1, 0).abs() < 1e-12); // the mean maps to 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Creates an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a fitted scaler from persisted statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if the two vectors have
    /// different lengths.
    pub fn from_state(means: Vec<f64>, stds: Vec<f64>) -> ModelResult<Self> {
        if means.len() != stds.len() {
            return Err(ModelError::dimension_mismatch(means.len(), stds.len()));
        }
        Ok(Self { means, stds })
    }

    /// Per-column means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-column standard deviations (population, matching the reference).
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Returns true once statistics have been computed.
    pub fn is_fitted(&self) -> bool {
        !self.means.is_empty()
    }

    /// Computes per-column mean and standard deviation over `x`.
    ///
    /// Deterministic given identical input.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyInput`] if `x` has no rows.
    pub fn fit(&mut self, x: &Matrix) -> ModelResult<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows == 0 {
            return Err(ModelError::EmptyInput("StandardScaler::fit"));
        }

        let mut means = vec![0.0; n_cols];
        for i in 0..n_rows {
            for (j, mean) in means.iter_mut().enumerate() {
                *mean += x.get(i, j);
            }
        }
        for mean in &mut means {
            *mean /= n_rows as f64;
        }

        let mut stds = vec![0.0; n_cols];
        for i in 0..n_rows {
            for (j, var) in stds.iter_mut().enumerate() {
                let d = x.get(i, j) - means[j];
                *var += d * d;
            }
        }
        for var in &mut stds {
            *var = (*var / n_rows as f64).sqrt();
        }

        self.means = means;
        self.stds = stds;
        Ok(())
    }

    /// Transforms each value as `(x - mean) / std`, column by column.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFitted`] before [`fit`](Self::fit), or
    /// [`ModelError::DimensionMismatch`] if `x` has a different width than
    /// the fitted state.
    pub fn transform(&self, x: &Matrix) -> ModelResult<Matrix> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        let (n_rows, n_cols) = x.shape();
        if n_cols != self.means.len() {
            return Err(ModelError::dimension_mismatch(self.means.len(), n_cols));
        }

        let mut out = Matrix::zeros(n_rows, n_cols);
        for i in 0..n_rows {
            for j in 0..n_cols {
                out.set(i, j, self.scale_one(x.get(i, j), j));
            }
        }
        Ok(out)
    }

    /// Transforms a single vector in schema order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`transform`](Self::transform).
    pub fn transform_vector(&self, v: &[f64]) -> ModelResult<Vec<f64>> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        if v.len() != self.means.len() {
            return Err(ModelError::dimension_mismatch(self.means.len(), v.len()));
        }
        Ok(v.iter()
            .enumerate()
            .map(|(j, &x)| self.scale_one(x, j))
            .collect())
    }

    // Zero-variance columns map to 0 by policy.
    fn scale_one(&self, x: f64, col: usize) -> f64 {
        if self.stds[col] == 0.0 {
            0.0
        } else {
            (x - self.means[col]) / self.stds[col]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_transform_yields_zero_mean_unit_std() {
        let x = Matrix::from_vec(4, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0]).unwrap();
        let mut scaler = StandardScaler::new();
        scaler.fit(&x).unwrap();
        let scaled = scaler.transform(&x).unwrap();

        for j in 0..2 {
            let mean: f64 = (0..4).map(|i| scaled.get(i, j)).sum::<f64>() / 4.0;
            let var: f64 = (0..4).map(|i| (scaled.get(i, j) - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-12, "column {j} mean {mean}");
            assert!((var.sqrt() - 1.0).abs() < 1e-12, "column {j} std {}", var.sqrt());
        }
    }

    #[test]
    fn zero_variance_column_becomes_exactly_zero() {
        let x = Matrix::from_vec(3, 2, vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0]).unwrap();
        let mut scaler = StandardScaler::new();
        scaler.fit(&x).unwrap();
        let scaled = scaler.transform(&x).unwrap();
        for i in 0..3 {
            assert_eq!(scaled.get(i, 0), 0.0);
        }
    }

    #[test]
    fn transform_rejects_width_mismatch() {
        let x = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut scaler = StandardScaler::new();
        scaler.fit(&x).unwrap();

        let wide = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let err = scaler.transform(&wide).unwrap_err();
        assert_eq!(err, ModelError::dimension_mismatch(2, 3));
        assert!(scaler.transform_vector(&[1.0]).is_err());
    }

    #[test]
    fn transform_before_fit_fails() {
        let scaler = StandardScaler::new();
        assert_eq!(
            scaler.transform_vector(&[1.0]).unwrap_err(),
            ModelError::NotFitted
        );
    }

    #[test]
    fn from_state_round_trips_accessors() {
        let scaler = StandardScaler::from_state(vec![1.0, 2.0], vec![0.5, 0.0]).unwrap();
        assert_eq!(scaler.means(), &[1.0, 2.0]);
        assert_eq!(scaler.stds(), &[0.5, 0.0]);
        // Zero-std column still transforms without error.
        assert_eq!(scaler.transform_vector(&[2.0, 7.0]).unwrap(), vec![2.0, 0.0]);
    }
}
