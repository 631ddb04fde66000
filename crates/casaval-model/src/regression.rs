//! Ordinary least squares linear regression.

use crate::error::{ModelError, ModelResult};
use crate::matrix::Matrix;
use crate::metrics::r_squared;
use serde::{Deserialize, Serialize};

/// Ordinary least squares via normal equations.
///
/// Solves `β = (XᵀX)⁻¹ Xᵀy` with a Cholesky factorization. When the Gram
/// matrix is not positive definite (rank-deficient design), the fit degrades
/// gracefully to the least-norm solution through a spectral pseudoinverse
/// instead of failing.
///
/// The fit is closed-form and fully deterministic; `predict` is a pure
/// function of the frozen coefficients.
///
/// # Example
///
/// ```
/// use casaval_model::{LinearRegression, Matrix};
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = vec![3.0, 5.0, 7.0, 9.0]; // y = 2x + 1
///
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).unwrap();
/// assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
/// assert!((model.intercept() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Creates an unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a fitted model from persisted parameters.
    pub fn from_parameters(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Fitted coefficients, one per feature column.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns true once the model has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.coefficients.is_empty()
    }

    /// Fits coefficients and intercept minimizing the sum of squared
    /// residuals.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SampleCountMismatch`] if `x` and `y` disagree on
    /// the sample count, or [`ModelError::EmptyInput`] if there are no rows.
    pub fn fit(&mut self, x: &Matrix, y: &[f64]) -> ModelResult<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows == 0 {
            return Err(ModelError::EmptyInput("LinearRegression::fit"));
        }
        if n_rows != y.len() {
            return Err(ModelError::SampleCountMismatch {
                x_rows: n_rows,
                y_len: y.len(),
            });
        }

        // Augment with a leading column of ones for the intercept.
        let mut aug = Matrix::zeros(n_rows, n_cols + 1);
        for i in 0..n_rows {
            aug.set(i, 0, 1.0);
            for j in 0..n_cols {
                aug.set(i, j + 1, x.get(i, j));
            }
        }

        let gram = aug.transpose().matmul(&aug)?;
        let rhs = aug.transpose().matvec(y)?;

        let beta = match cholesky_solve(&gram, &rhs) {
            Some(beta) => beta,
            // Rank-deficient design: least-norm solution, no hard failure.
            None => pseudoinverse_solve(&gram, &rhs),
        };

        self.intercept = beta[0];
        self.coefficients = beta[1..].to_vec();
        Ok(())
    }

    /// Predicts `ŷ = Xw + b`, one estimate per row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFitted`] before fit, or
    /// [`ModelError::DimensionMismatch`] on a width mismatch.
    pub fn predict(&self, x: &Matrix) -> ModelResult<Vec<f64>> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        let mut out = x.matvec(&self.coefficients)?;
        for y in &mut out {
            *y += self.intercept;
        }
        Ok(out)
    }

    /// Predicts a single estimate for one feature vector.
    ///
    /// # Errors
    ///
    /// Same conditions as [`predict`](Self::predict).
    pub fn predict_one(&self, v: &[f64]) -> ModelResult<f64> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted);
        }
        if v.len() != self.coefficients.len() {
            return Err(ModelError::dimension_mismatch(
                self.coefficients.len(),
                v.len(),
            ));
        }
        let dot: f64 = v.iter().zip(&self.coefficients).map(|(a, b)| a * b).sum();
        Ok(dot + self.intercept)
    }

    /// R² of the model on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`predict`](Self::predict).
    pub fn score(&self, x: &Matrix, y: &[f64]) -> ModelResult<f64> {
        let predictions = self.predict(x)?;
        Ok(r_squared(&predictions, y))
    }
}

/// Solves `A x = b` for symmetric positive definite `A` via Cholesky.
///
/// Returns `None` if the factorization encounters a non-positive pivot, which
/// signals a rank-deficient (or numerically indefinite) matrix.
fn cholesky_solve(a: &Matrix, b: &[f64]) -> Option<Vec<f64>> {
    let n = a.n_rows();
    let mut l = vec![0.0; n * n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            if i == j {
                for k in 0..j {
                    sum += l[j * n + k] * l[j * n + k];
                }
                let diag = a.get(j, j) - sum;
                // A pivot this small means the matrix is singular to working
                // precision, not just ill-conditioned.
                if diag <= 1e-10 * a.get(j, j).abs().max(1.0) {
                    return None;
                }
                l[j * n + j] = diag.sqrt();
            } else {
                for k in 0..j {
                    sum += l[i * n + k] * l[j * n + k];
                }
                l[i * n + j] = (a.get(i, j) - sum) / l[j * n + j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[i * n + j] * y[j];
        }
        y[i] = (b[i] - sum) / l[i * n + i];
    }

    // Backward substitution: Lᵀ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[j * n + i] * x[j];
        }
        x[i] = (y[i] - sum) / l[i * n + i];
    }

    Some(x)
}

/// Least-norm solve of `A x = b` for symmetric PSD `A` via the spectral
/// pseudoinverse: `x = V diag(1/λᵢ) Vᵀ b` with near-zero eigenvalues dropped.
fn pseudoinverse_solve(a: &Matrix, b: &[f64]) -> Vec<f64> {
    let (eigenvalues, eigenvectors) = jacobi_eigen(a);
    let n = a.n_rows();

    let max_abs = eigenvalues.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let tol = max_abs * n as f64 * f64::EPSILON;

    // Vᵀ b
    let mut vt_b = vec![0.0; n];
    for (j, out) in vt_b.iter_mut().enumerate() {
        for i in 0..n {
            *out += eigenvectors.get(i, j) * b[i];
        }
    }
    // Scale by 1/λ on the numerically nonzero spectrum.
    for (j, value) in vt_b.iter_mut().enumerate() {
        if eigenvalues[j].abs() > tol {
            *value /= eigenvalues[j];
        } else {
            *value = 0.0;
        }
    }
    // V (scaled)
    let mut x = vec![0.0; n];
    for (i, out) in x.iter_mut().enumerate() {
        for j in 0..n {
            *out += eigenvectors.get(i, j) * vt_b[j];
        }
    }
    x
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns `(eigenvalues, V)` with `A = V diag(λ) Vᵀ`. The matrices here are
/// at most 13x13, so the classic O(n³)-per-sweep iteration is plenty.
fn jacobi_eigen(a: &Matrix) -> (Vec<f64>, Matrix) {
    let n = a.n_rows();
    let mut m = a.clone();
    let mut v = Matrix::zeros(n, n);
    for i in 0..n {
        v.set(i, i, 1.0);
    }

    for _sweep in 0..100 {
        let mut off_diag = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                off_diag += m.get(i, j) * m.get(i, j);
            }
        }
        if off_diag.sqrt() < 1e-14 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = m.get(p, q);
                if apq.abs() < 1e-300 {
                    continue;
                }
                let app = m.get(p, p);
                let aqq = m.get(q, q);
                let theta = (aqq - app) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let mkp = m.get(k, p);
                    let mkq = m.get(k, q);
                    m.set(k, p, c * mkp - s * mkq);
                    m.set(k, q, s * mkp + c * mkq);
                }
                for k in 0..n {
                    let mpk = m.get(p, k);
                    let mqk = m.get(q, k);
                    m.set(p, k, c * mpk - s * mqk);
                    m.set(q, k, s * mpk + c * mqk);
                }
                for k in 0..n {
                    let vkp = v.get(k, p);
                    let vkq = v.get(k, q);
                    v.set(k, p, c * vkp - s * vkq);
                    v.set(k, q, s * vkp + c * vkq);
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| m.get(i, i)).collect();
    (eigenvalues, v)
}
