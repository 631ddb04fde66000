//! Numeric core for casaval: matrix primitives, standardization, ordinary
//! least squares, regression metrics, and the seeded train/test split.
//!
//! Everything here is synchronous, deterministic, and free of interior
//! mutability: fitted state is frozen at training time and applied as a pure
//! function afterwards.
//!
//! # Example
//!
//! ```
//! use casaval_model::{LinearRegression, Matrix, StandardScaler};
//!
//! // y = 2x + 1
//! let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let y = vec![3.0, 5.0, 7.0, 9.0];
//!
//! let mut scaler = StandardScaler::new();
//! scaler.fit(&x).unwrap();
//! let x_scaled = scaler.transform(&x).unwrap();
//!
//! let mut model = LinearRegression::new();
//! model.fit(&x_scaled, &y).unwrap();
//! let predictions = model.predict(&x_scaled).unwrap();
//! assert!((predictions[0] - 3.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod matrix;
pub mod metrics;
pub mod regression;
pub mod scaler;
pub mod split;

pub use error::{ModelError, ModelResult};
pub use matrix::Matrix;
pub use metrics::{mean_squared_error, r_squared};
pub use regression::LinearRegression;
pub use scaler::StandardScaler;
pub use split::train_test_split;
