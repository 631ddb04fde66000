//! Feature schema and encoding contract for the casaval housing model.
//!
//! This crate is the single source of truth for how a raw housing record is
//! turned into the numeric vector the regression model consumes. Both the
//! training pipeline and the serving path go through the types defined here,
//! so the two sides can never drift apart:
//!
//! - [`FeatureSchema`]: the ordered, versioned list of model input columns
//! - [`OceanProximity`]: the 5-valued categorical attribute and its dummy
//!   encoding (reference level `<1H OCEAN` dropped)
//! - [`RawRecord`]: a validated raw record and its encoding into schema order
//!
//! # Example
//!
//! ```
//! use casaval_features::{OceanProximity, RawRecord};
//!
//! let record = RawRecord {
//!     longitude: -120.0,
//!     latitude: 35.0,
//!     housing_median_age: 20.0,
//!     total_rooms: 3000.0,
//!     total_bedrooms: 500.0,
//!     population: 800.0,
//!     households: 400.0,
//!     median_income: 4.5,
//!     ocean_proximity: OceanProximity::Inland,
//! };
//!
//! let vector = record.encode().unwrap();
//! assert_eq!(vector.len(), 12);
//! assert_eq!(vector[8], 1.0); // ocean_proximity_INLAND
//! ```

pub mod encoder;
pub mod error;
pub mod schema;

pub use encoder::RawRecord;
pub use error::{FeatureError, FeatureResult};
pub use schema::{FeatureSchema, OceanProximity, FEATURE_COUNT, FEATURE_NAMES};
