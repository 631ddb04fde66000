//! The versioned feature schema and the ocean-proximity dummy encoding.
//!
//! Training-time and inference-time vectors must have identical length, order,
//! and per-position meaning. Nothing in the numeric stack enforces that, so
//! the schema is an explicit contract: artifacts embed it when saved and are
//! checked against it when loaded.

use crate::error::{FeatureError, FeatureResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 12;

/// Model input columns, in the exact order the model was trained on.
///
/// The first eight are the raw numeric attributes; the last four are the
/// dummy-encoded `ocean_proximity` indicators with `<1H OCEAN` as the dropped
/// reference level.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "ocean_proximity_INLAND",
    "ocean_proximity_ISLAND",
    "ocean_proximity_NEAR_BAY",
    "ocean_proximity_NEAR_OCEAN",
];

/// Schema version. Bump whenever [`FEATURE_NAMES`] changes shape or meaning.
pub const SCHEMA_VERSION: u32 = 1;

/// The ordered, versioned list of feature names the model consumes.
///
/// # Example
///
/// ```
/// use casaval_features::FeatureSchema;
///
/// let schema = FeatureSchema::current();
/// assert_eq!(schema.len(), 12);
/// assert_eq!(schema.names()[0], "longitude");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Schema version for drift detection across persisted artifacts.
    version: u32,
    /// Column names in model order.
    names: Vec<String>,
}

impl FeatureSchema {
    /// Returns the schema this build of the code encodes against.
    pub fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Schema version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Column names in model order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if `other` is byte-for-byte the same contract.
    pub fn matches(&self, other: &FeatureSchema) -> bool {
        self.version == other.version && self.names == other.names
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::current()
    }
}

/// The five-valued `ocean_proximity` categorical attribute.
///
/// Encoded as four indicator columns with `<1H OCEAN` dropped as the
/// reference level: a valid encoding has at most one indicator set, and the
/// all-zero pattern means the reference category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OceanProximity {
    /// `<1H OCEAN` — the dropped reference level.
    #[serde(rename = "<1H OCEAN")]
    OneHourOcean,
    /// `INLAND`
    Inland,
    /// `ISLAND`
    Island,
    /// `NEAR BAY`
    #[serde(rename = "NEAR BAY")]
    NearBay,
    /// `NEAR OCEAN`
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    /// All five categories, in dataset order.
    pub const ALL: [OceanProximity; 5] = [
        OceanProximity::OneHourOcean,
        OceanProximity::Inland,
        OceanProximity::Island,
        OceanProximity::NearBay,
        OceanProximity::NearOcean,
    ];

    /// The exact label used in the source dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            OceanProximity::OneHourOcean => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::Island => "ISLAND",
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::NearOcean => "NEAR OCEAN",
        }
    }

    /// Dummy-encodes the category into the four indicator columns
    /// `[INLAND, ISLAND, NEAR_BAY, NEAR_OCEAN]`.
    ///
    /// The reference level `<1H OCEAN` encodes as all zeros.
    pub fn one_hot(&self) -> [f64; 4] {
        match self {
            OceanProximity::OneHourOcean => [0.0, 0.0, 0.0, 0.0],
            OceanProximity::Inland => [1.0, 0.0, 0.0, 0.0],
            OceanProximity::Island => [0.0, 1.0, 0.0, 0.0],
            OceanProximity::NearBay => [0.0, 0.0, 1.0, 0.0],
            OceanProximity::NearOcean => [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Decodes a four-column indicator pattern back into a category.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidOneHot`] if the pattern is not one of
    /// the five valid encodings (e.g. two indicators set).
    pub fn from_one_hot(indicators: &[f64; 4]) -> FeatureResult<Self> {
        for category in Self::ALL {
            if category.one_hot() == *indicators {
                return Ok(category);
            }
        }
        Err(FeatureError::InvalidOneHot(indicators.to_vec()))
    }
}

impl FromStr for OceanProximity {
    type Err = FeatureError;

    fn from_str(s: &str) -> FeatureResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FeatureError::invalid_category(s))
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_twelve_ordered_columns() {
        let schema = FeatureSchema::current();
        assert_eq!(schema.len(), FEATURE_COUNT);
        assert_eq!(schema.names()[0], "longitude");
        assert_eq!(schema.names()[7], "median_income");
        assert_eq!(schema.names()[11], "ocean_proximity_NEAR_OCEAN");
    }

    #[test]
    fn schema_matches_itself_and_rejects_drift() {
        let a = FeatureSchema::current();
        let b = FeatureSchema::current();
        assert!(a.matches(&b));

        let mut drifted = FeatureSchema::current();
        drifted.names.swap(0, 1);
        assert!(!a.matches(&drifted));
    }

    #[test]
    fn one_hot_round_trips_all_categories() {
        for category in OceanProximity::ALL {
            let encoded = category.one_hot();
            let set: usize = encoded.iter().filter(|&&v| v == 1.0).count();
            assert!(set <= 1, "{category}: more than one indicator set");
            let decoded = OceanProximity::from_one_hot(&encoded).unwrap();
            assert_eq!(decoded, category);
        }
    }

    #[test]
    fn reference_level_is_all_zeros() {
        assert_eq!(OceanProximity::OneHourOcean.one_hot(), [0.0; 4]);
    }

    #[test]
    fn invalid_one_hot_pattern_is_rejected() {
        let err = OceanProximity::from_one_hot(&[1.0, 1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidOneHot(_)));
    }

    #[test]
    fn parse_accepts_exact_dataset_labels() {
        for category in OceanProximity::ALL {
            let parsed: OceanProximity = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let err = "OCEANFRONT".parse::<OceanProximity>().unwrap_err();
        assert_eq!(err, FeatureError::invalid_category("OCEANFRONT"));
    }
}
