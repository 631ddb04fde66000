//! Raw-record encoding into schema order.

use crate::error::{FeatureError, FeatureResult};
use crate::schema::{OceanProximity, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// A raw housing record: eight numeric attributes plus the categorical
/// ocean-proximity attribute.
///
/// This is the input shape shared by the training pipeline (one record per
/// CSV row) and the serving path (one record per form submission). Encoding
/// through [`RawRecord::encode`] is the only way a record becomes a model
/// input vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl RawRecord {
    /// Builds a record from the eight numerics and the category's dataset
    /// label (e.g. `"NEAR BAY"`).
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidCategory`] if the label is not one of
    /// the five known categories.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        longitude: f64,
        latitude: f64,
        housing_median_age: f64,
        total_rooms: f64,
        total_bedrooms: f64,
        population: f64,
        households: f64,
        median_income: f64,
        ocean_proximity: &str,
    ) -> FeatureResult<Self> {
        Ok(Self {
            longitude,
            latitude,
            housing_median_age,
            total_rooms,
            total_bedrooms,
            population,
            households,
            median_income,
            ocean_proximity: ocean_proximity.parse()?,
        })
    }

    /// Encodes the record into the 12-element vector defined by
    /// [`FEATURE_NAMES`](crate::schema::FEATURE_NAMES), in exact schema order.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidInput`] naming the first non-finite
    /// numeric attribute.
    pub fn encode(&self) -> FeatureResult<[f64; FEATURE_COUNT]> {
        let numerics: [(&'static str, f64); 8] = [
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("housing_median_age", self.housing_median_age),
            ("total_rooms", self.total_rooms),
            ("total_bedrooms", self.total_bedrooms),
            ("population", self.population),
            ("households", self.households),
            ("median_income", self.median_income),
        ];

        let mut vector = [0.0; FEATURE_COUNT];
        for (i, (field, value)) in numerics.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(FeatureError::invalid_input(field, value));
            }
            vector[i] = value;
        }

        vector[8..].copy_from_slice(&self.ocean_proximity.one_hot());
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawRecord {
        RawRecord {
            longitude: -120.0,
            latitude: 35.0,
            housing_median_age: 20.0,
            total_rooms: 3000.0,
            total_bedrooms: 500.0,
            population: 800.0,
            households: 400.0,
            median_income: 4.5,
            ocean_proximity: OceanProximity::Inland,
        }
    }

    #[test]
    fn encodes_in_schema_order() {
        let vector = sample().encode().unwrap();
        assert_eq!(
            vector,
            [-120.0, 35.0, 20.0, 3000.0, 500.0, 800.0, 400.0, 4.5, 1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn reference_category_encodes_all_zero_indicators() {
        let mut record = sample();
        record.ocean_proximity = OceanProximity::OneHourOcean;
        let vector = record.encode().unwrap();
        assert_eq!(&vector[8..], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_finite_numeric_is_rejected_with_field_name() {
        let mut record = sample();
        record.median_income = f64::NAN;
        let err = record.encode().unwrap_err();
        match err {
            FeatureError::InvalidInput { field, .. } => assert_eq!(field, "median_income"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_fields_rejects_unknown_category() {
        let err = RawRecord::from_fields(
            -120.0, 35.0, 20.0, 3000.0, 500.0, 800.0, 400.0, 4.5, "BEACHFRONT",
        )
        .unwrap_err();
        assert_eq!(err, FeatureError::invalid_category("BEACHFRONT"));
    }
}
