//! Read-only dataset views for the serving chart panels.
//!
//! These are faithful renderings of existing columns and carry no contract
//! beyond that; the prediction path never goes through this module.

use crate::dataset::{HousingDataset, HousingRow};
use serde::Serialize;

/// Numeric columns the summary and correlation views cover, in CSV order.
const NUMERIC_COLUMNS: [&str; 9] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
];

fn numeric_value(row: &HousingRow, column: &str) -> Option<f64> {
    match column {
        "longitude" => Some(row.longitude),
        "latitude" => Some(row.latitude),
        "housing_median_age" => Some(row.housing_median_age),
        "total_rooms" => Some(row.total_rooms),
        "total_bedrooms" => row.total_bedrooms,
        "population" => Some(row.population),
        "households" => Some(row.households),
        "median_income" => Some(row.median_income),
        "median_house_value" => Some(row.median_house_value),
        _ => None,
    }
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Non-null count.
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// A binned distribution of one column.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// `bins + 1` edges; bin `i` covers `[edges[i], edges[i + 1])`.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Pearson correlation over the numeric columns.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// Row-major `names.len() x names.len()` values in `[-1, 1]`.
    pub values: Vec<Vec<f64>>,
}

/// One point of the population-vs-price scatter view.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub population: f64,
    pub median_house_value: f64,
}

/// One point of the geographic map view.
#[derive(Debug, Clone, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Per-column summaries over all numeric columns (nulls skipped).
pub fn summaries(dataset: &HousingDataset) -> Vec<ColumnSummary> {
    NUMERIC_COLUMNS
        .iter()
        .map(|&name| {
            let values: Vec<f64> = dataset
                .rows()
                .iter()
                .filter_map(|r| numeric_value(r, name))
                .collect();
            let count = values.len();
            let mean = values.iter().sum::<f64>() / count.max(1) as f64;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count.max(1) as f64;
            ColumnSummary {
                name: name.to_string(),
                count,
                mean,
                std: var.sqrt(),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            }
        })
        .collect()
}

/// Equal-width histogram of `median_house_value`.
pub fn price_histogram(dataset: &HousingDataset, bins: usize) -> Histogram {
    let values: Vec<f64> = dataset.rows().iter().map(|r| r.median_house_value).collect();
    let bins = bins.max(1);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        let mut bin = ((v - min) / width) as usize;
        if bin >= bins {
            bin = bins - 1; // max lands in the last bin
        }
        counts[bin] += 1;
    }
    Histogram { edges, counts }
}

/// Pairwise Pearson correlation over the numeric columns, nulls skipped
/// pairwise. A constant column correlates 0 with everything but itself.
pub fn correlation_matrix(dataset: &HousingDataset) -> CorrelationMatrix {
    let n = NUMERIC_COLUMNS.len();
    let mut values = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = dataset
                .rows()
                .iter()
                .filter_map(|r| {
                    Some((
                        numeric_value(r, NUMERIC_COLUMNS[i])?,
                        numeric_value(r, NUMERIC_COLUMNS[j])?,
                    ))
                })
                .collect();
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
        values[i][i] = 1.0;
    }

    CorrelationMatrix {
        names: NUMERIC_COLUMNS.iter().map(|s| s.to_string()).collect(),
        values,
    }
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Population-vs-price points, evenly subsampled down to `max_points`.
pub fn scatter_sample(dataset: &HousingDataset, max_points: usize) -> Vec<ScatterPoint> {
    subsample(dataset.rows(), max_points)
        .map(|r| ScatterPoint {
            population: r.population,
            median_house_value: r.median_house_value,
        })
        .collect()
}

/// Lat/lon points for the map view, evenly subsampled down to `max_points`.
pub fn map_points(dataset: &HousingDataset, max_points: usize) -> Vec<MapPoint> {
    subsample(dataset.rows(), max_points)
        .map(|r| MapPoint {
            lat: r.latitude,
            lon: r.longitude,
        })
        .collect()
}

/// The first `n` rows, for the dataset-preview panel.
pub fn preview(dataset: &HousingDataset, n: usize) -> &[HousingRow] {
    &dataset.rows()[..n.min(dataset.len())]
}

fn subsample(rows: &[HousingRow], max_points: usize) -> impl Iterator<Item = &HousingRow> {
    let step = (rows.len() / max_points.max(1)).max(1);
    rows.iter().step_by(step).take(max_points.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::HousingDataset;

    fn dataset() -> HousingDataset {
        let rows = (0..10)
            .map(|i| HousingRow {
                longitude: -120.0 - i as f64,
                latitude: 35.0 + i as f64,
                housing_median_age: 20.0,
                total_rooms: 1000.0 + 100.0 * i as f64,
                total_bedrooms: if i == 3 { None } else { Some(200.0 + i as f64) },
                population: 800.0 + 10.0 * i as f64,
                households: 300.0,
                median_income: 4.0 + 0.1 * i as f64,
                median_house_value: 100_000.0 + 10_000.0 * i as f64,
                ocean_proximity: "INLAND".to_string(),
            })
            .collect();
        HousingDataset::new(rows).unwrap()
    }

    #[test]
    fn summaries_skip_nulls() {
        let s = summaries(&dataset());
        let bedrooms = s.iter().find(|c| c.name == "total_bedrooms").unwrap();
        assert_eq!(bedrooms.count, 9);
        let age = s.iter().find(|c| c.name == "housing_median_age").unwrap();
        assert_eq!(age.mean, 20.0);
        assert_eq!(age.std, 0.0);
    }

    #[test]
    fn histogram_counts_every_row() {
        let h = price_histogram(&dataset(), 5);
        assert_eq!(h.edges.len(), 6);
        assert_eq!(h.counts.iter().sum::<usize>(), 10);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let c = correlation_matrix(&dataset());
        let n = c.names.len();
        for i in 0..n {
            assert_eq!(c.values[i][i], 1.0);
            for j in 0..n {
                assert!((c.values[i][j] - c.values[j][i]).abs() < 1e-12);
            }
        }
        // Perfectly correlated by construction.
        let rooms = c.names.iter().position(|n| n == "total_rooms").unwrap();
        let price = c.names.iter().position(|n| n == "median_house_value").unwrap();
        assert!((c.values[rooms][price] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_column_correlates_zero() {
        let c = correlation_matrix(&dataset());
        let households = c.names.iter().position(|n| n == "households").unwrap();
        let price = c.names.iter().position(|n| n == "median_house_value").unwrap();
        assert_eq!(c.values[households][price], 0.0);
    }

    #[test]
    fn views_respect_max_points() {
        let d = dataset();
        assert_eq!(scatter_sample(&d, 4).len(), 4);
        assert_eq!(map_points(&d, 100).len(), 10);
        assert_eq!(preview(&d, 5).len(), 5);
        assert_eq!(preview(&d, 50).len(), 10);
    }
}
