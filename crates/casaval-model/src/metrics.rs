//! Regression quality metrics.

/// Coefficient of determination.
///
/// `R² = 1 - SS_res / SS_tot`, the proportion of target variance explained
/// by the predictions. Returns 0.0 for a constant target (degenerate case).
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn r_squared(y_pred: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "length mismatch");
    if y_true.is_empty() {
        return 0.0;
    }

    let mean: f64 = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = y_pred
        .iter()
        .zip(y_true)
        .map(|(p, y)| (y - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Mean squared error between predictions and targets.
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn mean_squared_error(y_pred: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "length mismatch");
    if y_true.is_empty() {
        return 0.0;
    }
    y_pred
        .iter()
        .zip(y_true)
        .map(|(p, y)| (p - y).powi(2))
        .sum::<f64>()
        / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_score_one() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared(&y, &y), 1.0);
        assert_eq!(mean_squared_error(&y, &y), 0.0);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [2.0, 2.0, 2.0];
        assert!(r_squared(&y_pred, &y_true).abs() < 1e-12);
    }

    #[test]
    fn mse_matches_hand_computation() {
        let y_true = [1.0, 2.0];
        let y_pred = [2.0, 4.0];
        // ((1)^2 + (2)^2) / 2
        assert_eq!(mean_squared_error(&y_pred, &y_true), 2.5);
    }

    #[test]
    fn constant_target_yields_zero_r2() {
        assert_eq!(r_squared(&[5.0, 5.0], &[5.0, 5.0]), 0.0);
    }
}
