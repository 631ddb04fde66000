//! Seeded train/test splitting.

use crate::error::{ModelError, ModelResult};
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Splits `n_rows` row indices into `(train, test)` partitions.
///
/// Indices are shuffled with a seeded [`rand::rngs::StdRng`], so the same
/// `(n_rows, test_fraction, seed)` triple always yields the same partition
/// across runs. The test partition takes `ceil(n_rows * test_fraction)` rows.
///
/// # Example
///
/// ```
/// use casaval_model::train_test_split;
///
/// let (train, test) = train_test_split(10, 0.2, 42).unwrap();
/// assert_eq!(train.len(), 8);
/// assert_eq!(test.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`ModelError::EmptyInput`] if `n_rows` is zero or the fraction is
/// outside `(0, 1)`.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> ModelResult<(Vec<usize>, Vec<usize>)> {
    if n_rows == 0 {
        return Err(ModelError::EmptyInput("train_test_split"));
    }
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(ModelError::EmptyInput("test_fraction must be in (0, 1)"));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction).ceil() as usize;
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_partition() {
        let (train_a, test_a) = train_test_split(100, 0.2, 42).unwrap();
        let (train_b, test_b) = train_test_split(100, 0.2, 42).unwrap();
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(test_a.len(), 20);
        assert_eq!(train_a.len(), 80);
    }

    #[test]
    fn different_seed_different_partition() {
        let (_, test_a) = train_test_split(100, 0.2, 42).unwrap();
        let (_, test_b) = train_test_split(100, 0.2, 43).unwrap();
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn partitions_are_disjoint_and_cover() {
        let (mut train, mut test) = train_test_split(17, 0.2, 7).unwrap();
        train.append(&mut test);
        train.sort_unstable();
        assert_eq!(train, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_degenerate_arguments() {
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
    }
}
