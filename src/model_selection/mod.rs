//! Train/test splitting with reproducible shuffling.
//!
//! The pipeline splits at the *index* level before any vectorizer is
//! fitted, so vocabulary and document frequencies can never leak from
//! the held-out statements. [`train_test_split`] is the matrix-level
//! convenience over the same shuffled indices.
//!
//! # Example
//!
//! ```
//! use sentir::model_selection::train_test_split_indices;
//!
//! let (train, test) = train_test_split_indices(10, 0.2, Some(101)).unwrap();
//! assert_eq!(train.len(), 8);
//! assert_eq!(test.len(), 2);
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;

/// Produce `0..n` in shuffled order.
///
/// A seed gives a reproducible permutation; `None` draws from thread
/// randomness.
#[must_use]
pub fn shuffle_indices(n: usize, random_state: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    match random_state {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        }
        None => {
            let mut rng = rand::thread_rng();
            indices.shuffle(&mut rng);
        }
    }
    indices
}

/// Split `0..n_samples` into shuffled train and test index sets.
///
/// The test set receives `(n_samples * test_size)` rows, rounded to the
/// nearest integer; the train set receives the rest. Together they
/// cover every index exactly once.
///
/// # Errors
///
/// Returns [`SentirError::InvalidHyperparameter`] when `test_size` is
/// outside `(0, 1)` or the rounded split would leave either set empty.
pub fn train_test_split_indices(
    n_samples: usize,
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SentirError::InvalidHyperparameter {
            param: "test_size".to_string(),
            value: test_size.to_string(),
            constraint: "0 < test_size < 1".to_string(),
        });
    }
    let n_test = (n_samples as f32 * test_size).round() as usize;
    if n_test == 0 || n_test == n_samples {
        return Err(SentirError::InvalidHyperparameter {
            param: "test_size".to_string(),
            value: format!("{test_size} over {n_samples} samples"),
            constraint: "both splits must be non-empty".to_string(),
        });
    }
    let shuffled = shuffle_indices(n_samples, random_state);
    let n_train = n_samples - n_test;
    let train = shuffled[..n_train].to_vec();
    let test = shuffled[n_train..].to_vec();
    Ok((train, test))
}

/// Split features and labels into train and test portions.
///
/// Rows are shuffled before splitting; a fixed `random_state` makes the
/// split reproducible.
///
/// # Errors
///
/// Returns [`SentirError::RowCountMismatch`] when `x` and `y` disagree
/// on row count, plus the validation errors of
/// [`train_test_split_indices`].
///
/// # Examples
///
/// ```
/// use sentir::model_selection::train_test_split;
/// use sentir::primitives::Matrix;
///
/// let x = Matrix::from_vec(5, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = vec![0, 0, 1, 1, 1];
///
/// let (x_train, x_test, y_train, y_test) =
///     train_test_split(&x, &y, 0.2, Some(101)).unwrap();
/// assert_eq!(x_train.n_rows(), 4);
/// assert_eq!(x_test.n_rows(), 1);
/// assert_eq!(y_train.len(), 4);
/// assert_eq!(y_test.len(), 1);
/// ```
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &[usize],
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vec<usize>, Vec<usize>)> {
    if x.n_rows() != y.len() {
        return Err(SentirError::row_mismatch(
            "features vs labels",
            x.n_rows(),
            y.len(),
        ));
    }
    let (train_idx, test_idx) = train_test_split_indices(y.len(), test_size, random_state)?;
    let y_train = train_idx.iter().map(|&i| y[i]).collect();
    let y_test = test_idx.iter().map(|&i| y[i]).collect();
    Ok((
        x.take_rows(&train_idx),
        x.take_rows(&test_idx),
        y_train,
        y_test,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut shuffled = shuffle_indices(50, Some(7));
        shuffled.sort_unstable();
        let expected: Vec<usize> = (0..50).collect();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_shuffle_seeded_reproducibility() {
        assert_eq!(shuffle_indices(20, Some(101)), shuffle_indices(20, Some(101)));
        assert_ne!(shuffle_indices(20, Some(101)), shuffle_indices(20, Some(102)));
    }

    #[test]
    fn test_split_sizes_round_to_nearest() {
        let (train, test) = train_test_split_indices(10, 0.25, Some(1)).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 7);
    }

    #[test]
    fn test_split_covers_all_indices_once() {
        let (train, test) = train_test_split_indices(30, 0.2, Some(11)).unwrap();
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        let expected: Vec<usize> = (0..30).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_split_reproducible_with_seed() {
        let a = train_test_split_indices(40, 0.2, Some(101)).unwrap();
        let b = train_test_split_indices(40, 0.2, Some(101)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_test_size_out_of_range_errors() {
        for bad in [0.0, 1.0, -0.2, 1.7] {
            let err = train_test_split_indices(10, bad, None).unwrap_err();
            assert!(matches!(err, SentirError::InvalidHyperparameter { .. }));
        }
    }

    #[test]
    fn test_degenerate_split_errors() {
        // 3 samples at 10% rounds to zero test rows.
        assert!(train_test_split_indices(3, 0.1, Some(1)).is_err());
        // 2 samples at 90% rounds to the whole set.
        assert!(train_test_split_indices(2, 0.9, Some(1)).is_err());
    }

    #[test]
    fn test_matrix_split_rows_follow_indices() {
        let x = Matrix::from_vec(6, 2, (0..12).map(|v| v as f32).collect()).unwrap();
        let y = vec![0, 1, 2, 3, 4, 5];
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, 0.5, Some(3)).unwrap();
        assert_eq!(x_train.n_rows(), 3);
        assert_eq!(x_test.n_rows(), 3);
        // Each split row still carries the features of its label row.
        for (i, &label) in y_train.iter().enumerate() {
            assert_eq!(x_train.get(i, 0), (label * 2) as f32);
            assert_eq!(x_train.get(i, 1), (label * 2 + 1) as f32);
        }
        for (i, &label) in y_test.iter().enumerate() {
            assert_eq!(x_test.get(i, 0), (label * 2) as f32);
        }
    }

    #[test]
    fn test_matrix_split_row_mismatch_errors() {
        let x = Matrix::zeros(4, 2);
        let y = vec![0, 1];
        assert!(matches!(
            train_test_split(&x, &y, 0.5, None).unwrap_err(),
            SentirError::RowCountMismatch { .. }
        ));
    }
}
