//! Horizontal fusion of feature blocks.

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;

/// Concatenate feature blocks column-wise into one design matrix.
///
/// Row `i` of every block must describe the same statement; the fused
/// row is their columns in block order. Row count disagreement between
/// blocks means an upstream bug dropped or duplicated a statement, so
/// it is an error rather than something to repair here.
///
/// # Errors
///
/// Returns [`SentirError::RowCountMismatch`] when any block's row count
/// differs from the first block's, and an error on an empty block list.
///
/// # Examples
///
/// ```
/// use sentir::features::hstack;
/// use sentir::primitives::Matrix;
///
/// let terms = Matrix::from_vec(2, 3, vec![0.5, 0.0, 0.5, 0.1, 0.9, 0.0]).unwrap();
/// let scalars = Matrix::from_vec(2, 2, vec![40.0, 1.0, 120.0, 3.0]).unwrap();
///
/// let fused = hstack(&[&terms, &scalars]).unwrap();
/// assert_eq!(fused.shape(), (2, 5));
/// assert_eq!(fused.get(0, 3), 40.0);
/// ```
pub fn hstack(blocks: &[&Matrix<f32>]) -> Result<Matrix<f32>> {
    let first = blocks
        .first()
        .ok_or_else(|| SentirError::empty_input("feature blocks"))?;
    let rows = first.n_rows();
    for (i, block) in blocks.iter().enumerate().skip(1) {
        if block.n_rows() != rows {
            return Err(SentirError::row_mismatch(
                &format!("feature block {i} vs block 0"),
                block.n_rows(),
                rows,
            ));
        }
    }

    let total_cols: usize = blocks.iter().map(|b| b.n_cols()).sum();
    let mut data = Vec::with_capacity(rows * total_cols);
    for row in 0..rows {
        for block in blocks {
            let width = block.n_cols();
            let start = row * width;
            data.extend_from_slice(&block.as_slice()[start..start + width]);
        }
    }
    Matrix::from_vec(rows, total_cols, data).map_err(SentirError::from)
}
