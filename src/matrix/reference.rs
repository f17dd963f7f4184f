//! Naive dense reference product
//!
//! This provides a baseline for correctness testing of the sparse multiply.
//! Every output entry is the plain dot product of a row of A and a column of B.

use crate::accumulator::hash::{narrow, widen};
use crate::error::{Error, Result};
use crate::matrix::{Scalar, SparseMatrixCSR};

/// Multiplies two matrices entry by entry through dense row/column dot products
///
/// Runs in O(n_rows · n_cols · k) regardless of sparsity; only meant for
/// validating [`spgemm_parallel`](crate::spgemm_parallel) on small inputs.
/// Dot products are summed in `i128`; fails with [`Error::ArithmeticOverflow`]
/// only when a final entry does not fit in `T`.
pub fn reference_dense_spgemm<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
) -> Result<SparseMatrixCSR<T>> {
    if a.n_cols() != b.n_rows() {
        return Err(Error::DimensionMismatch {
            left_cols: a.n_cols(),
            right_rows: b.n_rows(),
        });
    }

    let n_rows = a.n_rows();
    let n_cols = b.n_cols();
    let inner = a.n_cols();

    let mut dense = Vec::with_capacity(n_rows * n_cols);
    for i in 0..n_rows {
        for j in 0..n_cols {
            let overflow = || Error::ArithmeticOverflow { row: i, column: j };
            let mut sum = 0i128;
            for k in 0..inner {
                let product = widen(a.value_at(i, k))
                    .zip(widen(b.value_at(k, j)))
                    .and_then(|(x, y)| x.checked_mul(y))
                    .ok_or_else(overflow)?;
                sum = sum.checked_add(product).ok_or_else(overflow)?;
            }
            dense.push(narrow(sum).ok_or_else(overflow)?);
        }
    }

    SparseMatrixCSR::from_dense_values(n_rows, n_cols, dense)
}
