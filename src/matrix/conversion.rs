//! Conversion between CSR matrices and dense ndarray arrays

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::matrix::{Scalar, SparseMatrixCSR};

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Expands this matrix into a dense array
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.n_rows(), self.n_cols()), T::zero());

        for i in 0..self.n_rows() {
            for (j, &val) in self.row_iter(i) {
                dense[[i, j]] = val;
            }
        }

        dense
    }

    /// Compresses a dense array, dropping its zeros
    pub fn from_dense(dense: ArrayView2<'_, T>) -> Result<Self> {
        let (n_rows, n_cols) = dense.dim();
        // ndarray iterates in logical row-major order for any memory layout.
        SparseMatrixCSR::from_dense_values(n_rows, n_cols, dense.iter().copied())
    }
}
