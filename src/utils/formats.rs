//! Utilities for converting between our matrix format and sprs

use sprs::CsMat;

use crate::error::Result;
use crate::matrix::{Element, Scalar, SortedElementBuilder, SparseMatrixCSR};

/// Converts our CSR matrix to sprs CsMat format
pub fn to_sprs_csr<T: Scalar>(matrix: &SparseMatrixCSR<T>) -> CsMat<T> {
    CsMat::new(
        (matrix.n_rows(), matrix.n_cols()),
        matrix.row_ptr().to_vec(),
        matrix.col_idx().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts a sprs CsMat (CSR or CSC) to our SparseMatrixCSR format
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs_csr<T: Scalar>(matrix: CsMat<T>) -> Result<SparseMatrixCSR<T>> {
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let mut builder = SortedElementBuilder::new(n_rows, n_cols);

    for (row, vec) in matrix.outer_iterator().enumerate() {
        for (col, &val) in vec.iter() {
            builder.push(Element::new(row, col, val))?;
        }
    }

    Ok(builder.finish())
}
