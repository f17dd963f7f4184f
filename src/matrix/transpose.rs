//! Transposition through re-sorted elements

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::matrix::{Element, Scalar, SparseMatrixCSR};

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Returns the transpose of this matrix
    ///
    /// Every stored entry is re-emitted as (column, row, value), the elements
    /// are sorted in parallel by their new position, and the result is built
    /// with a [`SortedElementBuilder`](crate::SortedElementBuilder).
    ///
    /// # Errors
    ///
    /// Only fails if the transposed storage exceeds [`MAX_NNZ`](crate::MAX_NNZ),
    /// which cannot happen for a matrix that was itself built within that limit.
    pub fn transpose(&self) -> Result<SparseMatrixCSR<T>> {
        let mut elements = Vec::with_capacity(self.nnz());
        for row in 0..self.n_rows() {
            for (col, &val) in self.row_iter(row) {
                elements.push(Element::new(col, row, val));
            }
        }

        elements.par_sort_unstable_by(Element::cmp_position);
        debug!(nnz = elements.len(), "sorted transposed elements");

        SparseMatrixCSR::from_sorted_elements(self.n_cols(), self.n_rows(), elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_values() {
        //    [1 2 0]
        //    [0 3 0]
        let m = SparseMatrixCSR::from_dense_values(2, 3, vec![1, 2, 0, 0, 3, 0]).unwrap();
        let t = m.transpose().unwrap();

        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.row_ptr(), &[0, 1, 3, 3]);
        assert_eq!(t.col_idx(), &[0, 0, 1]);
        assert_eq!(t.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_transpose_involution() {
        let values: Vec<i32> = (0..40).map(|i| if i % 3 == 0 { i } else { 0 }).collect();
        let m = SparseMatrixCSR::from_dense_values(8, 5, values).unwrap();

        assert_eq!(m.transpose().unwrap().transpose().unwrap(), m);
    }

    #[test]
    fn test_transpose_empty() {
        let m = SparseMatrixCSR::<i32>::zeros(4, 0);
        let t = m.transpose().unwrap();

        assert_eq!(t.n_rows(), 0);
        assert_eq!(t.n_cols(), 4);
        assert_eq!(t.row_ptr(), &[0]);
    }
}
