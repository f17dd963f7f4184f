//! Hash-based accumulator for a single row of sparse matrix multiplication

use std::collections::HashMap;
use std::marker::PhantomData;

use num_traits::NumCast;

use crate::error::{Error, Result};
use crate::matrix::{Element, Scalar, SparseMatrixCSR};

/// Column-keyed running sums for one output row
///
/// Sums are kept in `i128` so intermediate values may leave the range of
/// `T`; only the final entry has to fit. Owned by exactly one worker and
/// reset between rows, so no synchronization is involved.
pub struct HashAccumulator<T> {
    row: usize,
    sums: HashMap<usize, i128>,
    _scalar: PhantomData<T>,
}

impl<T: Scalar> HashAccumulator<T> {
    /// Create an accumulator with room for `capacity` distinct columns
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            row: 0,
            sums: HashMap::with_capacity(capacity),
            _scalar: PhantomData,
        }
    }

    /// Clear all sums and start collecting for output row `row`
    pub fn reset(&mut self, row: usize) {
        self.row = row;
        self.sums.clear();
    }

    /// Add `val` to the running sum of column `col`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the running sum leaves `i128`.
    pub fn accumulate(&mut self, col: usize, val: T) -> Result<()> {
        let val = widen(val).ok_or_else(|| self.overflow(col))?;
        self.add_wide(col, val)
    }

    /// Add the product `a_val · b_val` to the running sum of column `col`
    fn accumulate_product(&mut self, col: usize, a_val: T, b_val: T) -> Result<()> {
        let product = widen(a_val)
            .zip(widen(b_val))
            .and_then(|(x, y)| x.checked_mul(y))
            .ok_or_else(|| self.overflow(col))?;
        self.add_wide(col, product)
    }

    fn add_wide(&mut self, col: usize, val: i128) -> Result<()> {
        let overflow = self.overflow(col);
        let sum = self.sums.entry(col).or_insert(0);
        *sum = sum.checked_add(val).ok_or(overflow)?;
        Ok(())
    }

    fn overflow(&self, col: usize) -> Error {
        Error::ArithmeticOverflow {
            row: self.row,
            column: col,
        }
    }

    /// Drain the non-zero sums as elements sorted by column
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] for the first column whose final
    /// sum does not fit in `T`. The accumulator is left empty either way.
    pub fn drain_sorted(&mut self) -> Result<Vec<Element<T>>> {
        let row = self.row;
        let mut elements = self
            .sums
            .drain()
            .filter(|&(_, sum)| sum != 0)
            .map(|(col, sum)| {
                narrow(sum)
                    .map(|val| Element::new(row, col, val))
                    .ok_or(Error::ArithmeticOverflow { row, column: col })
            })
            .collect::<Result<Vec<_>>>()?;
        elements.sort_unstable_by_key(|e| e.column);
        Ok(elements)
    }
}

/// Widens a scalar to the accumulation type
pub(crate) fn widen<T: Scalar>(val: T) -> Option<i128> {
    val.to_i128()
}

/// Narrows an accumulated sum back to `T`, or `None` if it does not fit
pub(crate) fn narrow<T: Scalar>(sum: i128) -> Option<T> {
    <T as NumCast>::from(sum)
}

/// Multiply row `i` of `a` with `b` using a hash accumulator
///
/// Returns the non-zero entries of row `i` of A×B sorted by column.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if `a.n_cols() != b.n_rows()`
/// - [`Error::IndexOutOfRange`] if `i >= a.n_rows()`
/// - [`Error::ArithmeticOverflow`] if an entry of the row does not fit in `T`
pub fn multiply_row_hash<T: Scalar>(
    i: usize,
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
) -> Result<Vec<Element<T>>> {
    if a.n_cols() != b.n_rows() {
        return Err(Error::DimensionMismatch {
            left_cols: a.n_cols(),
            right_rows: b.n_rows(),
        });
    }
    if i >= a.n_rows() {
        return Err(Error::IndexOutOfRange {
            row: i,
            column: 0,
            n_rows: a.n_rows(),
            n_cols: a.n_cols(),
        });
    }

    let mut acc = HashAccumulator::with_capacity(0);
    multiply_row_into(i, a, b, &mut acc)
}

/// Like [`multiply_row_hash`] without the shape checks, reusing the
/// allocation of `acc`
pub(crate) fn multiply_row_into<T: Scalar>(
    i: usize,
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    acc: &mut HashAccumulator<T>,
) -> Result<Vec<Element<T>>> {
    acc.reset(i);

    for (k, &a_val) in a.row_iter(i) {
        for (j, &b_val) in b.row_iter(k) {
            acc.accumulate_product(j, a_val, b_val)?;
        }
    }

    acc.drain_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_drain() {
        let mut acc = HashAccumulator::with_capacity(4);
        acc.reset(2);
        acc.accumulate(7, 3).unwrap();
        acc.accumulate(1, 4).unwrap();
        acc.accumulate(7, -1).unwrap();

        let row = acc.drain_sorted().unwrap();
        assert_eq!(row, vec![Element::new(2, 1, 4), Element::new(2, 7, 2)]);
    }

    #[test]
    fn test_cancelling_sums_are_dropped() {
        let mut acc = HashAccumulator::with_capacity(4);
        acc.reset(0);
        acc.accumulate(3, 5).unwrap();
        acc.accumulate(3, -5).unwrap();

        assert!(acc.drain_sorted().unwrap().is_empty());
    }

    #[test]
    fn test_overflow_reported_on_final_sum() {
        let mut acc = HashAccumulator::with_capacity(2);
        acc.reset(4);
        acc.accumulate(0, i32::MAX).unwrap();
        acc.accumulate(0, 1).unwrap();
        acc.accumulate(3, 1).unwrap();
        assert!(matches!(
            acc.drain_sorted(),
            Err(Error::ArithmeticOverflow { row: 4, column: 0 })
        ));

        // The failed drain still empties the accumulator
        acc.reset(5);
        assert!(acc.drain_sorted().unwrap().is_empty());
    }

    #[test]
    fn test_intermediate_overflow_is_tolerated() {
        let mut acc = HashAccumulator::with_capacity(1);
        acc.reset(0);
        acc.accumulate(0, i32::MAX).unwrap();
        acc.accumulate(0, 1).unwrap();
        acc.accumulate(0, -1).unwrap();

        assert_eq!(acc.drain_sorted().unwrap(), vec![Element::new(0, 0, i32::MAX)]);
    }

    #[test]
    fn test_multiply_row_exact_result_in_range() {
        // [MAX 1 -1] × [1; 1; 1] = [MAX]
        let a = SparseMatrixCSR::from_dense_values(1, 3, vec![i32::MAX, 1, -1]).unwrap();
        let b = SparseMatrixCSR::from_dense_values(3, 1, vec![1, 1, 1]).unwrap();

        assert_eq!(multiply_row_hash(0, &a, &b).unwrap(), vec![Element::new(0, 0, i32::MAX)]);
    }

    #[test]
    fn test_multiply_row_product_overflow() {
        // The product fits in i128 but the entry does not fit in i8
        let a = SparseMatrixCSR::from_dense_values(1, 1, vec![100i8]).unwrap();
        let b = SparseMatrixCSR::from_dense_values(1, 1, vec![2i8]).unwrap();

        assert!(matches!(
            multiply_row_hash(0, &a, &b),
            Err(Error::ArithmeticOverflow { row: 0, column: 0 })
        ));
    }

    #[test]
    fn test_multiply_row_dimension_mismatch() {
        let a = SparseMatrixCSR::from_dense_values(2, 2, vec![1, 2, 0, 3]).unwrap();
        let b = SparseMatrixCSR::from_dense_values(1, 2, vec![4, 5]).unwrap();

        assert!(matches!(
            multiply_row_hash(0, &a, &b),
            Err(Error::DimensionMismatch { left_cols: 2, right_rows: 1 })
        ));
    }

    #[test]
    fn test_multiply_row_out_of_range() {
        let a = SparseMatrixCSR::from_dense_values(2, 2, vec![1, 2, 0, 3]).unwrap();

        assert!(matches!(
            multiply_row_hash(5, &a, &a),
            Err(Error::IndexOutOfRange { row: 5, n_rows: 2, .. })
        ));
    }

    #[test]
    fn test_multiply_row() {
        // A = [1 2; 0 3], B = [4 5; 6 7]
        let a = SparseMatrixCSR::from_dense_values(2, 2, vec![1, 2, 0, 3]).unwrap();
        let b = SparseMatrixCSR::from_dense_values(2, 2, vec![4, 5, 6, 7]).unwrap();

        let row0 = multiply_row_hash(0, &a, &b).unwrap();
        assert_eq!(row0, vec![Element::new(0, 0, 16), Element::new(0, 1, 19)]);

        let row1 = multiply_row_hash(1, &a, &b).unwrap();
        assert_eq!(row1, vec![Element::new(1, 0, 18), Element::new(1, 1, 21)]);
    }

    #[test]
    fn test_multiply_row_cancellation() {
        // [1 1] × [2 -3; -2 3] = [0 0]
        let a = SparseMatrixCSR::from_dense_values(1, 2, vec![1, 1]).unwrap();
        let b = SparseMatrixCSR::from_dense_values(2, 2, vec![2, -3, -2, 3]).unwrap();

        assert!(multiply_row_hash(0, &a, &b).unwrap().is_empty());
    }
}
