//! Row-major traversal of every matrix position, zeros included
//!
//! [`DenseIter`] is a plain range descriptor over an immutable matrix: a row
//! range plus a column cursor. Splitting hands out disjoint row ranges, so
//! the pieces can be consumed on different threads without coordination.
//! [`ParDenseValues`] plugs the same splitting into rayon.

use rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use rayon::iter::ParallelIterator;

use crate::matrix::{Scalar, SparseMatrixCSR};

/// Splittable iterator over matrix values in row-major dense order
#[derive(Clone)]
pub struct DenseIter<'a, T> {
    matrix: &'a SparseMatrixCSR<T>,
    end_row: usize,
    row: usize,
    column: usize,
}

impl<'a, T: Scalar> DenseIter<'a, T> {
    /// Iterates over the whole matrix
    pub fn new(matrix: &'a SparseMatrixCSR<T>) -> Self {
        Self::with_rows(matrix, 0, matrix.n_rows())
    }

    fn with_rows(matrix: &'a SparseMatrixCSR<T>, start_row: usize, end_row: usize) -> Self {
        // A zero-width matrix has no positions; start exhausted.
        let row = if matrix.n_cols() == 0 { end_row } else { start_row };
        Self {
            matrix,
            end_row,
            row,
            column: 0,
        }
    }

    /// Number of values left to yield
    pub fn remaining(&self) -> usize {
        (self.end_row - self.row) * self.matrix.n_cols() - self.column
    }

    /// Splits the remaining rows at their midpoint, consuming the iterator
    ///
    /// Returns `(lower, Some(upper))`, where `lower` covers the rows before
    /// the midpoint (continuing from the current column) and `upper` starts
    /// at column 0 of the midpoint row. With a single row left there is
    /// nothing to split and `(self, None)` is returned.
    pub fn split(self) -> (Self, Option<Self>) {
        if self.end_row - self.row <= 1 {
            return (self, None);
        }
        let mid = (self.row + self.end_row) / 2;

        let lower = Self {
            matrix: self.matrix,
            end_row: mid,
            row: self.row,
            column: self.column,
        };
        let upper = Self {
            matrix: self.matrix,
            end_row: self.end_row,
            row: mid,
            column: 0,
        };
        (lower, Some(upper))
    }

    /// Splits off the lower half of the remaining rows
    ///
    /// `self` keeps the rows from the midpoint on; the returned iterator
    /// covers the rows before it. Returns `None` with one row or less left.
    pub fn try_split(&mut self) -> Option<Self> {
        let (lower, upper) = self.clone().split();
        let upper = upper?;
        *self = upper;
        Some(lower)
    }
}

impl<T: Scalar> Iterator for DenseIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.row >= self.end_row {
            return None;
        }
        let value = self.matrix.value_at(self.row, self.column);

        self.column += 1;
        if self.column == self.matrix.n_cols() {
            self.column = 0;
            self.row += 1;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<T: Scalar> ExactSizeIterator for DenseIter<'_, T> {}

impl<'a, T: Scalar> UnindexedProducer for DenseIter<'a, T> {
    type Item = T;

    fn split(self) -> (Self, Option<Self>) {
        DenseIter::split(self)
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self)
    }
}

/// Parallel iterator over matrix values in row-major dense order
///
/// Ordered collection (`collect::<Vec<_>>()`) yields exactly the sequence of
/// the sequential [`DenseIter`].
pub struct ParDenseValues<'a, T> {
    iter: DenseIter<'a, T>,
}

impl<'a, T: Scalar> ParallelIterator for ParDenseValues<'a, T> {
    type Item = T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge_unindexed(self.iter, consumer)
    }
}

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Sequential, splittable dense-order iterator
    pub fn dense_iter(&self) -> DenseIter<'_, T> {
        DenseIter::new(self)
    }

    /// Parallel dense-order iterator
    pub fn par_dense_values(&self) -> ParDenseValues<'_, T> {
        ParDenseValues {
            iter: DenseIter::new(self),
        }
    }
}
