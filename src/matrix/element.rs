//! Transient (row, column, value) triples used while building and merging

use std::cmp::Ordering;

/// A single matrix entry on its way into a [`SparseMatrixCSR`](super::SparseMatrixCSR)
///
/// Elements are ordered by row, then by column. The value takes no part in
/// the ordering, which is why [`Element::cmp_position`] is used instead of
/// an `Ord` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<T> {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Entry value
    pub value: T,
}

impl<T> Element<T> {
    /// Creates a new element
    pub fn new(row: usize, column: usize, value: T) -> Self {
        Self { row, column, value }
    }

    /// The sort key: row first, then column
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    /// Compares two elements by position only
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}
