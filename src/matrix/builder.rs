//! Incremental CSR construction from dense-ordered or sorted sparse sources
//!
//! Both builders append into the same growable storage. Column and value
//! arrays start at [`DEFAULT_CAPACITY`] entries and double on exhaustion,
//! capped at the builder's capacity limit; asking for more than the limit
//! fails with [`Error::CapacityExceeded`]. Row offsets are written as rows
//! close, and rows that never receive an entry are gap-filled with the
//! previous row's end.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::matrix::{Element, Scalar, SparseMatrixCSR};

/// Initial number of column/value slots reserved by a builder
pub const DEFAULT_CAPACITY: usize = 8;

/// Largest number of non-zero entries a matrix may hold
pub const MAX_NNZ: usize = i32::MAX as usize;

/// Growable CSR arrays shared by both builders
struct EntryStorage<T> {
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
    capacity: usize,
    limit: usize,
}

impl<T: Scalar> EntryStorage<T> {
    fn new(n_rows: usize, limit: usize) -> Self {
        let capacity = DEFAULT_CAPACITY.min(limit);
        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        row_ptr.push(0);

        Self {
            row_ptr,
            col_idx: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
            limit,
        }
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn push(&mut self, column: usize, value: T) -> Result<()> {
        if self.values.len() == self.capacity {
            self.grow()?;
        }
        self.col_idx.push(column);
        self.values.push(value);
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        if self.capacity >= self.limit {
            return Err(Error::CapacityExceeded { limit: self.limit });
        }
        let new_capacity = if self.capacity > self.limit / 2 {
            self.limit
        } else {
            (self.capacity * 2).max(1)
        };

        let additional = new_capacity - self.values.len();
        self.col_idx.reserve_exact(additional);
        self.values.reserve_exact(additional);
        trace!(from = self.capacity, to = new_capacity, "grew entry storage");
        self.capacity = new_capacity;
        Ok(())
    }

    /// Closes every open row below `row`, so that `row_ptr[row]` is written
    fn close_rows_before(&mut self, row: usize) {
        let nnz = self.nnz();
        while self.row_ptr.len() <= row {
            self.row_ptr.push(nnz);
        }
    }

    fn finish(mut self, n_rows: usize, n_cols: usize) -> SparseMatrixCSR<T> {
        self.close_rows_before(n_rows);
        self.col_idx.shrink_to_fit();
        self.values.shrink_to_fit();
        debug!(n_rows, n_cols, nnz = self.values.len(), "built CSR matrix");
        SparseMatrixCSR::from_parts_unchecked(n_rows, n_cols, self.row_ptr, self.col_idx, self.values)
    }
}

/// Builds a matrix from `n_rows * n_cols` values in row-major order
///
/// Zeros are implicit: only non-zero values are stored, and a row is closed
/// as soon as its last column has been consumed.
///
/// # Examples
///
/// ```
/// use csrmat::DenseStreamBuilder;
///
/// let mut builder = DenseStreamBuilder::new(2, 3).unwrap();
/// builder.extend([5, 6, 0, 0, 1, 2]).unwrap();
/// let m = builder.finish().unwrap();
///
/// assert_eq!(m.nnz(), 4);
/// assert_eq!(m.get(1, 2).unwrap(), 2);
/// ```
pub struct DenseStreamBuilder<T> {
    n_rows: usize,
    n_cols: usize,
    expected: usize,
    seen: usize,
    row: usize,
    column: usize,
    storage: EntryStorage<T>,
}

impl<T: Scalar> DenseStreamBuilder<T> {
    /// Starts a builder for an `n_rows × n_cols` matrix
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `n_rows * n_cols` overflows.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self> {
        let expected = n_rows.checked_mul(n_cols).ok_or_else(|| {
            Error::InvalidDimension(format!("{} × {} elements overflow usize", n_rows, n_cols))
        })?;

        Ok(Self {
            n_rows,
            n_cols,
            expected,
            seen: 0,
            row: 0,
            column: 0,
            storage: EntryStorage::new(n_rows, MAX_NNZ),
        })
    }

    /// Caps the number of stored non-zeros below [`MAX_NNZ`]
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.storage = EntryStorage::new(self.n_rows, limit.min(MAX_NNZ));
        self
    }

    /// Consumes the next value of the row-major stream
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.seen == self.expected {
            return Err(Error::StreamLength {
                expected: self.expected,
                actual: self.expected + 1,
            });
        }
        self.seen += 1;

        if !value.is_zero() {
            self.storage.push(self.column, value)?;
        }

        self.column += 1;
        if self.column == self.n_cols {
            self.column = 0;
            self.row += 1;
            self.storage.close_rows_before(self.row);
        }
        Ok(())
    }

    /// Consumes every value of `values`
    pub fn extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().try_for_each(|value| self.push(value))
    }

    /// Finishes the matrix, trimming storage to the exact non-zero count
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamLength`] if fewer than `n_rows * n_cols` values were pushed.
    pub fn finish(self) -> Result<SparseMatrixCSR<T>> {
        if self.seen != self.expected {
            return Err(Error::StreamLength {
                expected: self.expected,
                actual: self.seen,
            });
        }
        Ok(self.storage.finish(self.n_rows, self.n_cols))
    }
}

/// Builds a matrix from elements sorted by ascending (row, column)
///
/// Zero-valued elements are dropped. Rows that receive no element get an
/// empty slice, so callers may skip empty rows entirely.
pub struct SortedElementBuilder<T> {
    n_rows: usize,
    n_cols: usize,
    last: Option<(usize, usize)>,
    storage: EntryStorage<T>,
}

impl<T: Scalar> SortedElementBuilder<T> {
    /// Starts a builder for an `n_rows × n_cols` matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            last: None,
            storage: EntryStorage::new(n_rows, MAX_NNZ),
        }
    }

    /// Caps the number of stored non-zeros below [`MAX_NNZ`]
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.storage = EntryStorage::new(self.n_rows, limit.min(MAX_NNZ));
        self
    }

    /// Appends one element
    ///
    /// # Errors
    ///
    /// - [`Error::ElementOutOfBounds`] if the element lies outside the matrix
    /// - [`Error::OrderViolation`] if it does not come strictly after the previous element
    /// - [`Error::CapacityExceeded`] if storage cannot grow any further
    pub fn push(&mut self, element: Element<T>) -> Result<()> {
        let Element { row, column, value } = element;

        if row >= self.n_rows || column >= self.n_cols {
            return Err(Error::ElementOutOfBounds {
                row,
                column,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }
        if let Some((previous_row, previous_column)) = self.last {
            if (row, column) <= (previous_row, previous_column) {
                return Err(Error::OrderViolation {
                    row,
                    column,
                    previous_row,
                    previous_column,
                });
            }
        }
        if value.is_zero() {
            return Ok(());
        }

        self.storage.close_rows_before(row);
        self.storage.push(column, value)?;
        self.last = Some((row, column));
        Ok(())
    }

    /// Appends every element of `elements`
    pub fn extend<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = Element<T>>,
    {
        elements.into_iter().try_for_each(|element| self.push(element))
    }

    /// Closes the last row, gap-fills trailing empty rows and returns the matrix
    pub fn finish(self) -> SparseMatrixCSR<T> {
        self.storage.finish(self.n_rows, self.n_cols)
    }
}

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Builds a matrix from row-major values, zeros included
    pub fn from_dense_values<I>(n_rows: usize, n_cols: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut builder = DenseStreamBuilder::new(n_rows, n_cols)?;
        builder.extend(values)?;
        builder.finish()
    }

    /// Builds a matrix from elements sorted by ascending (row, column)
    pub fn from_sorted_elements<I>(n_rows: usize, n_cols: usize, elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = Element<T>>,
    {
        let mut builder = SortedElementBuilder::new(n_rows, n_cols);
        builder.extend(elements)?;
        Ok(builder.finish())
    }
}
