//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use num_traits::PrimInt;

use crate::error::{Error, Result};

/// Integer scalar that can be stored in a [`SparseMatrixCSR`]
pub trait Scalar: PrimInt + AddAssign + Default + fmt::Debug + Send + Sync + 'static {}

impl<T> Scalar for T where T: PrimInt + AddAssign + Default + fmt::Debug + Send + Sync + 'static {}

/// An immutable sparse integer matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Column indices are strictly ascending within each row and no stored value
/// is zero, so two matrices with equal contents have equal storage.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrixCSR<T> {
    n_rows: usize,
    n_cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Creates a CSR matrix from raw parts, validating every storage invariant
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStructure`] if:
    /// - row_ptr.len() is not n_rows + 1, or row_ptr[0] is not 0
    /// - row_ptr is not non-decreasing, or row_ptr[n_rows] differs from col_idx.len()
    /// - col_idx.len() differs from values.len()
    /// - a column index is out of bounds or not strictly ascending within its row
    /// - a stored value is zero
    pub fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len() != n_rows + 1 {
            return Err(Error::InvalidStructure(format!(
                "row_ptr.len() must be n_rows + 1 ({} != {})",
                row_ptr.len(),
                n_rows + 1
            )));
        }
        if col_idx.len() != values.len() {
            return Err(Error::InvalidStructure(
                "col_idx.len() must equal values.len()".to_string(),
            ));
        }
        if row_ptr[0] != 0 || row_ptr[n_rows] != col_idx.len() {
            return Err(Error::InvalidStructure(
                "row_ptr must start at 0 and end at nnz".to_string(),
            ));
        }

        for row in 0..n_rows {
            let (start, end) = (row_ptr[row], row_ptr[row + 1]);
            if start > end || end > col_idx.len() {
                return Err(Error::InvalidStructure(format!(
                    "row_ptr is not monotonic at row {}",
                    row
                )));
            }
            let cols = &col_idx[start..end];
            if cols.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(Error::InvalidStructure(format!(
                    "column indices of row {} are not strictly ascending",
                    row
                )));
            }
            if let Some(&col) = cols.last() {
                if col >= n_cols {
                    return Err(Error::InvalidStructure(format!(
                        "Column index {} out of bounds (n_cols = {})",
                        col, n_cols
                    )));
                }
            }
        }

        if values.iter().any(|v| v.is_zero()) {
            return Err(Error::InvalidStructure(
                "explicit zero values are not stored".to_string(),
            ));
        }

        Ok(Self::from_parts_unchecked(n_rows, n_cols, row_ptr, col_idx, values))
    }

    /// Assembles a matrix whose invariants the caller already guarantees
    pub(crate) fn from_parts_unchecked(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), n_rows + 1);
        debug_assert_eq!(col_idx.len(), values.len());
        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row offsets, `n_rows + 1` long
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column indices of all stored entries
    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    /// Values of all stored entries, aligned with [`col_idx`](Self::col_idx)
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Looks up the value at (row, column), returning zero for absent entries
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `row >= n_rows` or `column >= n_cols`.
    pub fn get(&self, row: usize, column: usize) -> Result<T> {
        if row >= self.n_rows || column >= self.n_cols {
            return Err(Error::IndexOutOfRange {
                row,
                column,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }
        Ok(self.value_at(row, column))
    }

    /// Bounds-unchecked lookup for callers that already validated the position
    pub(crate) fn value_at(&self, row: usize, column: usize) -> T {
        let (cols, vals) = self.row_slice(row);
        match cols.binary_search(&column) {
            Ok(idx) => vals[idx],
            Err(_) => T::zero(),
        }
    }

    /// True if row `i` stores at least one entry; false for rows out of range
    pub fn row_has_entries(&self, i: usize) -> bool {
        i < self.n_rows && self.row_ptr[i] < self.row_ptr[i + 1]
    }

    /// Borrowed (columns, values) view of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_rows`.
    pub fn row_slice(&self, i: usize) -> (&[usize], &[T]) {
        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];
        (&self.col_idx[start..end], &self.values[start..end])
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        let (cols, vals) = self.row_slice(i);
        cols.iter().copied().zip(vals)
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::from_parts_unchecked(n_rows, n_cols, vec![0; n_rows + 1], Vec::new(), Vec::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::from_parts_unchecked(n, n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }
}

impl<T: Scalar> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let (cols, vals) = self.row_slice(i);

                if cols.is_empty() {
                    writeln!(f, "(empty)")?;
                    continue;
                }

                let shown = 5.min(cols.len());
                for (col, val) in cols.iter().zip(vals).take(shown) {
                    write!(f, "({}, {:?}) ", col, val)?;
                }
                if cols.len() > shown {
                    write!(f, "... ({} more)", cols.len() - shown)?;
                }
                writeln!(f)?;
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
