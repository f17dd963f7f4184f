//! Flat dense encoding: `[n_rows, n_cols, v(0,0), v(0,1), ...]`

use num_traits::NumCast;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::{DenseStreamBuilder, Scalar, SparseMatrixCSR};

impl<T: Scalar> SparseMatrixCSR<T> {
    /// Reads a matrix from its dense encoding in a single pass
    ///
    /// The first two values are the row and column counts; the next
    /// `n_rows * n_cols` values are the entries in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use csrmat::SparseMatrixCSR;
    ///
    /// let m = SparseMatrixCSR::from_dense_encoding(vec![2, 3, 5, 6, 0, 0, 1, 2]).unwrap();
    /// assert_eq!((m.n_rows(), m.n_cols()), (2, 3));
    /// assert_eq!(m.get(0, 1).unwrap(), 6);
    /// assert_eq!(m.to_dense_encoding().unwrap(), vec![2, 3, 5, 6, 0, 0, 1, 2]);
    /// ```
    pub fn from_dense_encoding<I>(stream: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut stream = stream.into_iter();
        let n_rows = read_dimension(stream.next(), 0)?;
        let n_cols = read_dimension(stream.next(), 1)?;

        let mut builder = DenseStreamBuilder::new(n_rows, n_cols)?;
        builder.extend(stream)?;
        builder.finish()
    }

    /// Writes the dense encoding of this matrix
    ///
    /// Entries are produced in parallel and concatenated in row-major order
    /// after the two dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if a dimension does not fit in `T`.
    pub fn to_dense_encoding(&self) -> Result<Vec<T>> {
        let mut encoded = Vec::with_capacity(self.n_rows().saturating_mul(self.n_cols()).saturating_add(2));
        encoded.push(write_dimension::<T>(self.n_rows())?);
        encoded.push(write_dimension::<T>(self.n_cols())?);
        encoded.par_extend(self.par_dense_values());
        Ok(encoded)
    }
}

/// Reads header value `position` (0 for rows, 1 for columns)
fn read_dimension<T: Scalar>(value: Option<T>, position: usize) -> Result<usize> {
    let value = value.ok_or(Error::StreamLength {
        expected: 2,
        actual: position,
    })?;
    value
        .to_usize()
        .ok_or_else(|| Error::InvalidDimension(format!("{:?} is not a valid dimension", value)))
}

fn write_dimension<T: Scalar>(dim: usize) -> Result<T> {
    <T as NumCast>::from(dim).ok_or_else(|| {
        Error::InvalidDimension(format!("{} does not fit in the matrix scalar type", dim))
    })
}
