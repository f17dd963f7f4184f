//! # csrmat: row-compressed integer sparse matrices
//!
//! `csrmat` stores integer matrices in Compressed Sparse Row (CSR) form and
//! multiplies them in parallel.
//!
//! ## Overview
//!
//! - **Construction**: from a flat row-major stream where zeros are implicit
//!   ([`DenseStreamBuilder`]), or from elements sorted by (row, column)
//!   ([`SortedElementBuilder`]).
//! - **Lookup**: [`SparseMatrixCSR::get`] binary-searches the row slice.
//! - **Transpose**: [`SparseMatrixCSR::transpose`] re-sorts the entries in parallel.
//! - **Multiplication**: [`spgemm_parallel`] partitions the rows of A over a
//!   worker pool and merges each output row with a hash accumulator.
//! - **Traversal**: [`DenseIter`] walks every position in row-major order and
//!   splits by row range for parallel consumers ([`ParDenseValues`]).
//!
//! Matrices are immutable once built.
//!
//! ## Usage
//!
//! ```
//! use csrmat::{multiply, MultiplyConfig, SparseMatrixCSR};
//!
//! let a = SparseMatrixCSR::from_dense_encoding(vec![2, 3, 0, 1, 2, 3, 4, 5]).unwrap();
//! let b = a.transpose().unwrap();
//!
//! let c = multiply(&a, &b, &MultiplyConfig::default()).unwrap();
//! assert_eq!(c.to_dense_encoding().unwrap(), vec![2, 2, 5, 14, 14, 50]);
//! ```

pub mod accumulator;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use accumulator::{multiply_row_hash, HashAccumulator};
pub use error::{Error, Result};
pub use matrix::{reference_dense_spgemm, DenseIter, Element, ParDenseValues, Scalar, SparseMatrixCSR};
pub use matrix::{DenseStreamBuilder, SortedElementBuilder, DEFAULT_CAPACITY, MAX_NNZ};
pub use matrix::{MultiplyConfig, DEFAULT_THREADS};
pub use parallel::{partition_rows, spgemm_parallel};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Multiplies `a` by `b`; see [`spgemm_parallel`]
pub use parallel::spgemm_parallel as multiply;

/// Version information for the csrmat library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
