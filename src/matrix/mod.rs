// Matrix data structures, construction and traversal

pub mod builder;
pub mod config;
pub mod conversion;
pub mod csr;
pub mod dense_iter;
pub mod element;
pub mod encoding;
pub mod reference;
pub mod transpose;

pub use builder::{DenseStreamBuilder, SortedElementBuilder, DEFAULT_CAPACITY, MAX_NNZ};
pub use config::{MultiplyConfig, DEFAULT_THREADS};
pub use csr::{Scalar, SparseMatrixCSR};
pub use dense_iter::{DenseIter, ParDenseValues};
pub use element::Element;
pub use reference::reference_dense_spgemm;
