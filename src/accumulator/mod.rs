//! Accumulator implementations for sparse matrix multiplication
//!
//! Each output row is merged independently: every product a(i,k)·b(k,j) is
//! added into a per-row map keyed by j, zero sums are discarded and the rest
//! is emitted in ascending column order.

pub mod hash;

pub use hash::{multiply_row_hash, HashAccumulator};
