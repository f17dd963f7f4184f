//! Interoperability with other sparse matrix crates

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};
