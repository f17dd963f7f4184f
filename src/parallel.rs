//! # Parallel SpGEMM
//!
//! The rows of the left operand are cut into contiguous, ascending
//! partitions, one per worker. Each worker multiplies its rows through a
//! private [`HashAccumulator`] while only reading A and B, and the partition
//! outputs are concatenated in partition order so the joined element stream
//! is already sorted for the [`SortedElementBuilder`].
//!
//! The worker pool lives for a single call and is dropped (shutting down its
//! threads) on every return path. If a partition fails, the remaining
//! partitions still run to completion; their results are discarded and the
//! first failure in partition order is reported.

use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::accumulator::hash::{multiply_row_into, HashAccumulator};
use crate::error::{Error, Result};
use crate::matrix::{Element, MultiplyConfig, Scalar, SortedElementBuilder, SparseMatrixCSR};

/// Performs sparse general matrix-matrix multiplication (SpGEMM) on a
/// dedicated worker pool.
///
/// # Arguments
///
/// * `a` - Left input matrix in CSR format
/// * `b` - Right input matrix in CSR format
/// * `config` - Worker count; the pool never exceeds `a.n_rows()` threads
///
/// # Returns
///
/// The result matrix C = A×B in CSR format
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if `a.n_cols() != b.n_rows()`
/// - [`Error::InvalidConfig`] if `config.n_threads` is zero
/// - [`Error::WorkerFailure`] wrapping the first partition error, such as
///   [`Error::ArithmeticOverflow`] or a caught [`Error::WorkerPanic`]
///
/// # Examples
///
/// ```
/// use csrmat::{spgemm_parallel, MultiplyConfig, SparseMatrixCSR};
///
/// let a = SparseMatrixCSR::from_dense_values(2, 3, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let b = SparseMatrixCSR::from_dense_values(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
///
/// let c = spgemm_parallel(&a, &b, &MultiplyConfig::default()).unwrap();
///
/// assert_eq!(c.get(0, 0).unwrap(), 10);
/// assert_eq!(c.get(1, 1).unwrap(), 40);
/// ```
#[tracing::instrument(skip_all, fields(
    left = ?(a.n_rows(), a.n_cols()),
    right = ?(b.n_rows(), b.n_cols())
))]
pub fn spgemm_parallel<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    config: &MultiplyConfig,
) -> Result<SparseMatrixCSR<T>> {
    if a.n_cols() != b.n_rows() {
        return Err(Error::DimensionMismatch {
            left_cols: a.n_cols(),
            right_rows: b.n_rows(),
        });
    }
    if config.n_threads == 0 {
        return Err(Error::InvalidConfig(
            "number of worker threads must be at least 1".to_string(),
        ));
    }

    info!("Calculation of resulting multiply matrix has been started");

    let n_threads = config.effective_threads(a.n_rows());
    let elements = if n_threads == 0 {
        Vec::new()
    } else {
        multiply_partitions(a, b, n_threads)?
    };

    let mut builder = SortedElementBuilder::new(a.n_rows(), b.n_cols());
    builder.extend(elements)?;
    let result = builder.finish();

    info!(nnz = result.nnz(), "Calculation of resulting multiply matrix has been finished");
    Ok(result)
}

/// Splits `[0, n_rows)` into `n_parts` contiguous ranges
///
/// Every range holds `n_rows / n_parts` rows except the last, which also
/// takes the remainder. `n_parts` must be in `1..=n_rows`.
pub fn partition_rows(n_rows: usize, n_parts: usize) -> Vec<Range<usize>> {
    let size = n_rows / n_parts;
    (0..n_parts)
        .map(|p| {
            let start = size * p;
            let end = if p == n_parts - 1 { n_rows } else { size * (p + 1) };
            start..end
        })
        .collect()
}

fn multiply_partitions<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    n_threads: usize,
) -> Result<Vec<Element<T>>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|idx| format!("csrmat-spgemm-{}", idx))
        .build()?;

    let partitions = partition_rows(a.n_rows(), n_threads);

    // Collecting every result first means sibling partitions always finish.
    let results: Vec<Result<Vec<Element<T>>>> = pool.install(|| {
        partitions
            .into_par_iter()
            .enumerate()
            .map(|(partition, rows)| {
                panic::catch_unwind(AssertUnwindSafe(|| multiply_rows(a, b, rows.clone())))
                    .unwrap_or_else(|payload| Err(Error::WorkerPanic(panic_message(payload))))
                    .map_err(|err| {
                        warn!(partition, ?rows, error = %err, "partition failed");
                        Error::WorkerFailure {
                            partition,
                            source: Box::new(err),
                        }
                    })
            })
            .collect()
    });

    let mut elements = Vec::new();
    for result in results {
        elements.extend(result?);
    }
    Ok(elements)
}

/// Multiplies the rows in `rows` that hold at least one entry
fn multiply_rows<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    rows: Range<usize>,
) -> Result<Vec<Element<T>>> {
    debug!(start = rows.start, end = rows.end, "Started to calculate rows");

    let mut acc = HashAccumulator::with_capacity(b.n_cols().min(1024));
    let mut elements = Vec::new();
    for i in rows.clone() {
        if a.row_has_entries(i) {
            elements.extend(multiply_row_into(i, a, b, &mut acc)?);
        }
    }

    debug!(start = rows.start, end = rows.end, nnz = elements.len(), "Finished to calculate rows");
    Ok(elements)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
