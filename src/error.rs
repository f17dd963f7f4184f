//! Error types for csrmat

use thiserror::Error;

/// Result type alias using csrmat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, reading or multiplying matrices
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup beyond the declared matrix bounds
    #[error("Index ({row}, {column}) out of range for a {n_rows} × {n_cols} matrix")]
    IndexOutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
        /// Number of rows in the matrix
        n_rows: usize,
        /// Number of columns in the matrix
        n_cols: usize,
    },

    /// Operand shapes cannot be multiplied
    #[error(
        "Number of columns of the left matrix ({left_cols}) must equal number of rows of the right matrix ({right_rows})"
    )]
    DimensionMismatch {
        /// Columns of the left operand
        left_cols: usize,
        /// Rows of the right operand
        right_rows: usize,
    },

    /// Sorted element source is not in ascending (row, column) order
    #[error("Element ({row}, {column}) arrived after ({previous_row}, {previous_column})")]
    OrderViolation {
        /// Row of the offending element
        row: usize,
        /// Column of the offending element
        column: usize,
        /// Row of the element accepted before it
        previous_row: usize,
        /// Column of the element accepted before it
        previous_column: usize,
    },

    /// Storage would have to grow beyond the supported number of nonzeros
    #[error("Sparse matrix cannot hold more than {limit} non-zero elements")]
    CapacityExceeded {
        /// The maximum number of stored entries
        limit: usize,
    },

    /// A multiply partition task failed
    #[error("Error occurred during calculation of rows in partition {partition}")]
    WorkerFailure {
        /// Index of the failed partition
        partition: usize,
        /// The error raised inside the partition
        #[source]
        source: Box<Error>,
    },

    /// A multiply partition task panicked
    #[error("Worker panicked: {0}")]
    WorkerPanic(String),

    /// Element handed to a builder lies outside the declared dimensions
    #[error("Element ({row}, {column}) lies outside a {n_rows} × {n_cols} matrix")]
    ElementOutOfBounds {
        /// Row of the element
        row: usize,
        /// Column of the element
        column: usize,
        /// Declared number of rows
        n_rows: usize,
        /// Declared number of columns
        n_cols: usize,
    },

    /// Dense stream did not hold exactly the declared number of values
    #[error("Dense stream holds {actual} values, expected {expected}")]
    StreamLength {
        /// Number of values the header announced
        expected: usize,
        /// Number of values actually seen (saturates at expected + 1)
        actual: usize,
    },

    /// Dimension value is negative or not representable in the scalar type
    #[error("Invalid matrix dimension: {0}")]
    InvalidDimension(String),

    /// A product entry does not fit in the scalar type
    #[error("Arithmetic overflow while computing entry ({row}, {column})")]
    ArithmeticOverflow {
        /// Row of the result entry
        row: usize,
        /// Column of the result entry
        column: usize,
    },

    /// Raw CSR parts violate a storage invariant
    #[error("Invalid CSR structure: {0}")]
    InvalidStructure(String),

    /// Multiply configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
