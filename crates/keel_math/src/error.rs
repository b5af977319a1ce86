//! Error types for the math kernel

use thiserror::Error;

/// Math kernel errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Matrix element access with an invalid row/column pair
    #[error("matrix index out of range: row {row}, column {col}")]
    IndexOutOfRange { row: usize, col: usize },

    /// Matrix column access with an invalid column index
    #[error("column index out of range: {0}")]
    ColumnOutOfRange(usize),

    /// Triangle vertex access with an invalid vertex index
    #[error("vertex index out of range: {0} (valid: 0..=2)")]
    VertexOutOfRange(usize),

    /// Trig table resolution that cannot be wrapped with a bitmask
    #[error("trig table resolution must be a power of two, got {0}")]
    NotPowerOfTwo(usize),
}

/// Result type for math operations
pub type Result<T> = core::result::Result<T, MathError>;
