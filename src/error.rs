//! Error taxonomy shared by every array operation.
//!
//! All checks happen before the first sample is written, so an operation that
//! returns an error leaves the array untouched.
use crate::array::DataType;

/// Errors raised by [`Array`](crate::Array) construction, indexing and
/// masked assignment.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// Zero or overflowing sizes, zero channels, or an invalid reshaping request.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Operand sizes (or channel counts) disagree.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A slice bound, coordinate or tensor element index falls outside the array.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// A value sequence does not hold as many samples as the target selection.
    #[error("length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Metadata is incompatible with the array it is attached to.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The array holds a different sample type than the one requested.
    #[error("data type mismatch: expected {expected}, found {found}")]
    DataTypeMismatch { expected: DataType, found: DataType },
}

/// Result alias for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;
