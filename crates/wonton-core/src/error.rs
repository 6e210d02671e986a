//! Error types for tensor operations
//!
//! Every failure in wonton-core is a precondition violation detected at the
//! call site. Nothing is retried or recovered internally; errors propagate to
//! the caller through [`TensorResult`].
//!
//! # Examples
//!
//! ```
//! use wonton_core::error::{TensorError, TensorResult};
//!
//! fn check_rank(shape: &[usize]) -> TensorResult<()> {
//!     if shape.is_empty() || shape.len() > 3 {
//!         return Err(TensorError::invalid_shape(shape, "rank must be 1, 2 or 3"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rank(&[2, 3]).is_ok());
//! assert!(matches!(check_rank(&[]), Err(TensorError::InvalidShape { .. })));
//! ```

use thiserror::Error;

/// Errors raised by [`Tensor`](crate::Tensor) and [`Cube`](crate::Cube) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The operation needs an allocated buffer but the tensor is empty
    #[error("Empty tensor: '{op}' requires an allocated buffer")]
    EmptyTensor {
        /// Name of the rejected operation
        op: &'static str,
    },

    /// Shape has the wrong rank or contains a zero-sized dimension
    #[error("Invalid shape {shape:?}: {reason}")]
    InvalidShape {
        /// The rejected shape
        shape: Vec<usize>,
        /// Why it was rejected
        reason: String,
    },

    /// An element count disagrees with the tensor size
    #[error("Size mismatch: expected {expected} elements, got {got}")]
    SizeMismatch {
        /// Element count the tensor requires
        expected: usize,
        /// Element count that was supplied
        got: usize,
    },

    /// Flat or (channel, row, col) access beyond the tensor bounds
    #[error("Index out of range: index {index:?} exceeds bounds {bounds:?}")]
    IndexOutOfRange {
        /// The rejected index
        index: Vec<usize>,
        /// Exclusive upper bound of each coordinate
        bounds: Vec<usize>,
    },

    /// An argument list has the wrong length or content
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument name
        arg: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type alias for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    /// Create an empty-tensor error for the named operation
    pub fn empty(op: &'static str) -> Self {
        TensorError::EmptyTensor { op }
    }

    /// Create an invalid-shape error
    pub fn invalid_shape(shape: &[usize], reason: impl Into<String>) -> Self {
        TensorError::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create a size-mismatch error
    pub fn size_mismatch(expected: usize, got: usize) -> Self {
        TensorError::SizeMismatch { expected, got }
    }

    /// Create an index-out-of-range error
    pub fn out_of_range(index: &[usize], bounds: &[usize]) -> Self {
        TensorError::IndexOutOfRange {
            index: index.to_vec(),
            bounds: bounds.to_vec(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        TensorError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
