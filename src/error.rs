//! Error handling for the capital gains engine
//!
//! Defines the domain error kinds produced while validating operations and
//! applying them to a portfolio. Errors are plain values threaded through
//! the batch fold; the binary layer wraps I/O faults with anyhow.

use thiserror::Error;

/// Error kinds for operation validation and portfolio transitions
///
/// Every variant is deterministic and caused by input content; there are no
/// transient or retryable faults in this domain. Any of these aborts the
/// batch that produced it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// The `"operation"` field is missing or is neither `"buy"` nor `"sell"`.
    #[error("invalid operation type")]
    InvalidOperationType,

    /// The `"quantity"` field is missing, non-integer, zero, or negative.
    #[error("invalid quantity")]
    InvalidQuantity,

    /// The `"unit-cost"` field is missing, negative, or non-numeric.
    #[error("invalid amount")]
    InvalidAmount,

    /// A sell requested more shares than currently held.
    #[error("insufficient position")]
    InsufficientPosition,
}

/// Result type alias for core engine operations
pub type Result<T> = std::result::Result<T, OperationError>;
