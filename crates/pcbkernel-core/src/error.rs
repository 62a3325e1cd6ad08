//! Error taxonomy shared by every layer of the kernel.

use thiserror::Error;

/// Result type returned by fallible kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

/// The small, flat error taxonomy described by the file format and numeric-type
/// invariants. Every variant is a machine-checkable tag plus a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// A refined-type predicate failed (negative length, angle out of range, ratio > 100%).
    #[error("invalid value ({kind}): {message}")]
    InvalidValue { kind: String, message: String },

    /// Integer parsing overflowed the backing type.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A decimal string could not be parsed as a number.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Malformed S-expression or a required child is missing.
    #[error("invalid s-expression: {0}")]
    InvalidSExpression(String),

    /// A token does not map to any known enum variant.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// `get(uuid|name)` against a list without such an element.
    #[error("not found: {0}")]
    NotFound(String),

    /// Programmer error: internal invariant violated, unexpected variant reached.
    #[error("logic error: {0}")]
    LogicError(String),

    /// External failure: file missing, image unreadable, unsupported format.
    #[error("runtime error: {0}")]
    RuntimeError(String),
}

impl KernelError {
    pub fn invalid_value(kind: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::InvalidValue {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        KernelError::NotFound(message.into())
    }

    pub fn logic_error(message: impl Into<String>) -> Self {
        KernelError::LogicError(message.into())
    }
}
