//! Errors raised while tokenizing, parsing or decoding S-expressions.

use thiserror::Error;

/// Result type returned by fallible codec operations.
pub type SExprResult<T> = Result<T, SExprError>;

/// A location in the source text, for error reporting. 1-based, matching
/// the convention editors use when they jump to an offending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The codec's own error taxonomy. `InvalidValue`/`OutOfRange`/`InvalidNumber`
/// wrap the same-named [`pcbkernel_core::KernelError`] variants raised by a
/// refined-type or numeric-type constructor while decoding one of its fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SExprError {
    #[error("{location}: malformed s-expression: {message}")]
    Malformed { location: Location, message: String },

    #[error("{location}: unexpected end of input while reading {context}")]
    UnexpectedEof { location: Location, context: String },

    #[error("{location}: expected list tagged '{expected}', found '{found}'")]
    UnknownToken {
        location: Location,
        expected: String,
        found: String,
    },

    #[error("{location}: missing required child '{name}' in '{parent}'")]
    MissingChild {
        location: Location,
        parent: String,
        name: String,
    },

    #[error("{location}: duplicate uuid {uuid} in '{parent}'")]
    DuplicateUuid {
        location: Location,
        parent: String,
        uuid: String,
    },

    #[error("{location}: invalid value: {message}")]
    InvalidValue { location: Location, message: String },

    #[error("{location}: value out of range: {message}")]
    OutOfRange { location: Location, message: String },

    #[error("{location}: invalid number: {message}")]
    InvalidNumber { location: Location, message: String },
}

impl SExprError {
    pub fn malformed(location: Location, message: impl Into<String>) -> Self {
        SExprError::Malformed { location, message: message.into() }
    }

    pub fn missing_child(location: Location, parent: impl Into<String>, name: impl Into<String>) -> Self {
        SExprError::MissingChild { location, parent: parent.into(), name: name.into() }
    }

    /// Wraps a [`pcbkernel_core::KernelError`] raised by a field constructor
    /// while decoding, attaching the location of the s-expression node that
    /// produced the bad value.
    pub fn from_kernel_error(location: Location, err: pcbkernel_core::KernelError) -> Self {
        use pcbkernel_core::KernelError;
        match err {
            KernelError::InvalidValue { kind, message } => {
                SExprError::InvalidValue { location, message: format!("{kind}: {message}") }
            }
            KernelError::OutOfRange(message) => SExprError::OutOfRange { location, message },
            KernelError::InvalidNumber(message) => SExprError::InvalidNumber { location, message },
            KernelError::UnknownToken(message) => {
                SExprError::UnknownToken { location, expected: String::new(), found: message }
            }
            other => SExprError::Malformed { location, message: other.to_string() },
        }
    }
}
