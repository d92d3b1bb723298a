//! Error types for formatting.

use thiserror::Error;

/// Result type alias for formatting operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while formatting values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Format specifier '{spec}' is not valid for a value of type {kind}")]
    InvalidSpecifier { spec: String, kind: &'static str },

    #[error("Index {index} is out of range for {count} argument(s)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Malformed format string at position {position}: {message}")]
    Malformed { position: usize, message: String },
}

impl FormatError {
    pub(crate) fn invalid(spec: &str, kind: &'static str) -> Self {
        Self::InvalidSpecifier {
            spec: spec.to_string(),
            kind,
        }
    }

    pub(crate) fn malformed(position: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }
}
