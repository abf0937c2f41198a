//! Error types for path parsing and access.

use thiserror::Error;

use crate::field::FieldName;

/// Raised while scanning a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The path expression was the empty string.
    #[error("path expression must not be empty")]
    Empty,
    /// A `]` was followed by something other than `.` or `[`.
    #[error("Expected '.' or '[' after ']'; got '{found}'")]
    UnexpectedAfterBracket { position: usize, found: char },
}

/// Raised while walking a target structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A field was read from, or written into, an absent or `null` value.
    #[error("cannot access field '{field}' of undefined value")]
    AccessOnUndefined { field: FieldName },
    /// The cursor holds a value that cannot take this field.
    #[error("cannot assign field '{field}' on {found} value")]
    NotAssignable { field: FieldName, found: &'static str },
    /// Writing at this index would add more than `limit` slots to the array.
    #[error("array index '{field}' is too far past the end (limit {limit} new slots per write)")]
    IndexOutOfRange { field: FieldName, limit: usize },
}

/// Umbrella error for the one-shot helpers that parse and access in one call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl AccessError {
    pub fn on_undefined(field: &FieldName) -> Self {
        AccessError::AccessOnUndefined { field: field.clone() }
    }
}
