//! Error types for ordering domain validation.

use thiserror::Error;

/// Errors returned while constructing ordering values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingDomainError {
    /// The work context name is empty after trimming.
    #[error("work context must not be empty")]
    EmptyWorkContext,

    /// The work context contains characters not allowed in storage keys.
    #[error("invalid work context '{0}', expected ASCII letters, digits, '-', '_' or '.'")]
    InvalidWorkContext(String),
}

/// Error returned while parsing a stored view mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown view mode: {0}")]
pub struct ParseViewModeError(pub String);
