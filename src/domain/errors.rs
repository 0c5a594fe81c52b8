//! # Domain Errors
//!
//! Validation failures raised while constructing domain entities.

use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Quote text was empty or whitespace only.
    #[error("quote text must not be empty")]
    EmptyQuoteText,

    /// A field exceeded its maximum length.
    #[error("{field} exceeds {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
