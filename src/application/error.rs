//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                  - Validation of entities
//! ├── Infrastructure(InfrastructureError)  - Storage failures
//! ├── Validation(String)                   - Malformed request input
//! └── NotFound { resource_type, id }       - Resource not found
//! ```
//!
//! The external search never produces an `ApplicationError`: its failures
//! are absorbed into a diagnostic on the search outcome.
//!
//! # Examples
//!
//! ```
//! use quote_board::application::error::ApplicationError;
//! use quote_board::domain::DomainError;
//!
//! let err = ApplicationError::not_found("quote", "42");
//! assert!(err.is_not_found());
//!
//! let app_err: ApplicationError = DomainError::EmptyQuoteText.into();
//! assert!(app_err.is_validation());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from validation rules.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Request input could not be interpreted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::Infrastructure(InfrastructureError::Repository(err))
    }
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
