//! Domain-specific error types and error handling.
//!
//! Only infrastructure-tier failures are modelled as errors here. Expected,
//! user-facing outcomes (a wrong or expired verification code, a failed
//! delivery to one notification target) are typed result values in the
//! services that produce them, never `DomainError`s.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Storage-tier failure (database unavailable, query failed). Fatal to
    /// the calling request and surfaced as retryable; never swallowed,
    /// because swallowing would let a user believe a code was issued when it
    /// wasn't.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Whether the caller may retry the originating request
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Storage { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_are_retryable() {
        let err = DomainError::Storage {
            message: "connection refused".to_string(),
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let err = DomainError::Validation {
            message: "bad recipient key".to_string(),
        };
        assert!(!err.is_retryable());
    }
}
