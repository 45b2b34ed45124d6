//! # Infrastructure Layer
//!
//! Concrete implementations behind the domain's storage and delivery
//! abstractions:
//! - **Database**: MySQL repositories using SQLx
//! - **Push**: delivery providers for the notification dispatcher (FCM
//!   over HTTP, plus an in-memory mock for development)

use bms_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Push delivery module - channel providers for notifications
pub mod push;

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlAccountDirectory, MySqlCaseRepository, MySqlCodeStore};
pub use push::{FcmHttpProvider, MockPushProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Push delivery error
    #[error("Push delivery error: {0}")]
    Push(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }
}

/// Map an SQLx error at a repository boundary to the domain's storage error
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("{}: {}", context, err),
    }
}
