//! Shared utilities and configuration for the blotter backend
//!
//! This crate provides common functionality used across the server modules:
//! - Configuration types (database, push delivery)
//! - Recipient-key validation and masking utilities

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, DeliveryConfig};
pub use utils::email;
