//! Configuration module with business-specific sub-modules
//!
//! Configuration is organized by concern:
//! - `database` - MySQL connection and pool configuration
//! - `delivery` - Push-delivery provider configuration

pub mod database;
pub mod delivery;

pub use database::DatabaseConfig;
pub use delivery::DeliveryConfig;
