//! Database module - MySQL implementations using SQLx
//!
//! Provides the connection pool and the repository implementations backing
//! the domain's storage traits.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlAccountDirectory, MySqlCaseRepository, MySqlCodeStore};
