//! Repository interfaces (and in-memory implementations for testing)
//!
//! Traits define the storage contract; concrete MySQL implementations live
//! in the infrastructure crate.

pub mod account_directory;
pub mod case_repository;
pub mod code_store;

pub use account_directory::{AccountDirectory, MockAccountDirectory};
pub use case_repository::{CaseRepository, MockCaseRepository};
pub use code_store::{CodeStore, ConsumeOutcome, MemoryCodeStore};
