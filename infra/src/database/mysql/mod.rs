//! MySQL repository implementations

pub mod account_directory_impl;
pub mod case_repository_impl;
pub mod code_store_impl;

pub use account_directory_impl::MySqlAccountDirectory;
pub use case_repository_impl::MySqlCaseRepository;
pub use code_store_impl::MySqlCodeStore;
