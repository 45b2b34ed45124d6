//! # Blotter Backend Core
//!
//! Core business logic and domain layer for the blotter case-tracking
//! backend. This crate contains the two subsystems with real invariants:
//! time-bound single-use verification codes (email verification, password
//! reset) and the role-based notification fan-out engine that pushes
//! case-lifecycle events to complainants, respondents, officers and admins.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, AccountRole, BroadcastAudience, CaseEvent, CaseRecord, CaseStatus, DeliveryAttempt,
    DeliveryOutcome, DeliveryReport, Message, NotificationTarget, TargetRole, VerificationCode,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    AccountDirectory, CaseRepository, CodeStore, ConsumeOutcome, MemoryCodeStore,
    MockAccountDirectory, MockCaseRepository,
};
pub use services::{
    CodeIssuer, CodeVerifier, DeliveryDispatcher, DeliveryProvider, MessageComposer,
    RecipientResolver, VerificationConfig,
};
