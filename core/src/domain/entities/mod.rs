//! Domain entities

pub mod account;
pub mod case_record;
pub mod notification;
pub mod verification_code;

pub use account::{Account, AccountRole};
pub use case_record::{CaseRecord, CaseStatus};
pub use notification::{
    BroadcastAudience, CaseEvent, DeliveryAttempt, DeliveryOutcome, DeliveryReport, Message,
    NotificationTarget, TargetRole,
};
pub use verification_code::VerificationCode;
