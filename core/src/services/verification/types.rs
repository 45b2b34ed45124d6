//! Result types for the verification services

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of `issue_or_resend`: the code to transmit out-of-band and its
/// (original) expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// True when an already-active code was returned instead of a fresh one
    pub reused: bool,
}

/// Why a submitted code was rejected. Expected, user-facing outcomes:
/// surfaced as values so the caller can choose precise UI messaging
/// ("request a new code" vs. "re-check what you typed").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No live code row matches the recipient key and submitted code
    NotFound,
    /// A matching code exists but its time-to-live has elapsed
    Expired,
    /// A matching code exists but was already consumed once
    AlreadyUsed,
}

impl RejectReason {
    /// Stable machine-readable reason string
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NotFound => "not_found",
            RejectReason::Expired => "expired",
            RejectReason::AlreadyUsed => "already_used",
        }
    }
}

/// Result of verifying a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code accepted; `code_id` must be consumed before the gated side
    /// effect runs
    Accepted { code_id: Uuid },
    Rejected(RejectReason),
}

impl VerifyOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerifyOutcome::Accepted { .. })
    }
}
