//! Code store trait: durable key-value-with-expiry storage for verification
//! codes.
//!
//! The single-active-code invariant is enforced here, at the storage
//! boundary, not assumed by callers: `put` atomically supersedes whatever was
//! active for the same recipient key before inserting. Rows are never
//! deleted, so replayed codes remain visible for audit.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainResult;

/// Result of an idempotent consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// This call stamped `consumed_at`; the caller owns the gated side effect
    Consumed,
    /// The code was already consumed by an earlier (possibly concurrent)
    /// call; the side effect must not run again
    AlreadyConsumed,
}

/// Storage contract for verification codes.
///
/// Storage unavailability surfaces as `DomainError::Storage` and is fatal to
/// the calling request.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Insert a new code, logically invalidating (superseding) any prior
    /// unconsumed code for the same recipient key.
    ///
    /// The supersede-then-insert must be atomic with respect to concurrent
    /// `put`s and `consume`s for the same key: two concurrent `put`s leave
    /// exactly one active winner visible to subsequent reads.
    async fn put(&self, code: &VerificationCode) -> DomainResult<()>;

    /// Most recent code row issued for the key, regardless of state.
    ///
    /// The verifier needs expired and consumed rows too, to report a precise
    /// rejection reason instead of a generic miss.
    async fn latest_for_recipient(
        &self,
        recipient_key: &str,
    ) -> DomainResult<Option<VerificationCode>>;

    /// Idempotent consumption of a code row.
    ///
    /// Exactly one caller ever observes `Consumed` for a given id; a retried
    /// request racing with itself gets `AlreadyConsumed` and must not
    /// re-trigger side effects. An unknown id is a `NotFound` error.
    async fn consume(&self, code_id: Uuid) -> DomainResult<ConsumeOutcome>;

    /// Current active (unconsumed, unsuperseded, unexpired) code for the
    /// key, if any. Used by the resend path; does not consume.
    async fn peek_active(&self, recipient_key: &str) -> DomainResult<Option<VerificationCode>>;

    /// Active code matching `code` exactly, if any.
    async fn lookup(
        &self,
        recipient_key: &str,
        code: &str,
    ) -> DomainResult<Option<VerificationCode>> {
        Ok(self
            .latest_for_recipient(recipient_key)
            .await?
            .filter(|row| row.is_active() && row.matches(code)))
    }
}
