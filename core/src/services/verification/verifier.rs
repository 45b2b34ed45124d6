//! Code verifier: classify a submitted code and consume exactly once.

use chrono::Utc;
use std::sync::Arc;
use tracing;

use bms_shared::utils::email::{mask_email, normalize_email};

use crate::errors::DomainResult;
use crate::repositories::code_store::{CodeStore, ConsumeOutcome};

use super::types::{RejectReason, VerifyOutcome};

/// Validates user-submitted codes against the store.
///
/// A rejection carries a precise reason so the caller can tell the user
/// whether to request a new code (`expired`, `already_used`) or re-check
/// what they typed (`not_found`).
pub struct CodeVerifier<S: CodeStore> {
    store: Arc<S>,
}

impl<S: CodeStore> CodeVerifier<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Classify a submitted code without consuming it.
    ///
    /// On `Accepted`, the caller must `consume` the returned id and check
    /// the outcome before performing the gated side effect; only a fresh
    /// `Consumed` authorizes it. [`verify_and_consume`] packages that
    /// ordering.
    ///
    /// [`verify_and_consume`]: CodeVerifier::verify_and_consume
    pub async fn verify(&self, recipient_key: &str, submitted: &str) -> DomainResult<VerifyOutcome> {
        let recipient_key = normalize_email(recipient_key);

        let row = match self.store.latest_for_recipient(&recipient_key).await? {
            Some(row) => row,
            None => return Ok(self.rejected(&recipient_key, RejectReason::NotFound)),
        };

        // Constant-time comparison; a mismatch is indistinguishable from a
        // never-issued code
        if !row.matches(submitted) {
            return Ok(self.rejected(&recipient_key, RejectReason::NotFound));
        }

        // A superseded code was replaced by a newer issue; treat it like the
        // miss it is, the row only remains for audit
        if row.superseded_at.is_some() {
            return Ok(self.rejected(&recipient_key, RejectReason::NotFound));
        }

        if row.is_expired_at(Utc::now()) {
            return Ok(self.rejected(&recipient_key, RejectReason::Expired));
        }

        if row.consumed_at.is_some() {
            return Ok(self.rejected(&recipient_key, RejectReason::AlreadyUsed));
        }

        tracing::info!(
            recipient = %mask_email(&recipient_key),
            event = "code_accepted",
            code_id = %row.id,
            "Verification code accepted"
        );
        Ok(VerifyOutcome::Accepted { code_id: row.id })
    }

    /// Verify and consume in one call: the consume-then-act sequence that
    /// keeps duplicate submissions (double-tap, retried request) safe.
    ///
    /// Of N concurrent callers submitting the same valid code, exactly one
    /// observes `Accepted` here; the rest see `Rejected(AlreadyUsed)` and
    /// must not run the gated side effect.
    pub async fn verify_and_consume(
        &self,
        recipient_key: &str,
        submitted: &str,
    ) -> DomainResult<VerifyOutcome> {
        match self.verify(recipient_key, submitted).await? {
            VerifyOutcome::Accepted { code_id } => {
                match self.store.consume(code_id).await? {
                    ConsumeOutcome::Consumed => Ok(VerifyOutcome::Accepted { code_id }),
                    // Lost the race against a concurrent duplicate
                    ConsumeOutcome::AlreadyConsumed => Ok(self.rejected(
                        &normalize_email(recipient_key),
                        RejectReason::AlreadyUsed,
                    )),
                }
            }
            rejected => Ok(rejected),
        }
    }

    fn rejected(&self, recipient_key: &str, reason: RejectReason) -> VerifyOutcome {
        tracing::warn!(
            recipient = %mask_email(recipient_key),
            event = "code_rejected",
            reason = reason.as_str(),
            "Verification code rejected"
        );
        VerifyOutcome::Rejected(reason)
    }
}
