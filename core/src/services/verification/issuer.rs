//! Code issuer: reuse-or-mint decision and resend policy.

use std::sync::Arc;
use tracing;

use bms_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::code_store::CodeStore;

use super::config::VerificationConfig;
use super::types::IssuedCode;

/// Issues verification codes against recipient keys (email addresses).
///
/// The issuer only produces the code; transmitting it out-of-band is the
/// caller's responsibility.
pub struct CodeIssuer<S: CodeStore> {
    store: Arc<S>,
    config: VerificationConfig,
}

impl<S: CodeStore> CodeIssuer<S> {
    pub fn new(store: Arc<S>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Return the currently active code for the recipient, or mint a new one.
    ///
    /// Resending returns the same code with its *original* expiry: resetting
    /// the clock on every resend would give a user who mashes "resend" an
    /// unbounded validity window, while reuse keeps a hard ceiling on how
    /// long any single code can be exploited.
    ///
    /// Two near-simultaneous calls for the same key cannot leave two active
    /// codes: either the second observes the first's row via `peek_active`,
    /// or the store's atomic supersede-then-insert collapses the two puts to
    /// one active winner.
    pub async fn issue_or_resend(&self, recipient_key: &str) -> DomainResult<IssuedCode> {
        let recipient_key = normalize_email(recipient_key);
        if !is_valid_email(&recipient_key) {
            return Err(DomainError::Validation {
                message: format!("Invalid recipient key: {}", mask_email(&recipient_key)),
            });
        }

        if let Some(active) = self.store.peek_active(&recipient_key).await? {
            tracing::info!(
                recipient = %mask_email(&recipient_key),
                event = "code_reused",
                code_id = %active.id,
                expires_at = %active.expires_at,
                "Returning existing active verification code"
            );
            return Ok(IssuedCode {
                code: active.code,
                expires_at: active.expires_at,
                reused: true,
            });
        }

        let code = VerificationCode::new(recipient_key.clone(), self.config.code_ttl_seconds);
        self.store.put(&code).await?;

        tracing::info!(
            recipient = %mask_email(&recipient_key),
            event = "code_issued",
            code_id = %code.id,
            expires_at = %code.expires_at,
            "Issued new verification code"
        );

        Ok(IssuedCode {
            code: code.code,
            expires_at: code.expires_at,
            reused: false,
        })
    }
}
