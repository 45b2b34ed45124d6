//! Verification code entity for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Size of the code space (6 digits). Together with the TTL below this is
/// the documented input to the external rate-limit policy on verification
/// attempts.
pub const CODE_SPACE: u32 = 1_000_000;

/// Default time-to-live for verification codes (10 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 600;

/// A time-bound, single-use verification code issued against a recipient key
/// (an email address).
///
/// Rows are never deleted: consumption stamps `consumed_at`, and issuing a
/// newer code for the same recipient stamps `superseded_at` on the old row.
/// The preserved rows form an audit trail that makes replay attempts
/// detectable after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the code row
    pub id: Uuid,

    /// Recipient key the code was issued against (email address)
    pub recipient_key: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of successful consumption, if any. Set exactly once.
    pub consumed_at: Option<DateTime<Utc>>,

    /// Timestamp when a newer code for the same recipient replaced this one
    pub superseded_at: Option<DateTime<Utc>>,
}

impl VerificationCode {
    /// Create a new code with a cryptographically secure random value and
    /// the given time-to-live.
    pub fn new(recipient_key: impl Into<String>, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            recipient_key: recipient_key.into(),
            code: Self::generate_code(),
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
            consumed_at: None,
            superseded_at: None,
        }
    }

    /// Generate a cryptographically secure random 6-digit code.
    ///
    /// Uses the OS CSPRNG; a fixed 6-digit space is large enough to resist
    /// online guessing within the TTL window combined with the external
    /// attempt rate limit.
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias over a 6-digit space is negligible
        format!("{:06}", num % CODE_SPACE)
    }

    /// Whether the code is expired at the given instant (`now >= expires_at`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the code is expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the code is active (unconsumed, unsuperseded, unexpired) at
    /// the given instant. At most one active code may exist per recipient
    /// key; the code store enforces that on insert.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none() && self.superseded_at.is_none() && !self.is_expired_at(now)
    }

    /// Whether the code is active right now
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Constant-time comparison against a submitted code.
    ///
    /// Prevents timing attacks from leaking how many leading digits of a
    /// guess were correct.
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}
