//! Configuration for the verification code services

use crate::domain::entities::verification_code::DEFAULT_TTL_SECONDS;

/// Configuration for issuing and verifying codes.
///
/// The code length and space are domain constants on the entity
/// (`CODE_LENGTH`, `CODE_SPACE`), not tunables.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Seconds before a newly issued code expires. Fixed at issue time;
    /// resending never resets the clock.
    pub code_ttl_seconds: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}
