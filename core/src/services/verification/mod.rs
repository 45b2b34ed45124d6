//! Verification code workflow for email verification and password reset.
//!
//! Two cooperating services over one code store:
//! - [`CodeIssuer`] decides between reusing the active code and minting a
//!   fresh one, and enforces the resend policy (resend never extends expiry).
//! - [`CodeVerifier`] validates a submitted code, reports a precise
//!   rejection reason, and consumes exactly once before the gated side
//!   effect runs.
//!
//! Transmitting the code out-of-band (email) is the caller's concern; code
//! generation stays testable without network I/O.

mod config;
mod issuer;
mod types;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use issuer::CodeIssuer;
pub use types::{IssuedCode, RejectReason, VerifyOutcome};
pub use verifier::CodeVerifier;
