//! Email address utilities
//!
//! Verification codes are keyed by email address (the recipient key), so the
//! same validation and masking helpers are needed wherever a recipient key
//! crosses a boundary or ends up in a log line.

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check; full RFC 5322 validation is the mail
// provider's problem.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address (trim and lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&normalize_email(email))
}

/// Mask an email address for logging (e.g. `a***@x.com`)
///
/// Only the first character of the local part survives; recipient keys must
/// never appear unmasked in logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
