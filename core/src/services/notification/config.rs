//! Configuration for the delivery dispatcher

use std::time::Duration;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound on one delivery attempt. A timed-out attempt is recorded
    /// as failed with reason "timeout", never left pending.
    pub send_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(10),
        }
    }
}

impl DispatchConfig {
    pub fn with_send_timeout(timeout: Duration) -> Self {
        Self {
            send_timeout: timeout,
        }
    }
}
