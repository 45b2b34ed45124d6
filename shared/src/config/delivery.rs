//! Push-delivery provider configuration

use serde::{Deserialize, Serialize};

/// Default per-attempt delivery timeout in seconds
fn default_send_timeout() -> u64 {
    10
}

/// Configuration for the push-delivery provider (FCM-style HTTP endpoint)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// HTTP endpoint messages are posted to
    pub endpoint_url: String,

    /// Server key used in the Authorization header
    pub server_key: String,

    /// Per-attempt send timeout in seconds; a timed-out attempt is recorded
    /// as failed, never left pending
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::from("https://fcm.googleapis.com/fcm/send"),
            server_key: String::new(),
            send_timeout_secs: default_send_timeout(),
        }
    }
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let endpoint_url = std::env::var("DELIVERY_ENDPOINT_URL")
            .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".to_string());
        let server_key = std::env::var("DELIVERY_SERVER_KEY").unwrap_or_default();
        let send_timeout_secs = std::env::var("DELIVERY_SEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or_else(|_| default_send_timeout());

        Self {
            endpoint_url,
            server_key,
            send_timeout_secs,
        }
    }
}
