//! FCM HTTP delivery provider.
//!
//! Posts composed messages to an FCM-style gateway. The gateway request
//! carries both the human-readable notification block and the structured
//! `data` payload so clients can route without parsing the body.
//!
//! Device tokens are masked in logs.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use bms_core::domain::entities::notification::Message;
use bms_core::services::notification::DeliveryProvider;
use bms_shared::config::DeliveryConfig;

use crate::InfrastructureError;

/// Mask a device token for logging, keeping only a short prefix
fn mask_token(token: &str) -> String {
    // Counted in characters, not bytes, so multi-byte tokens never split
    if token.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(8).collect();
    format!("{}***", prefix)
}

/// FCM delivery provider over plain HTTP
pub struct FcmHttpProvider {
    client: reqwest::Client,
    config: DeliveryConfig,
}

impl FcmHttpProvider {
    pub fn new(config: DeliveryConfig) -> Result<Self, InfrastructureError> {
        if config.server_key.is_empty() {
            return Err(InfrastructureError::Config(
                "DELIVERY_SERVER_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.send_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        Ok(Self { client, config })
    }

    /// Load configuration from the environment and build the provider
    pub fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();
        Self::new(DeliveryConfig::from_env())
    }

    /// Gateway request body for one target
    fn build_payload(endpoint: &str, message: &Message) -> Value {
        json!({
            "to": endpoint,
            "notification": {
                "title": message.title,
                "body": message.body,
            },
            "data": message.payload,
        })
    }
}

#[async_trait]
impl DeliveryProvider for FcmHttpProvider {
    async fn send(&self, endpoint: &str, message: &Message) -> Result<String, String> {
        let payload = Self::build_payload(endpoint, message);

        debug!(
            token = %mask_token(endpoint),
            title = %message.title,
            "Posting push notification to gateway"
        );

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header(
                "Authorization",
                format!("key={}", self.config.server_key),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("gateway request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                token = %mask_token(endpoint),
                status = %status,
                "Push gateway returned an error status"
            );
            return Err(format!("gateway returned status {}", status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("invalid gateway response: {}", e))?;

        // Legacy FCM reports per-token results even on HTTP 200
        if body.get("failure").and_then(Value::as_i64).unwrap_or(0) > 0 {
            let reason = body["results"][0]["error"]
                .as_str()
                .unwrap_or("unknown gateway error");
            return Err(format!("gateway rejected message: {}", reason));
        }

        let message_id = body["results"][0]["message_id"]
            .as_str()
            .map(str::to_string)
            .or_else(|| body.get("multicast_id").map(|id| id.to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "FCM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> Message {
        Message {
            title: "Status Update".to_string(),
            body: "Case #BLT-2025-0042 is now Resolved".to_string(),
            payload: json!({
                "type": "status_update",
                "case_id": 42,
                "case_number": "BLT-2025-0042",
                "old_status": "Under Investigation",
                "new_status": "Resolved",
            }),
        }
    }

    #[test]
    fn test_build_payload_shape() {
        let payload = FcmHttpProvider::build_payload("device-token-1", &sample_message());

        assert_eq!(payload["to"], "device-token-1");
        assert_eq!(payload["notification"]["title"], "Status Update");
        assert_eq!(
            payload["notification"]["body"],
            "Case #BLT-2025-0042 is now Resolved"
        );
        assert_eq!(payload["data"]["type"], "status_update");
        assert_eq!(payload["data"]["case_id"], 42);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghij"), "abcdefgh***");
        assert_eq!(mask_token("short"), "***");
    }

    #[test]
    fn test_mask_token_multibyte() {
        // A multi-byte character straddling the prefix cut must not panic
        assert_eq!(mask_token("aaaaaaaé0123456"), "aaaaaaaé***");
        assert_eq!(mask_token("ééééééééé"), "éééééééé***");
        assert_eq!(mask_token("ééé"), "***");
    }

    #[test]
    fn test_missing_server_key_is_rejected() {
        let config = DeliveryConfig {
            server_key: String::new(),
            ..DeliveryConfig::default()
        };
        assert!(matches!(
            FcmHttpProvider::new(config),
            Err(InfrastructureError::Config(_))
        ));
    }
}
