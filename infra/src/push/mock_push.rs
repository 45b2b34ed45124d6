//! Mock push provider for development and testing.
//!
//! Logs messages instead of sending them and counts deliveries, so the
//! whole notification path can run without gateway credentials.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use bms_core::domain::entities::notification::Message;
use bms_core::services::notification::DeliveryProvider;

/// Mock push provider
#[derive(Clone)]
pub struct MockPushProvider {
    message_count: Arc<AtomicU64>,
    simulate_failure: bool,
}

impl MockPushProvider {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Mock that fails every send, for exercising failure handling
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockPushProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryProvider for MockPushProvider {
    async fn send(&self, endpoint: &str, message: &Message) -> Result<String, String> {
        if self.simulate_failure {
            warn!(endpoint, "Mock push provider simulating failure");
            return Err("simulated delivery failure".to_string());
        }

        self.message_count.fetch_add(1, Ordering::SeqCst);
        let message_id = format!("mock-{}", Uuid::new_v4());

        info!(
            endpoint,
            title = %message.title,
            message_id = %message_id,
            "Mock push delivered"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "MockPush"
    }
}
