//! Trait for delivery-provider integration

use async_trait::async_trait;

use crate::domain::entities::notification::Message;

/// Trait for the external delivery transport (push notification, SMS or
/// email; channel-agnostic from the dispatcher's view).
#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    /// Deliver one message to one endpoint. Returns the provider's message
    /// id on success, or a human-readable failure reason.
    async fn send(&self, endpoint: &str, message: &Message) -> Result<String, String>;

    /// Name of the delivery provider (e.g. "FCM", "Mock")
    fn provider_name(&self) -> &str;
}
