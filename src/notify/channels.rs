// Notification Channel Trait

use super::Notification;
use crate::error::DeliveryError;
use async_trait::async_trait;

/// Delivery transport for rendered notifications
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver one notification to `endpoint`
    ///
    /// The endpoint is resolved by the caller once per batch and may be empty
    /// when resolution failed.
    async fn deliver(&self, endpoint: &str, notification: &Notification)
    -> Result<(), DeliveryError>;

    /// Get the channel name for logging
    fn channel_name(&self) -> &str;
}
