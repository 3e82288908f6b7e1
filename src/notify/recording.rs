// Recording Notification Channel - keeps deliveries in memory

use super::{Notification, NotificationChannel};
use crate::error::DeliveryError;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Channel that stores every notification instead of sending it
///
/// Used for dry runs and tests. Optionally fails every delivery to exercise
/// the best-effort path.
#[derive(Default)]
pub struct RecordingChannel {
    delivered: Mutex<Vec<(String, Notification)>>,
    fail_with_status: Option<u16>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel whose deliveries are all rejected with `status`
    pub fn failing(status: u16) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail_with_status: Some(status),
        }
    }

    /// `(endpoint, notification)` pairs accepted so far, in order
    pub async fn delivered(&self) -> Vec<(String, Notification)> {
        self.delivered.lock().await.clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn deliver(
        &self,
        endpoint: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        if let Some(status) = self.fail_with_status {
            return Err(DeliveryError::Rejected {
                status,
                body: "recording channel configured to fail".to_string(),
            });
        }

        self.delivered
            .lock()
            .await
            .push((endpoint.to_string(), notification.clone()));
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "recording"
    }
}
