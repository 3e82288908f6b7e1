// Slack Notification Channel - incoming webhook integration

use super::{Notification, NotificationChannel};
use crate::error::DeliveryError;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use std::time::Duration;

/// Posts notifications to a Slack incoming webhook
pub struct SlackWebhookChannel {
    client: reqwest::Client,
}

impl SlackWebhookChannel {
    /// Create new Slack channel with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Webhook body for a notification
    fn format_message(&self, notification: &Notification) -> serde_json::Value {
        json!({ "text": notification.text })
    }
}

#[async_trait]
impl NotificationChannel for SlackWebhookChannel {
    async fn deliver(
        &self,
        endpoint: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let url = Url::parse(endpoint).map_err(|_| DeliveryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        })?;

        let response = self
            .client
            .post(url)
            .json(&self.format_message(notification))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "slack"
    }
}
