// Notifications - message formatting and delivery channels
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

pub mod channels;
pub mod recording;
pub mod slack;

use crate::certificates::CertificateSummary;
use crate::constants::NOTIFICATION_TITLE;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use channels::NotificationChannel;
pub use recording::RecordingChannel;
pub use slack::SlackWebhookChannel;

/// Rendered alert for one stored certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Object key the certificate was read from
    pub key: String,
    /// Plain-text payload handed to the transport
    pub text: String,
}

/// Render the notification for `key`
///
/// Pure and deterministic; escaping for the transport is the channel's job.
pub fn format(key: &str, summary: &CertificateSummary) -> Notification {
    let text = format!(
        "{title}\n\n\
         Key: {key}\n\
         DNS Names: {dns_names}\n\
         Not Before: {not_before}\n\
         Not After: {not_after}\n\n\
         Certificate Details:\n\
         ```{details}```",
        title = NOTIFICATION_TITLE,
        key = key,
        dns_names = summary.dns_names.join(", "),
        not_before = rfc3339(&summary.not_before),
        not_after = rfc3339(&summary.not_after),
        details = summary.text,
    );

    Notification {
        key: key.to_string(),
        text,
    }
}

fn rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
