// Batch Driver - runs every trigger record through the pipeline
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::config::{FailurePolicy, PipelineSettings};
use crate::certificates::{Extraction, extract};
use crate::ct_logs::{EntryLoader, LeafEntry};
use crate::error::{BatchError, PipelineError};
use crate::notify::{self, Notification, NotificationChannel};
use crate::params::ParameterStore;
use crate::storage::ObjectStore;
use crate::trigger::{TriggerRecord, unescape_key};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What happened to one key of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum KeyOutcome {
    /// Notification accepted by the channel
    Notified,
    /// Key is outside the configured prefix and was not fetched
    SkippedPrefix,
    /// Entry carries a precertificate
    NoCertificate,
    /// Notification built but the channel refused it
    DeliveryFailed(String),
    /// Processing failed; only recorded under `FailurePolicy::IsolateKeys`
    Failed(String),
}

/// Per-key results of one batch, in trigger order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub entries: Vec<KeyReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub bucket: String,
    pub key: String,
    #[serde(flatten)]
    pub outcome: KeyOutcome,
}

impl BatchReport {
    fn record(&mut self, bucket: &str, key: &str, outcome: KeyOutcome) {
        self.entries.push(KeyReport {
            bucket: bucket.to_string(),
            key: key.to_string(),
            outcome,
        });
    }

    /// Number of notifications the channel accepted
    pub fn notified(&self) -> usize {
        self.count(|o| matches!(o, KeyOutcome::Notified))
    }

    /// Number of keys skipped for prefix or missing certificate
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, KeyOutcome::SkippedPrefix | KeyOutcome::NoCertificate))
    }

    /// True if any key failed processing (delivery failures excluded)
    pub fn has_failures(&self) -> bool {
        self.count(|o| matches!(o, KeyOutcome::Failed(_))) > 0
    }

    pub fn outcome(&self, key: &str) -> Option<&KeyOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.outcome)
    }

    fn count(&self, predicate: impl Fn(&KeyOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.outcome)).count()
    }
}

/// Drives a batch of trigger records through load, extract, format and deliver
pub struct BatchDriver {
    loader: EntryLoader,
    parameters: Arc<dyn ParameterStore>,
    channel: Arc<dyn NotificationChannel>,
    settings: PipelineSettings,
}

impl BatchDriver {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        parameters: Arc<dyn ParameterStore>,
        channel: Arc<dyn NotificationChannel>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            loader: EntryLoader::new(store),
            parameters,
            channel,
            settings,
        }
    }

    /// Process `records` sequentially in the order given
    ///
    /// Under `FailurePolicy::AbortBatch` the first pipeline error ends the
    /// batch; keys after it are never touched and no report is returned.
    pub async fn handle(&self, records: &[TriggerRecord]) -> Result<BatchReport, BatchError> {
        let endpoint = self.resolve_endpoint().await;
        let mut report = BatchReport::default();

        for record in records {
            // Failures are reported under the unescaped key when there is one
            let (key, result) = match unescape_key(&record.key) {
                Ok(key) => {
                    let result = self.process(&record.bucket, &key, &endpoint).await;
                    (key, result)
                }
                Err(err) => (record.key.clone(), Err(err)),
            };

            match result {
                Ok(outcome) => report.record(&record.bucket, &key, outcome),
                Err(err) => {
                    error!(
                        bucket = %record.bucket,
                        key = %key,
                        kind = err.kind(),
                        error = %err,
                        "Failed to process object"
                    );
                    match self.settings.failure_policy {
                        FailurePolicy::AbortBatch => {
                            return Err(BatchError { key, source: err });
                        }
                        FailurePolicy::IsolateKeys => report.record(
                            &record.bucket,
                            &key,
                            KeyOutcome::Failed(err.to_string()),
                        ),
                    }
                }
            }
        }

        info!(
            records = records.len(),
            notified = report.notified(),
            skipped = report.skipped(),
            "Batch complete"
        );
        Ok(report)
    }

    /// Look up the webhook endpoint once per batch
    ///
    /// Resolution failures are logged and the batch continues with an empty
    /// endpoint, so every delivery will then fail on its own.
    async fn resolve_endpoint(&self) -> String {
        match self.parameters.get(&self.settings.webhook_parameter).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                error!(
                    parameter = %self.settings.webhook_parameter,
                    error = %err,
                    "Failed to resolve notification endpoint"
                );
                String::new()
            }
        }
    }

    async fn process(
        &self,
        bucket: &str,
        key: &str,
        endpoint: &str,
    ) -> Result<KeyOutcome, PipelineError> {
        if !key.starts_with(&self.settings.key_prefix) {
            info!(
                bucket,
                key,
                prefix = %self.settings.key_prefix,
                "Skipping object outside certificate prefix"
            );
            return Ok(KeyOutcome::SkippedPrefix);
        }

        let leaf = self.loader.load(bucket, key).await?;

        let Some(notification) = render(key, &leaf)? else {
            info!(key, "Entry carries no issued certificate, skipping");
            return Ok(KeyOutcome::NoCertificate);
        };

        let outcome = match self.channel.deliver(endpoint, &notification).await {
            Ok(()) => {
                info!(
                    key,
                    channel = self.channel.channel_name(),
                    "Notification delivered"
                );
                KeyOutcome::Notified
            }
            Err(err) => {
                warn!(
                    key,
                    channel = self.channel.channel_name(),
                    error = %err,
                    "Notification delivery failed"
                );
                KeyOutcome::DeliveryFailed(err.to_string())
            }
        };

        Ok(outcome)
    }
}

/// Build the notification for a decoded leaf entry
///
/// `None` when the entry carries no issued certificate.
pub fn render(key: &str, leaf: &LeafEntry) -> Result<Option<Notification>, PipelineError> {
    match extract(leaf)? {
        Extraction::Certificate(summary) => Ok(Some(notify::format(key, &summary))),
        Extraction::NoCertificate { .. } => Ok(None),
    }
}
