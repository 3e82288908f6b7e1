// HandleCommand - process an object-created event document
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::Result;
use crate::cli::HandleArgs;
use crate::notify::{NotificationChannel, RecordingChannel};
use crate::pipeline::{BatchDriver, BatchReport, Config, KeyOutcome};
use crate::trigger::TriggerEvent;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

/// HandleCommand runs every record of an event through the batch driver
///
/// The command fails when the batch aborts, or when any key failed under the
/// `isolate_keys` policy.
pub struct HandleCommand {
    args: HandleArgs,
}

impl HandleCommand {
    pub fn new(args: HandleArgs) -> Self {
        Self { args }
    }

    fn load_config(&self) -> Result<Config> {
        match &self.args.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }
}

#[async_trait]
impl Command for HandleCommand {
    async fn execute(&self) -> Result<()> {
        let config = self.load_config()?;

        let payload = read_event(&self.args.event).await?;
        let event = TriggerEvent::from_json(&payload)
            .map_err(|e| anyhow::anyhow!("Invalid event document: {}", e))?;
        let records = event.records();

        info!(
            records = records.len(),
            backend = ?config.storage.backend,
            policy = ?config.pipeline.failure_policy,
            dry_run = self.args.dry_run,
            "Handling event"
        );

        let recording = self.args.dry_run.then(|| Arc::new(RecordingChannel::new()));
        let channel: Arc<dyn NotificationChannel> = match &recording {
            Some(recording) => recording.clone(),
            None => config.build_channel()?,
        };

        let driver = BatchDriver::new(
            config.build_store()?,
            config.build_parameters(),
            channel,
            config.pipeline.clone(),
        );

        let report = driver.handle(&records).await?;

        if let Some(recording) = recording {
            for (_, notification) in recording.delivered().await {
                println!("{}\n", notification.text);
            }
        }

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_summary(&report);
        }

        if report.has_failures() {
            let failed = report
                .entries
                .iter()
                .filter(|entry| matches!(entry.outcome, KeyOutcome::Failed(_)))
                .count();
            anyhow::bail!("{} of {} objects failed", failed, report.entries.len());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "HandleCommand"
    }
}

async fn read_event(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        tokio::io::stdin().read_to_end(&mut buffer).await?;
        return Ok(buffer);
    }

    tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read event file {:?}: {}", path, e))
}

fn print_summary(report: &BatchReport) {
    for entry in &report.entries {
        let status = match &entry.outcome {
            KeyOutcome::Notified => "notified".to_string(),
            KeyOutcome::SkippedPrefix => "skipped (prefix)".to_string(),
            KeyOutcome::NoCertificate => "skipped (no certificate)".to_string(),
            KeyOutcome::DeliveryFailed(reason) => format!("delivery failed: {}", reason),
            KeyOutcome::Failed(reason) => format!("failed: {}", reason),
        };
        println!("  {}/{} - {}", entry.bucket, entry.key, status);
    }
    println!(
        "{} objects, {} notified, {} skipped",
        report.entries.len(),
        report.notified(),
        report.skipped()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{issued_certificate, leaf_entry_json, x509_leaf_entry};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(policy: &str) -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path().join("objects");
            fs::create_dir_all(root.join("ct-bucket/certs")).unwrap();
            fs::write(
                dir.path().join("parameters.toml"),
                "webhook_url = \"https://hooks.example.com/x\"\n",
            )
            .unwrap();
            fs::write(
                dir.path().join("ct-notify.toml"),
                format!(
                    "[pipeline]\nfailure_policy = \"{}\"\n\n[storage]\nroot = {:?}\n\n[parameters]\npath = {:?}\n",
                    policy,
                    root,
                    dir.path().join("parameters.toml"),
                ),
            )
            .unwrap();
            Self { dir }
        }

        fn put(&self, key: &str, data: &[u8]) {
            fs::write(self.dir.path().join("objects/ct-bucket").join(key), data).unwrap();
        }

        fn event(&self, keys: &[&str]) -> PathBuf {
            let records: Vec<_> = keys
                .iter()
                .map(|key| {
                    serde_json::json!({"s3": {"bucket": {"name": "ct-bucket"}, "object": {"key": key}}})
                })
                .collect();
            let path = self.dir.path().join("event.json");
            fs::write(&path, serde_json::json!({ "Records": records }).to_string()).unwrap();
            path
        }

        fn command(&self, event: PathBuf) -> HandleCommand {
            HandleCommand::new(HandleArgs {
                config: Some(self.dir.path().join("ct-notify.toml")),
                event,
                dry_run: true,
                json: false,
            })
        }
    }

    #[tokio::test]
    async fn test_dry_run_batch_succeeds() {
        let workspace = Workspace::new("abort_batch");
        let der = issued_certificate(&["a.example.com"]);
        workspace.put("certs/a.json", &leaf_entry_json(&x509_leaf_entry(&der, &[], 0)));

        let event = workspace.event(&["certs/a.json", "other/b.json"]);
        assert!(workspace.command(event).execute().await.is_ok());
    }

    #[tokio::test]
    async fn test_aborted_batch_fails_command() {
        let workspace = Workspace::new("abort_batch");
        workspace.put("certs/bad.json", b"not json");

        let event = workspace.event(&["certs/bad.json"]);
        let err = workspace.command(event).execute().await.unwrap_err();
        assert!(err.to_string().contains("certs/bad.json"));
    }

    #[tokio::test]
    async fn test_isolated_failures_fail_command() {
        let workspace = Workspace::new("isolate_keys");
        let der = issued_certificate(&["a.example.com"]);
        workspace.put("certs/a.json", &leaf_entry_json(&x509_leaf_entry(&der, &[], 0)));

        let event = workspace.event(&["certs/missing.json", "certs/a.json"]);
        let err = workspace.command(event).execute().await.unwrap_err();
        assert!(err.to_string().contains("1 of 2 objects failed"));
    }

    #[tokio::test]
    async fn test_invalid_event_document() {
        let workspace = Workspace::new("abort_batch");
        let path = workspace.dir.path().join("event.json");
        fs::write(&path, r#"{"Records": 5}"#).unwrap();

        assert!(workspace.command(path).execute().await.is_err());
    }
}
