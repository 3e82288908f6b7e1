// RenderCommand - show the notification for one stored entry
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::Command;
use crate::Result;
use crate::cli::RenderArgs;
use crate::ct_logs::LeafEntry;
use crate::pipeline::render;
use async_trait::async_trait;
use tracing::debug;

/// RenderCommand decodes a leaf entry file and prints its notification
///
/// Nothing is delivered; the endpoint is never resolved.
pub struct RenderCommand {
    args: RenderArgs,
}

impl RenderCommand {
    pub fn new(args: RenderArgs) -> Self {
        Self { args }
    }

    fn key(&self) -> String {
        self.args.key.clone().unwrap_or_else(|| {
            self.args
                .leaf_file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    /// Notification text, or `None` for entries without an issued certificate
    pub async fn output(&self) -> Result<Option<String>> {
        let payload = tokio::fs::read(&self.args.leaf_file).await.map_err(|e| {
            anyhow::anyhow!("Failed to read {:?}: {}", self.args.leaf_file, e)
        })?;
        debug!(size = payload.len(), "read leaf entry file");

        let leaf = LeafEntry::from_json(&payload)?;
        let notification = render(&self.key(), &leaf)?;
        Ok(notification.map(|n| n.text))
    }
}

#[async_trait]
impl Command for RenderCommand {
    async fn execute(&self) -> Result<()> {
        match self.output().await? {
            Some(text) => println!("{}", text),
            None => println!("{}: entry carries no issued certificate", self.key()),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RenderCommand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{issued_certificate, leaf_entry_json, precert_leaf_entry, x509_leaf_entry};
    use tempfile::TempDir;

    fn command(dir: &TempDir, data: &[u8], key: Option<&str>) -> RenderCommand {
        let path = dir.path().join("entry.json");
        std::fs::write(&path, data).unwrap();
        RenderCommand::new(RenderArgs {
            leaf_file: path,
            key: key.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_render_certificate_entry() {
        let dir = TempDir::new().unwrap();
        let der = issued_certificate(&["a.example.com"]);
        let cmd = command(
            &dir,
            &leaf_entry_json(&x509_leaf_entry(&der, &[], 0)),
            Some("certs/abc.json"),
        );

        let text = cmd.output().await.unwrap().unwrap();
        assert!(text.starts_with("*New Certificate Detected*"));
        assert!(text.contains("Key: certs/abc.json"));
        assert!(text.contains("DNS Names: a.example.com"));
    }

    #[tokio::test]
    async fn test_key_defaults_to_file_name() {
        let dir = TempDir::new().unwrap();
        let der = issued_certificate(&["a.example.com"]);
        let cmd = command(&dir, &leaf_entry_json(&x509_leaf_entry(&der, &[], 0)), None);

        let text = cmd.output().await.unwrap().unwrap();
        assert!(text.contains("Key: entry.json"));
    }

    #[tokio::test]
    async fn test_precert_has_no_output() {
        let dir = TempDir::new().unwrap();
        let cmd = command(
            &dir,
            &leaf_entry_json(&precert_leaf_entry(&[0x30, 0x00], &[0x30, 0x00])),
            None,
        );

        assert!(cmd.output().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let cmd = command(&dir, b"{\"leaf_input\": 12}", None);

        assert!(cmd.output().await.is_err());
    }
}
