// Pipeline configuration
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::Result;
use crate::constants::{
    DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_STORE_TIMEOUT_SECS, KEY_PREFIX, WEBHOOK_PARAMETER,
};
use crate::notify::{NotificationChannel, SlackWebhookChannel};
use crate::params::{FileParameterStore, ParameterStore};
use crate::storage::{FsObjectStore, HttpObjectStore, ObjectStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// What happens to the rest of a batch when one key fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing key and report the error
    #[default]
    AbortBatch,
    /// Record the failure against the key and continue
    IsolateKeys,
}

/// Batch driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_webhook_parameter")]
    pub webhook_parameter: String,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            webhook_parameter: default_webhook_parameter(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_key_prefix() -> String {
    KEY_PREFIX.to_string()
}

fn default_webhook_parameter() -> String {
    WEBHOOK_PARAMETER.to_string()
}

/// Object store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Filesystem,
    Http,
}

/// Object store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend
    pub root: Option<PathBuf>,
    /// Endpoint for the HTTP backend
    pub base_url: Option<String>,
    #[serde(default = "default_store_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: None,
            base_url: None,
            timeout_seconds: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }
}

fn default_store_timeout() -> u64 {
    DEFAULT_STORE_TIMEOUT_SECS
}

/// Parameter store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersConfig {
    #[serde(default = "default_parameters_path")]
    pub path: PathBuf,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            path: default_parameters_path(),
        }
    }
}

fn default_parameters_path() -> PathBuf {
    PathBuf::from("parameters.toml")
}

/// Webhook delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_delivery_timeout")]
    pub timeout_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_DELIVERY_TIMEOUT_SECS,
        }
    }
}

fn default_delivery_timeout() -> u64 {
    DEFAULT_DELIVERY_TIMEOUT_SECS
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {:?}: {}", path.as_ref(), e)
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.key_prefix.is_empty() {
            anyhow::bail!("pipeline.key_prefix must not be empty");
        }
        if self.pipeline.webhook_parameter.is_empty() {
            anyhow::bail!("pipeline.webhook_parameter must not be empty");
        }
        if self.storage.backend == StorageBackend::Http && self.storage.base_url.is_none() {
            anyhow::bail!("storage.base_url is required for the http backend");
        }
        if self.storage.timeout_seconds == 0 || self.delivery.timeout_seconds == 0 {
            anyhow::bail!("timeouts must be greater than zero");
        }
        Ok(())
    }

    /// Build the configured object store
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        match self.storage.backend {
            StorageBackend::Filesystem => {
                let root = self
                    .storage
                    .root
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok(Arc::new(FsObjectStore::new(root)))
            }
            StorageBackend::Http => {
                let base_url = self
                    .storage
                    .base_url
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("storage.base_url is not set"))?;
                let store = HttpObjectStore::new(
                    base_url,
                    Duration::from_secs(self.storage.timeout_seconds),
                )?;
                Ok(Arc::new(store))
            }
        }
    }

    /// Build the configured parameter store
    pub fn build_parameters(&self) -> Arc<dyn ParameterStore> {
        Arc::new(FileParameterStore::new(self.parameters.path.clone()))
    }

    /// Build the webhook delivery channel
    pub fn build_channel(&self) -> Result<Arc<dyn NotificationChannel>> {
        let channel =
            SlackWebhookChannel::new(Duration::from_secs(self.delivery.timeout_seconds))?;
        Ok(Arc::new(channel))
    }
}
