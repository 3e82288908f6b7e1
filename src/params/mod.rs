// Parameter store - where the notification endpoint is resolved from
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::error::ConfigResolutionError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Key/value store of opaque string parameters
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Resolve parameter `name`
    async fn get(&self, name: &str) -> Result<String, ConfigResolutionError>;
}

/// Parameters read from a flat TOML table on every lookup
///
/// ```toml
/// webhook_url = "https://hooks.slack.com/services/..."
/// ```
#[derive(Debug, Clone)]
pub struct FileParameterStore {
    path: PathBuf,
}

impl FileParameterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ParameterStore for FileParameterStore {
    async fn get(&self, name: &str) -> Result<String, ConfigResolutionError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigResolutionError::Unreadable {
                path: self.path.clone(),
                source,
            })?;

        let table: toml::Table =
            toml::from_str(&contents).map_err(|e| ConfigResolutionError::Malformed {
                details: e.to_string(),
            })?;

        match table.get(name) {
            Some(toml::Value::String(value)) => Ok(value.clone()),
            Some(_) => Err(ConfigResolutionError::NotAString {
                name: name.to_string(),
            }),
            None => Err(ConfigResolutionError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

/// Parameters fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticParameterStore {
    values: HashMap<String, String>,
}

impl StaticParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl ParameterStore for StaticParameterStore {
    async fn get(&self, name: &str) -> Result<String, ConfigResolutionError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigResolutionError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_parameter_lookup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parameters.toml");
        std::fs::write(
            &path,
            "webhook_url = \"https://hooks.example.com/x\"\nretries = 3\n",
        )
        .unwrap();

        let store = FileParameterStore::new(&path);

        assert_eq!(
            store.get("webhook_url").await.unwrap(),
            "https://hooks.example.com/x"
        );
        assert!(matches!(
            store.get("retries").await,
            Err(ConfigResolutionError::NotAString { .. })
        ));
        assert!(matches!(
            store.get("missing").await,
            Err(ConfigResolutionError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let store = FileParameterStore::new(dir.path().join("absent.toml"));

        assert!(matches!(
            store.get("webhook_url").await,
            Err(ConfigResolutionError::Unreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parameters.toml");
        std::fs::write(&path, "webhook_url = ").unwrap();

        let store = FileParameterStore::new(&path);
        assert!(matches!(
            store.get("webhook_url").await,
            Err(ConfigResolutionError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_store() {
        let store = StaticParameterStore::new().with("webhook_url", "https://example.com/hook");

        assert_eq!(store.get("webhook_url").await.unwrap(), "https://example.com/hook");
        assert!(store.get("other").await.is_err());
    }
}
