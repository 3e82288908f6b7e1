// In-memory object store

use super::ObjectStore;
use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Object store held in memory; records every fetch it serves
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: HashMap<(String, String), Bytes>,
    fetches: Mutex<Vec<(String, String)>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.insert(bucket, key, data);
        self
    }

    pub fn insert(
        &mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        data: impl Into<Bytes>,
    ) {
        self.objects
            .insert((bucket.into(), key.into()), data.into());
    }

    /// Every `(bucket, key)` fetched so far, in call order
    pub async fn fetches(&self) -> Vec<(String, String)> {
        self.fetches.lock().await.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        self.fetches
            .lock()
            .await
            .push((bucket.to_string(), key.to_string()));

        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
