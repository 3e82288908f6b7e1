// Entry Loader - fetch a stored leaf entry and decode it

use super::Result;
use super::leaf::LeafEntry;
use crate::error::PipelineError;
use crate::storage::ObjectStore;
use std::sync::Arc;
use tracing::debug;

/// Reads leaf entries out of an object store
#[derive(Clone)]
pub struct EntryLoader {
    store: Arc<dyn ObjectStore>,
}

impl EntryLoader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Fetch `bucket`/`key` and decode it as a leaf entry
    ///
    /// `key` must already be unescaped and prefix-checked.
    pub async fn load(&self, bucket: &str, key: &str) -> Result<LeafEntry> {
        let payload = self
            .store
            .fetch(bucket, key)
            .await
            .map_err(|source| PipelineError::Retrieval {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source,
            })?;

        debug!(
            bucket,
            key,
            size = payload.len(),
            backend = self.store.backend_name(),
            "fetched leaf entry"
        );

        LeafEntry::from_json(&payload)
    }
}
