// Object storage - where stored CT leaf entries are fetched from
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

pub mod fs;
pub mod http;
pub mod memory;

use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;

pub use fs::FsObjectStore;
pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;

/// Blob store addressed by bucket and key
///
/// Implementations perform a single blocking read per call; retries, if any,
/// belong to the implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object stored under `bucket`/`key`
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}
