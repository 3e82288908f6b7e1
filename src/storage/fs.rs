// Filesystem object store - one directory per bucket under a root

use super::ObjectStore;
use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Object store backed by a local directory tree
///
/// `fetch("bucket", "certs/a.json")` reads `<root>/bucket/certs/a.json`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an object path, refusing anything that leaves the bucket
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        let mut path = self.root.clone();
        for part in [bucket, key] {
            let relative = Path::new(part);
            if part.is_empty()
                || !relative
                    .components()
                    .all(|c| matches!(c, Component::Normal(_)))
            {
                return Err(StoreError::InvalidKey {
                    key: format!("{}/{}", bucket, key),
                });
            }
            path.push(relative);
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let path = self.object_path(bucket, key)?;

        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!(path = %path.display(), size = data.len(), "read object from filesystem");
                Ok(Bytes::from(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(StoreError::AccessDenied),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn backend_name(&self) -> &str {
        "filesystem"
    }
}
