// HTTP object store - path-style GET against an S3-compatible endpoint

use super::ObjectStore;
use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Object store reached over HTTP(S)
///
/// Objects are read from `<base_url>/<bucket>/<key>`, each path segment
/// percent-encoded.
pub struct HttpObjectStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpObjectStore {
    /// Create a store for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(bucket),
            encoded_key
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let url = self.object_url(bucket, key);
        debug!(url = %url, "fetching object over HTTP");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.bytes().await?),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::AccessDenied),
            status => Err(StoreError::Transient {
                details: format!("unexpected status {}", status),
            }),
        }
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
