// Trigger input - object-created event records and key unescaping
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// One newly created object, key still percent-encoded as delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub bucket: String,
    pub key: String,
}

impl TriggerRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Object-created event notification (S3 event shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records", default)]
    records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventRecord {
    s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
struct S3Entity {
    bucket: S3Bucket,
    object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
struct S3Bucket {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct S3Object {
    key: String,
}

impl TriggerEvent {
    /// Parse an event notification document
    pub fn from_json(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(payload)
    }

    /// `(bucket, key)` pairs in event order
    pub fn records(&self) -> Vec<TriggerRecord> {
        self.records
            .iter()
            .map(|r| TriggerRecord::new(&r.s3.bucket.name, &r.s3.object.key))
            .collect()
    }
}

/// Percent-decode an object key with path semantics
///
/// `%XX` sequences are decoded and `+` is kept literally. A `%` that does not
/// start a two-digit hex escape, or a result that is not UTF-8, is an error.
pub fn unescape_key(key: &str) -> Result<String, PipelineError> {
    let bytes = key.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Err(PipelineError::KeyUnescape {
                    key: key.to_string(),
                    details: format!(
                        "invalid escape {:?}",
                        String::from_utf8_lossy(&bytes[i..end])
                    ),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(key)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::KeyUnescape {
            key: key.to_string(),
            details: e.to_string(),
        })
}
