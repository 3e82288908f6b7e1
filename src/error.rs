// Error types for the CT notification pipeline
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// Pipeline stage failures are fatal to a batch, delivery and parameter
// failures are not. The two groups are separate types so the batch driver
// routes them through different paths.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal per-key pipeline errors
///
/// Any of these aborts the remaining batch under the default failure policy.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The trigger supplied a key that is not valid percent-encoding
    #[error("Invalid object key encoding {key:?}: {details}")]
    KeyUnescape { key: String, details: String },

    /// The object store could not return the object
    #[error("Failed to retrieve {bucket}/{key}: {source}")]
    Retrieval {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    /// The payload is not a leaf-entry JSON document
    #[error("Leaf entry decode error: {details}")]
    Decode { details: String },

    /// The leaf-entry fields do not hold a well-formed Merkle tree leaf
    #[error("Malformed Merkle tree leaf: {details}")]
    MalformedLeaf { details: String },

    /// The embedded certificate is not valid DER X.509
    #[error("Certificate parse error: {details}")]
    CertParse { details: String },
}

impl PipelineError {
    /// Short stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::KeyUnescape { .. } => "key_unescape",
            PipelineError::Retrieval { .. } => "retrieval",
            PipelineError::Decode { .. } => "decode",
            PipelineError::MalformedLeaf { .. } => "malformed_leaf",
            PipelineError::CertParse { .. } => "cert_parse",
        }
    }
}

/// Object store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists under the key
    #[error("Object not found")]
    NotFound,

    /// The store refused access to the object
    #[error("Access denied")]
    AccessDenied,

    /// The key would resolve outside the store
    #[error("Key {key:?} is not addressable in this store")]
    InvalidKey { key: String },

    /// Transient or unexpected backend failure
    #[error("Store unavailable: {details}")]
    Transient { details: String },

    /// Local I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Notification delivery failures (non-fatal)
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The endpoint address could not be used
    #[error("Invalid endpoint {endpoint:?}")]
    InvalidEndpoint { endpoint: String },

    /// The transport failed before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Endpoint returned status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Parameter store failures (non-fatal)
#[derive(Debug, Error)]
pub enum ConfigResolutionError {
    /// The parameter is not defined
    #[error("Parameter {name} not found")]
    NotFound { name: String },

    /// The parameter exists but is not a string
    #[error("Parameter {name} is not a string value")]
    NotAString { name: String },

    /// The backing file could not be read
    #[error("Failed to read parameter file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file is not a TOML table
    #[error("Malformed parameter file: {details}")]
    Malformed { details: String },
}

/// A fatal pipeline error tagged with the key that caused it
#[derive(Debug, Error)]
#[error("Processing {key} failed: {source}")]
pub struct BatchError {
    pub key: String,
    #[source]
    pub source: PipelineError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_retrieval_error_keeps_source() {
        let err = PipelineError::Retrieval {
            bucket: "ct-bucket".to_string(),
            key: "certs/a.json".to_string(),
            source: StoreError::NotFound,
        };

        let msg = err.to_string();
        assert!(msg.contains("ct-bucket/certs/a.json"));
        assert!(err.source().is_some());
        assert_eq!(err.kind(), "retrieval");
    }

    #[test]
    fn test_error_kinds() {
        let errors = [
            PipelineError::KeyUnescape {
                key: "%zz".to_string(),
                details: "bad escape".to_string(),
            },
            PipelineError::Decode {
                details: "eof".to_string(),
            },
            PipelineError::MalformedLeaf {
                details: "short".to_string(),
            },
            PipelineError::CertParse {
                details: "bad der".to_string(),
            },
        ];

        let kinds: Vec<&str> = errors.iter().map(PipelineError::kind).collect();
        assert_eq!(kinds, ["key_unescape", "decode", "malformed_leaf", "cert_parse"]);
    }

    #[test]
    fn test_batch_error_names_key() {
        let err = BatchError {
            key: "certs/bad.json".to_string(),
            source: PipelineError::Decode {
                details: "expected value".to_string(),
            },
        };

        assert!(err.to_string().contains("certs/bad.json"));
        assert!(matches!(err.source, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_delivery_rejected_message() {
        let err = DeliveryError::Rejected {
            status: 403,
            body: "invalid_token".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("invalid_token"));
    }
}
