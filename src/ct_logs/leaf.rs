// CT leaf-entry wire format
//
// One stored object holds a JSON document with base64 `leaf_input` and
// `extra_data` fields, the shape CT log export tooling writes per entry.

use super::Result;
use crate::error::PipelineError;
use base64::Engine;
use serde::{Deserialize, Deserializer};

/// Raw leaf entry as stored: the Merkle tree leaf and its chain data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeafEntry {
    /// TLS-encoded `MerkleTreeLeaf`
    #[serde(default, deserialize_with = "base64_bytes")]
    pub leaf_input: Vec<u8>,
    /// TLS-encoded certificate chain (or `PrecertChainEntry`)
    #[serde(default, deserialize_with = "base64_bytes")]
    pub extra_data: Vec<u8>,
}

impl LeafEntry {
    /// Decode a leaf entry from its JSON document
    ///
    /// Fails closed: anything that is not a JSON object with base64 fields is
    /// a decode error and no entry is produced.
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(|e| PipelineError::Decode {
            details: e.to_string(),
        })
    }
}

fn base64_bytes<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    match encoded {
        None => Ok(Vec::new()),
        Some(s) => base64::engine::general_purpose::STANDARD
            .decode(s.as_bytes())
            .map_err(serde::de::Error::custom),
    }
}
