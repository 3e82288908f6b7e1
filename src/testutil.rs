// Test fixtures as library types, built on the shared byte-level encoders

#[path = "../tests/common/mod.rs"]
mod common;

use crate::ct_logs::LeafEntry;

pub use common::certificate as issued_certificate;

/// x509_entry leaf wrapping `der`, with `chain` as extra data
pub fn x509_leaf_entry(der: &[u8], chain: &[Vec<u8>], timestamp_ms: u64) -> LeafEntry {
    LeafEntry {
        leaf_input: common::x509_leaf_input(der, timestamp_ms),
        extra_data: common::cert_list(chain),
    }
}

/// precert_entry leaf with an issuer key hash of 0xAB bytes and an empty chain
pub fn precert_leaf_entry(tbs: &[u8], pre_certificate: &[u8]) -> LeafEntry {
    LeafEntry {
        leaf_input: common::precert_leaf_input(tbs, common::LOGGED_AT_MS),
        extra_data: common::precert_extra_data(pre_certificate, &[]),
    }
}

/// JSON document as stored in the object store
pub fn leaf_entry_json(entry: &LeafEntry) -> Vec<u8> {
    common::entry_json(&entry.leaf_input, &entry.extra_data)
}
