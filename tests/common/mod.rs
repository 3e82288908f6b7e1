// Shared test fixtures: stored leaf-entry encodings and throwaway certificates
//
// Byte-level only, so the library's unit tests can include this file too.

#![allow(dead_code)]

use base64::Engine;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, date_time_ymd};

pub const BUCKET: &str = "ct-entries";

/// Log timestamp used by the fixtures (2024-01-01T00:00:00Z)
pub const LOGGED_AT_MS: u64 = 1_704_067_200_000;

/// Issuer key hash carried by precert fixtures
pub const ISSUER_KEY_HASH: [u8; 32] = [0xAB; 32];

fn push_u24(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u32).to_be_bytes()[1..]);
}

/// `ASN.1Cert list<0..2^24-1>`
pub fn cert_list(certs: &[Vec<u8>]) -> Vec<u8> {
    let mut body = Vec::new();
    for cert in certs {
        push_u24(&mut body, cert.len());
        body.extend_from_slice(cert);
    }
    let mut out = Vec::new();
    push_u24(&mut out, body.len());
    out.extend_from_slice(&body);
    out
}

/// `leaf_input` of an x509_entry wrapping `der`
pub fn x509_leaf_input(der: &[u8], timestamp_ms: u64) -> Vec<u8> {
    let mut leaf = vec![0u8, 0u8];
    leaf.extend_from_slice(&timestamp_ms.to_be_bytes());
    leaf.extend_from_slice(&0u16.to_be_bytes());
    push_u24(&mut leaf, der.len());
    leaf.extend_from_slice(der);
    leaf.extend_from_slice(&0u16.to_be_bytes());
    leaf
}

/// `leaf_input` of a precert_entry carrying `tbs`
pub fn precert_leaf_input(tbs: &[u8], timestamp_ms: u64) -> Vec<u8> {
    let mut leaf = vec![0u8, 0u8];
    leaf.extend_from_slice(&timestamp_ms.to_be_bytes());
    leaf.extend_from_slice(&1u16.to_be_bytes());
    leaf.extend_from_slice(&ISSUER_KEY_HASH);
    push_u24(&mut leaf, tbs.len());
    leaf.extend_from_slice(tbs);
    leaf.extend_from_slice(&0u16.to_be_bytes());
    leaf
}

/// `extra_data` of a precert_entry: the precertificate, then the chain
pub fn precert_extra_data(pre_certificate: &[u8], chain: &[Vec<u8>]) -> Vec<u8> {
    let mut extra = Vec::new();
    push_u24(&mut extra, pre_certificate.len());
    extra.extend_from_slice(pre_certificate);
    extra.extend_from_slice(&cert_list(chain));
    extra
}

/// JSON document as stored in the object store
pub fn entry_json(leaf_input: &[u8], extra_data: &[u8]) -> Vec<u8> {
    let engine = base64::engine::general_purpose::STANDARD;
    serde_json::json!({
        "leaf_input": engine.encode(leaf_input),
        "extra_data": engine.encode(extra_data),
    })
    .to_string()
    .into_bytes()
}

/// Stored x509_entry with an empty chain
pub fn x509_entry_json(der: &[u8]) -> Vec<u8> {
    entry_json(&x509_leaf_input(der, LOGGED_AT_MS), &cert_list(&[]))
}

/// Stored precert_entry with placeholder TBS and precertificate bytes
pub fn precert_entry_json() -> Vec<u8> {
    entry_json(
        &precert_leaf_input(&[0x30, 0x00], LOGGED_AT_MS),
        &precert_extra_data(&[0x30, 0x00], &[]),
    )
}

/// Self-signed certificate valid 2024-01-01 to 2025-01-01 with the given SAN DNS names
pub fn certificate(dns_names: &[&str]) -> Vec<u8> {
    let names: Vec<String> = dns_names.iter().map(|s| s.to_string()).collect();
    let mut params = CertificateParams::new(names).unwrap();
    params.not_before = date_time_ymd(2024, 1, 1);
    params.not_after = date_time_ymd(2025, 1, 1);

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "CT Notify Test");
    dn.push(DnType::OrganizationName, "Example Org");
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().unwrap();
    params.self_signed(&key_pair).unwrap().der().to_vec()
}
