// CT Log Entry Parser
//
// Rebuilds a log entry from a stored leaf (RFC 6962 Merkle Tree Leaf plus
// chain data) and exposes the embedded certificate, if any.

use super::Result;
use super::leaf::LeafEntry;
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the SHA-256 issuer key hash in a precert entry
const ISSUER_KEY_HASH_LEN: usize = 32;

/// Certificate type in CT log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertType {
    /// Precertificate (TBSCertificate with CT poison)
    PreCertificate,
    /// X.509 certificate
    X509Certificate,
}

/// Signed entry carried by a timestamped leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedEntry {
    /// `x509_entry`: the DER certificate itself
    X509 { certificate: Vec<u8> },
    /// `precert_entry`: issuer key hash and the precertificate TBS
    Precert {
        issuer_key_hash: [u8; ISSUER_KEY_HASH_LEN],
        tbs_certificate: Vec<u8>,
    },
}

/// Decoded `MerkleTreeLeaf` (version v1, leaf type timestamped_entry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTreeLeaf {
    /// Milliseconds since the epoch, as logged
    pub timestamp_ms: u64,
    pub entry: SignedEntry,
    /// Raw `CtExtensions` bytes
    pub extensions: Vec<u8>,
}

impl MerkleTreeLeaf {
    /// Parse a TLS-encoded Merkle tree leaf; trailing bytes are rejected
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = TlsReader::new(bytes, "leaf_input");

        let version = reader.read_u8()?;
        if version != 0 {
            return Err(malformed(format!("unsupported leaf version {}", version)));
        }

        let leaf_type = reader.read_u8()?;
        if leaf_type != 0 {
            return Err(malformed(format!("unsupported leaf type {}", leaf_type)));
        }

        let timestamp_ms = reader.read_u64()?;

        let entry = match reader.read_u16()? {
            0 => SignedEntry::X509 {
                certificate: reader.read_opaque24(1)?.to_vec(),
            },
            1 => {
                let mut issuer_key_hash = [0u8; ISSUER_KEY_HASH_LEN];
                issuer_key_hash.copy_from_slice(reader.read_fixed(ISSUER_KEY_HASH_LEN)?);
                SignedEntry::Precert {
                    issuer_key_hash,
                    tbs_certificate: reader.read_opaque24(1)?.to_vec(),
                }
            }
            other => return Err(malformed(format!("unknown entry type {}", other))),
        };

        let extensions = reader.read_opaque16()?.to_vec();
        reader.finish()?;

        Ok(Self {
            timestamp_ms,
            entry,
            extensions,
        })
    }

    /// Log timestamp, if it fits the calendar
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn cert_type(&self) -> CertType {
        match self.entry {
            SignedEntry::X509 { .. } => CertType::X509Certificate,
            SignedEntry::Precert { .. } => CertType::PreCertificate,
        }
    }
}

/// Entry payload once `extra_data` is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// Issued certificate and its issuing chain
    X509 {
        certificate: Vec<u8>,
        chain: Vec<Vec<u8>>,
    },
    /// Precertificate submission; carries no issued certificate
    Precert {
        issuer_key_hash: [u8; ISSUER_KEY_HASH_LEN],
        tbs_certificate: Vec<u8>,
        pre_certificate: Vec<u8>,
        chain: Vec<Vec<u8>>,
    },
}

/// Reconstructed CT log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Entry index in log
    pub index: u64,
    pub leaf: MerkleTreeLeaf,
    pub content: EntryContent,
}

impl LogEntry {
    /// Rebuild a log entry from a stored leaf
    pub fn from_leaf(index: u64, leaf_entry: &LeafEntry) -> Result<Self> {
        let leaf = MerkleTreeLeaf::parse(&leaf_entry.leaf_input)?;
        let mut extra = TlsReader::new(&leaf_entry.extra_data, "extra_data");

        let content = match &leaf.entry {
            SignedEntry::X509 { certificate } => {
                let chain = extra.read_cert_list()?;
                extra.finish()?;
                EntryContent::X509 {
                    certificate: certificate.clone(),
                    chain,
                }
            }
            SignedEntry::Precert {
                issuer_key_hash,
                tbs_certificate,
            } => {
                let pre_certificate = extra.read_opaque24(1)?.to_vec();
                let chain = extra.read_cert_list()?;
                extra.finish()?;
                EntryContent::Precert {
                    issuer_key_hash: *issuer_key_hash,
                    tbs_certificate: tbs_certificate.clone(),
                    pre_certificate,
                    chain,
                }
            }
        };

        Ok(Self {
            index,
            leaf,
            content,
        })
    }

    /// DER bytes of the issued X.509 certificate, `None` for precertificates
    pub fn x509_certificate(&self) -> Option<&[u8]> {
        match &self.content {
            EntryContent::X509 { certificate, .. } => Some(certificate.as_slice()),
            EntryContent::Precert { .. } => None,
        }
    }

    /// Issuing chain supplied with the entry
    pub fn chain(&self) -> &[Vec<u8>] {
        match &self.content {
            EntryContent::X509 { chain, .. } | EntryContent::Precert { chain, .. } => chain,
        }
    }

    pub fn cert_type(&self) -> CertType {
        self.leaf.cert_type()
    }
}

fn malformed(details: String) -> PipelineError {
    PipelineError::MalformedLeaf { details }
}

/// Bounds-checked reader for TLS presentation-language structures
struct TlsReader<'a> {
    data: &'a [u8],
    pos: usize,
    field: &'static str,
}

impl<'a> TlsReader<'a> {
    fn new(data: &'a [u8], field: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            field,
        }
    }

    fn read_fixed(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(malformed(format!(
                "{} truncated: need {} bytes at offset {}, have {}",
                self.field,
                len,
                self.pos,
                self.data.len() - self.pos
            ))),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_fixed(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_fixed(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u24(&mut self) -> Result<usize> {
        let b = self.read_fixed(3)?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]) as usize)
    }

    fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_fixed(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(u64::from_be_bytes(buf))
    }

    /// `opaque<min..2^24-1>`
    fn read_opaque24(&mut self, min: usize) -> Result<&'a [u8]> {
        let len = self.read_u24()?;
        if len < min {
            return Err(malformed(format!(
                "{}: opaque length {} below minimum {}",
                self.field, len, min
            )));
        }
        self.read_fixed(len)
    }

    /// `opaque<0..2^16-1>`
    fn read_opaque16(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16()? as usize;
        self.read_fixed(len)
    }

    /// `ASN.1Cert list<0..2^24-1>` where each element is `opaque<1..2^24-1>`
    fn read_cert_list(&mut self) -> Result<Vec<Vec<u8>>> {
        let list = self.read_opaque24(0)?;
        let mut inner = TlsReader::new(list, self.field);
        let mut certs = Vec::new();
        while inner.pos < inner.data.len() {
            certs.push(inner.read_opaque24(1)?.to_vec());
        }
        Ok(certs)
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(malformed(format!(
                "{} has {} trailing bytes",
                self.field,
                self.data.len() - self.pos
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{precert_leaf_entry, x509_leaf_entry};

    #[test]
    fn test_x509_entry_reconstruction() {
        let der = vec![0x30, 0x03, 0x02, 0x01, 0x05];
        let chain = vec![vec![0x30, 0x00], vec![0x30, 0x01, 0x00]];
        let leaf_entry = x509_leaf_entry(&der, &chain, 1_700_000_000_123);

        let entry = LogEntry::from_leaf(0, &leaf_entry).unwrap();

        assert_eq!(entry.index, 0);
        assert_eq!(entry.cert_type(), CertType::X509Certificate);
        assert_eq!(entry.x509_certificate(), Some(der.as_slice()));
        assert_eq!(entry.chain(), chain.as_slice());
        assert_eq!(entry.leaf.timestamp_ms, 1_700_000_000_123);
        assert_eq!(
            entry.leaf.timestamp().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_123)
        );
    }

    #[test]
    fn test_precert_entry_has_no_certificate() {
        let leaf_entry = precert_leaf_entry(&[0x30, 0x00], &[0x30, 0x01, 0x00]);

        let entry = LogEntry::from_leaf(0, &leaf_entry).unwrap();

        assert_eq!(entry.cert_type(), CertType::PreCertificate);
        assert!(entry.x509_certificate().is_none());
        match &entry.content {
            EntryContent::Precert {
                issuer_key_hash,
                pre_certificate,
                ..
            } => {
                assert_eq!(issuer_key_hash, &[0xAB; 32]);
                assert_eq!(pre_certificate, &vec![0x30, 0x01, 0x00]);
            }
            other => panic!("expected precert content, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        leaf_entry.leaf_input[0] = 1;

        let err = LogEntry::from_leaf(0, &leaf_entry).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_unknown_entry_type_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        leaf_entry.leaf_input[11] = 7;

        let result = LogEntry::from_leaf(0, &leaf_entry);
        assert!(matches!(result, Err(PipelineError::MalformedLeaf { .. })));
    }

    #[test]
    fn test_truncated_leaf_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x03, 0x02, 0x01, 0x05], &[], 0);
        leaf_entry.leaf_input.truncate(16);

        let result = LogEntry::from_leaf(0, &leaf_entry);
        assert!(matches!(result, Err(PipelineError::MalformedLeaf { .. })));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        leaf_entry.leaf_input.push(0xFF);
        assert!(LogEntry::from_leaf(0, &leaf_entry).is_err());

        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        leaf_entry.extra_data.push(0xFF);
        assert!(LogEntry::from_leaf(0, &leaf_entry).is_err());
    }

    #[test]
    fn test_missing_extra_data_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        leaf_entry.extra_data.clear();

        let result = LogEntry::from_leaf(0, &leaf_entry);
        assert!(matches!(result, Err(PipelineError::MalformedLeaf { .. })));
    }

    #[test]
    fn test_empty_certificate_rejected() {
        let mut leaf_entry = x509_leaf_entry(&[0x30, 0x00], &[], 0);
        // Zero the 24-bit certificate length and drop the body
        leaf_entry.leaf_input[12..15].copy_from_slice(&[0, 0, 0]);
        leaf_entry.leaf_input.drain(15..17);

        let result = LogEntry::from_leaf(0, &leaf_entry);
        assert!(matches!(result, Err(PipelineError::MalformedLeaf { .. })));
    }
}
