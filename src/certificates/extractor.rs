// Certificate Extractor - issued certificate metadata from a CT leaf entry
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::text::certificate_text;
use crate::constants::PLACEHOLDER_LEAF_INDEX;
use crate::ct_logs::{CertType, LeafEntry, LogEntry, Result};
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use x509_parser::prelude::*;
use x509_parser::time::ASN1Time;

/// Read-only view of an issued certificate, as shown in notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    /// Subject Alternative Name DNS entries, in encoding order
    pub dns_names: Vec<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Long-form report of every certificate field
    pub text: String,
    pub subject: String,
    pub issuer: String,
}

/// Outcome of extracting a certificate from a leaf entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The entry carries an issued X.509 certificate
    Certificate(CertificateSummary),
    /// The entry carries no issued certificate (precertificate submission)
    NoCertificate { cert_type: CertType },
}

/// Rebuild the log entry behind `leaf` and summarize its certificate
pub fn extract(leaf: &LeafEntry) -> Result<Extraction> {
    let entry = LogEntry::from_leaf(PLACEHOLDER_LEAF_INDEX, leaf)?;

    debug!(
        cert_type = ?entry.cert_type(),
        logged_at = ?entry.leaf.timestamp(),
        chain_len = entry.chain().len(),
        "rebuilt log entry"
    );

    let Some(der) = entry.x509_certificate() else {
        return Ok(Extraction::NoCertificate {
            cert_type: entry.cert_type(),
        });
    };

    let summary = summarize(der)?;
    debug!(
        subject = %summary.subject,
        issuer = %summary.issuer,
        dns_names = summary.dns_names.len(),
        "extracted certificate"
    );
    Ok(Extraction::Certificate(summary))
}

/// Parse DER certificate bytes into a summary
pub fn summarize(der: &[u8]) -> Result<CertificateSummary> {
    let (rest, cert) = X509Certificate::from_der(der).map_err(|e| PipelineError::CertParse {
        details: format!("Failed to parse X.509 certificate: {}", e),
    })?;

    if !rest.is_empty() {
        return Err(PipelineError::CertParse {
            details: format!("{} trailing bytes after certificate", rest.len()),
        });
    }

    let dns_names = san_dns_names(&cert)?;
    let not_before = validity_time(&cert.validity().not_before, "notBefore")?;
    let not_after = validity_time(&cert.validity().not_after, "notAfter")?;

    Ok(CertificateSummary {
        dns_names,
        not_before,
        not_after,
        text: certificate_text(&cert),
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
    })
}

/// DNS names from the SAN extension only; the subject CN is ignored
fn san_dns_names(cert: &X509Certificate<'_>) -> Result<Vec<String>> {
    let san = cert
        .subject_alternative_name()
        .map_err(|e| PipelineError::CertParse {
            details: format!("Invalid subject alternative name extension: {}", e),
        })?;

    let mut names = Vec::new();
    if let Some(san_ext) = san {
        for name in &san_ext.value.general_names {
            if let GeneralName::DNSName(dns) = name {
                names.push(dns.to_string());
            }
        }
    }
    Ok(names)
}

fn validity_time(time: &ASN1Time, field: &str) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(time.timestamp(), 0).ok_or_else(|| PipelineError::CertParse {
        details: format!("{} out of range: {}", field, time),
    })
}
