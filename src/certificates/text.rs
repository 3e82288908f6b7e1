// Certificate text report - OpenSSL-style long-form rendering
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use chrono::{DateTime, Utc};
use oid_registry::Oid;
use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};
use x509_parser::extensions::DistributionPointName;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;
use x509_parser::time::ASN1Time;
use x509_parser::x509::SubjectPublicKeyInfo;

/// Bytes per line in hex blocks (modulus, signature, unknown extensions)
const HEX_BYTES_PER_LINE: usize = 18;

/// Renders one extension body; `None` means the parsed form did not match
type ExtensionRenderer = fn(&X509Extension<'_>) -> Option<Vec<String>>;

/// Display rule for a known extension
struct ExtensionRule {
    oid: &'static str,
    label: &'static str,
    render: ExtensionRenderer,
}

/// Known extensions, matched by OID. Anything else falls back to a hex dump.
const EXTENSION_RULES: &[ExtensionRule] = &[
    ExtensionRule {
        oid: "2.5.29.15",
        label: "X509v3 Key Usage",
        render: render_key_usage,
    },
    ExtensionRule {
        oid: "2.5.29.37",
        label: "X509v3 Extended Key Usage",
        render: render_extended_key_usage,
    },
    ExtensionRule {
        oid: "2.5.29.19",
        label: "X509v3 Basic Constraints",
        render: render_basic_constraints,
    },
    ExtensionRule {
        oid: "2.5.29.14",
        label: "X509v3 Subject Key Identifier",
        render: render_subject_key_identifier,
    },
    ExtensionRule {
        oid: "2.5.29.35",
        label: "X509v3 Authority Key Identifier",
        render: render_authority_key_identifier,
    },
    ExtensionRule {
        oid: "1.3.6.1.5.5.7.1.1",
        label: "Authority Information Access",
        render: render_authority_info_access,
    },
    ExtensionRule {
        oid: "2.5.29.17",
        label: "X509v3 Subject Alternative Name",
        render: render_subject_alt_name,
    },
    ExtensionRule {
        oid: "2.5.29.32",
        label: "X509v3 Certificate Policies",
        render: render_certificate_policies,
    },
    ExtensionRule {
        oid: "2.5.29.31",
        label: "X509v3 CRL Distribution Points",
        render: render_crl_distribution_points,
    },
    ExtensionRule {
        oid: "1.3.6.1.4.1.11129.2.4.2",
        label: "CT Precertificate SCTs",
        render: render_sct_list,
    },
    ExtensionRule {
        oid: "1.3.6.1.4.1.11129.2.4.3",
        label: "CT Precertificate Poison",
        render: render_ct_poison,
    },
];

/// Render the complete long-form report for a certificate
///
/// Output depends only on the certificate bytes.
pub fn certificate_text(cert: &X509Certificate<'_>) -> String {
    let mut report = Report::default();
    let signature_algorithm = signature_algorithm_name(&cert.signature_algorithm.algorithm);

    report.line(0, "Certificate:");
    report.line(1, "Data:");

    let version = cert.version().0;
    report.line(2, format!("Version: {} (0x{:x})", version + 1, version));
    render_serial(&mut report, cert.raw_serial());

    report.line(1, format!("Signature Algorithm: {}", signature_algorithm));
    report.line(2, format!("Issuer: {}", cert.issuer()));
    report.line(2, "Validity");
    report.line(3, format!("Not Before: {}", format_time(&cert.validity().not_before)));
    report.line(3, format!("Not After : {}", format_time(&cert.validity().not_after)));
    report.line(2, format!("Subject: {}", cert.subject()));

    render_public_key(&mut report, cert.public_key());

    let extensions = cert.extensions();
    if !extensions.is_empty() {
        report.line(2, "X509v3 extensions:");
        for ext in extensions {
            render_extension(&mut report, ext);
        }
    }

    report.line(1, format!("Signature Algorithm: {}", signature_algorithm));
    report.hex_block(2, &cert.signature_value.data[..]);

    report.finish()
}

/// Line-oriented text builder with four-space indentation
#[derive(Default)]
struct Report {
    out: String,
}

impl Report {
    fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}{}", "    ".repeat(indent), text.as_ref());
    }

    fn hex_block(&mut self, indent: usize, bytes: &[u8]) {
        for chunk in bytes.chunks(HEX_BYTES_PER_LINE) {
            let mut text = colon_hex(chunk, false);
            if chunk.len() == HEX_BYTES_PER_LINE {
                text.push(':');
            }
            self.line(indent, text);
        }
    }

    fn finish(mut self) -> String {
        while self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

fn colon_hex(bytes: &[u8], upper: bool) -> String {
    bytes
        .iter()
        .map(|b| {
            if upper {
                format!("{:02X}", b)
            } else {
                format!("{:02x}", b)
            }
        })
        .collect::<Vec<_>>()
        .join(":")
}

fn render_serial(report: &mut Report, raw: &[u8]) {
    // INTEGER content is two's complement
    if raw.first().is_some_and(|b| b & 0x80 != 0) {
        report.line(2, "Serial Number: (Negative)");
        report.line(3, colon_hex(raw, false));
        return;
    }

    let trimmed: &[u8] = match raw.iter().position(|b| *b != 0) {
        Some(start) => &raw[start..],
        None => &[],
    };

    if trimmed.len() <= 8 {
        let value = trimmed.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        report.line(2, format!("Serial Number: {} (0x{:x})", value, value));
    } else {
        report.line(2, "Serial Number:");
        report.line(3, colon_hex(raw, false));
    }
}

fn format_time(time: &ASN1Time) -> String {
    match DateTime::<Utc>::from_timestamp(time.timestamp(), 0) {
        Some(dt) => dt.format("%b %e %H:%M:%S %Y UTC").to_string(),
        None => time.to_string(),
    }
}

fn signature_algorithm_name(oid: &Oid<'_>) -> String {
    let name = match oid.to_id_string().as_str() {
        "1.2.840.113549.1.1.4" => "MD5-RSA",
        "1.2.840.113549.1.1.5" => "SHA1-RSA",
        "1.2.840.113549.1.1.10" => "RSASSA-PSS",
        "1.2.840.113549.1.1.11" => "SHA256-RSA",
        "1.2.840.113549.1.1.12" => "SHA384-RSA",
        "1.2.840.113549.1.1.13" => "SHA512-RSA",
        "1.2.840.10045.4.1" => "ECDSA-SHA1",
        "1.2.840.10045.4.3.2" => "ECDSA-SHA256",
        "1.2.840.10045.4.3.3" => "ECDSA-SHA384",
        "1.2.840.10045.4.3.4" => "ECDSA-SHA512",
        "1.3.101.112" => "Ed25519",
        "1.3.101.113" => "Ed448",
        other => return other.to_string(),
    };
    name.to_string()
}

fn public_key_algorithm_name(oid: &Oid<'_>) -> String {
    let name = match oid.to_id_string().as_str() {
        "1.2.840.113549.1.1.1" => "RSA",
        "1.2.840.10045.2.1" => "ECDSA",
        "1.2.840.10040.4.1" => "DSA",
        "1.3.101.112" => "Ed25519",
        "1.3.101.113" => "Ed448",
        other => return other.to_string(),
    };
    name.to_string()
}

fn curve_name(oid: &Oid<'_>) -> String {
    let name = match oid.to_id_string().as_str() {
        "1.2.840.10045.3.1.7" => "P-256",
        "1.3.132.0.34" => "P-384",
        "1.3.132.0.35" => "P-521",
        other => return other.to_string(),
    };
    name.to_string()
}

fn render_public_key(report: &mut Report, spki: &SubjectPublicKeyInfo<'_>) {
    report.line(2, "Subject Public Key Info:");
    report.line(
        3,
        format!(
            "Public Key Algorithm: {}",
            public_key_algorithm_name(&spki.algorithm.algorithm)
        ),
    );

    let key_bytes = &spki.subject_public_key.data[..];
    match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => {
            report.line(4, format!("Public-Key: ({} bit)", rsa.key_size()));
            report.line(4, "Modulus:");
            report.hex_block(5, rsa.modulus);
            match rsa_exponent(rsa.exponent) {
                Some(e) => report.line(4, format!("Exponent: {} (0x{:x})", e, e)),
                None => report.line(4, format!("Exponent: 0x{}", hex::encode(rsa.exponent))),
            }
        }
        Ok(PublicKey::EC(point)) => {
            report.line(4, format!("Public-Key: ({} bit)", point.key_size()));
            report.line(4, "pub:");
            report.hex_block(5, key_bytes);
            if let Some(curve) = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|params| params.as_oid().ok())
            {
                report.line(4, format!("NIST CURVE: {}", curve_name(&curve)));
            }
        }
        _ => {
            report.line(4, "Public-Key:");
            report.hex_block(5, key_bytes);
        }
    }
}

fn rsa_exponent(bytes: &[u8]) -> Option<u64> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > 8 {
        return None;
    }
    Some(
        significant
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
    )
}

fn render_extension(report: &mut Report, ext: &X509Extension<'_>) {
    let oid = ext.oid.to_id_string();
    let rule = EXTENSION_RULES.iter().find(|rule| rule.oid == oid);

    let label = rule.map(|r| r.label.to_string()).unwrap_or_else(|| oid.clone());
    if ext.critical {
        report.line(3, format!("{}: critical", label));
    } else {
        report.line(3, format!("{}:", label));
    }

    match rule.and_then(|r| (r.render)(ext)) {
        Some(lines) => {
            for line in lines {
                report.line(4, line);
            }
        }
        None => report.hex_block(4, ext.value),
    }
}

fn render_key_usage(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::KeyUsage(ku) = ext.parsed_extension() else {
        return None;
    };

    let flags = [
        (ku.digital_signature(), "Digital Signature"),
        (ku.non_repudiation(), "Non Repudiation"),
        (ku.key_encipherment(), "Key Encipherment"),
        (ku.data_encipherment(), "Data Encipherment"),
        (ku.key_agreement(), "Key Agreement"),
        (ku.key_cert_sign(), "Certificate Sign"),
        (ku.crl_sign(), "CRL Sign"),
        (ku.encipher_only(), "Encipher Only"),
        (ku.decipher_only(), "Decipher Only"),
    ];

    let usages: Vec<&str> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();
    Some(vec![usages.join(", ")])
}

fn render_extended_key_usage(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::ExtendedKeyUsage(eku) = ext.parsed_extension() else {
        return None;
    };

    let mut usages = Vec::new();
    let flags = [
        (eku.any, "Any Extended Key Usage"),
        (eku.server_auth, "TLS Web Server Authentication"),
        (eku.client_auth, "TLS Web Client Authentication"),
        (eku.code_signing, "Code Signing"),
        (eku.email_protection, "E-mail Protection"),
        (eku.time_stamping, "Time Stamping"),
        (eku.ocsp_signing, "OCSP Signing"),
    ];
    for (set, name) in flags {
        if set {
            usages.push(name.to_string());
        }
    }
    usages.extend(eku.other.iter().map(|oid| oid.to_id_string()));

    Some(vec![usages.join(", ")])
}

fn render_basic_constraints(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::BasicConstraints(bc) = ext.parsed_extension() else {
        return None;
    };

    let mut text = format!("CA:{}", if bc.ca { "TRUE" } else { "FALSE" });
    if let Some(path_len) = bc.path_len_constraint {
        let _ = write!(text, ", pathlen:{}", path_len);
    }
    Some(vec![text])
}

fn render_subject_key_identifier(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::SubjectKeyIdentifier(skid) = ext.parsed_extension() else {
        return None;
    };
    Some(vec![colon_hex(skid.0, true)])
}

fn render_authority_key_identifier(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::AuthorityKeyIdentifier(akid) = ext.parsed_extension() else {
        return None;
    };

    let mut lines = Vec::new();
    if let Some(key_id) = &akid.key_identifier {
        lines.push(format!("keyid:{}", colon_hex(key_id.0, true)));
    }
    if let Some(issuer) = &akid.authority_cert_issuer {
        for name in issuer {
            lines.push(general_name(name));
        }
    }
    if let Some(serial) = akid.authority_cert_serial {
        lines.push(format!("serial:{}", colon_hex(serial, true)));
    }
    Some(lines)
}

fn render_authority_info_access(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::AuthorityInfoAccess(aia) = ext.parsed_extension() else {
        return None;
    };

    let lines = aia
        .accessdescs
        .iter()
        .map(|desc| {
            let method = match desc.access_method.to_id_string().as_str() {
                "1.3.6.1.5.5.7.48.1" => "OCSP".to_string(),
                "1.3.6.1.5.5.7.48.2" => "CA Issuers".to_string(),
                other => other.to_string(),
            };
            format!("{} - {}", method, general_name(&desc.access_location))
        })
        .collect();
    Some(lines)
}

fn render_subject_alt_name(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() else {
        return None;
    };

    let names: Vec<String> = san.general_names.iter().map(general_name).collect();
    Some(vec![names.join(", ")])
}

fn render_certificate_policies(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::CertificatePolicies(policies) = ext.parsed_extension() else {
        return None;
    };

    let lines = policies
        .iter()
        .map(|policy| format!("Policy: {}", policy.policy_id.to_id_string()))
        .collect();
    Some(lines)
}

fn render_crl_distribution_points(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::CRLDistributionPoints(crl_dp) = ext.parsed_extension() else {
        return None;
    };

    let mut lines = Vec::new();
    for point in crl_dp.points.iter() {
        match &point.distribution_point {
            Some(DistributionPointName::FullName(names)) => {
                lines.push("Full Name:".to_string());
                for name in names {
                    lines.push(format!("  {}", general_name(name)));
                }
            }
            Some(DistributionPointName::NameRelativeToCRLIssuer(_)) => {
                lines.push("Relative Name".to_string());
            }
            None => {}
        }
    }
    Some(lines)
}

fn render_sct_list(ext: &X509Extension<'_>) -> Option<Vec<String>> {
    let ParsedExtension::SCT(scts) = ext.parsed_extension() else {
        return None;
    };

    let mut lines = Vec::new();
    for sct in scts {
        lines.push("Signed Certificate Timestamp:".to_string());
        lines.push(format!("  Version   : v{} (0x{:x})", sct.version.0 + 1, sct.version.0));
        lines.push(format!("  Log ID    : {}", colon_hex(&sct.id.key_id[..], true)));
        let timestamp = i64::try_from(sct.timestamp)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.format("%b %e %H:%M:%S%.3f %Y UTC").to_string())
            .unwrap_or_else(|| sct.timestamp.to_string());
        lines.push(format!("  Timestamp : {}", timestamp));
    }
    Some(lines)
}

fn render_ct_poison(_ext: &X509Extension<'_>) -> Option<Vec<String>> {
    Some(vec!["NULL".to_string()])
}

fn general_name(name: &GeneralName<'_>) -> String {
    match name {
        GeneralName::DNSName(dns) => format!("DNS:{}", dns),
        GeneralName::RFC822Name(email) => format!("email:{}", email),
        GeneralName::URI(uri) => format!("URI:{}", uri),
        GeneralName::IPAddress(bytes) => format!("IP Address:{}", ip_address(bytes)),
        GeneralName::DirectoryName(dn) => format!("DirName:{}", dn),
        GeneralName::RegisteredID(oid) => format!("Registered ID:{}", oid.to_id_string()),
        GeneralName::OtherName(oid, _) => format!("othername:{}", oid.to_id_string()),
        other => format!("{:?}", other),
    }
}

fn ip_address(bytes: &[u8]) -> String {
    match bytes.len() {
        4 => {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(bytes);
            Ipv4Addr::from(octets).to_string()
        }
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(bytes);
            Ipv6Addr::from(octets).to_string()
        }
        _ => hex::encode(bytes),
    }
}
