// Certificates module - certificate extraction and text rendering

pub mod extractor;
pub mod text;

pub use extractor::{CertificateSummary, Extraction, extract, summarize};
pub use text::certificate_text;
