// Certificate Transparency leaf entries
//
// Loading stored CT leaf entries and rebuilding the log entry they describe.

pub mod leaf;
pub mod loader;
pub mod parser;

pub use leaf::LeafEntry;
pub use loader::EntryLoader;
pub use parser::{CertType, EntryContent, LogEntry, MerkleTreeLeaf, SignedEntry};

use crate::error::PipelineError;

/// Result type for CT leaf operations
pub type Result<T> = std::result::Result<T, PipelineError>;
