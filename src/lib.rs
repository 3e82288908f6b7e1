// ct-notify - Certificate Transparency entry notifier
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! ct-notify turns Certificate Transparency leaf entries dropped into an
//! object store into human-readable alerts.
//!
//! Each object-created record flows through the same stages: key unescaping
//! and prefix filtering, loading the stored leaf entry, extracting the issued
//! X.509 certificate and formatting a notification that is delivered to a
//! webhook resolved from a parameter store.

pub mod certificates;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod ct_logs;
pub mod error;
pub mod notify;
pub mod params;
pub mod pipeline;
pub mod storage;
pub mod trigger;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::error::{BatchError, PipelineError};
pub use crate::pipeline::{BatchDriver, BatchReport, Config, KeyOutcome};

/// Result type for ct-notify operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for ct-notify operations
pub use anyhow::Error;
