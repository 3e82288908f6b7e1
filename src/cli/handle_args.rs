// Batch handling arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Options for processing an event document
#[derive(Args, Debug, Clone)]
pub struct HandleArgs {
    /// Configuration file (TOML); defaults apply when omitted
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Event document to process, `-` for stdin
    #[arg(short = 'e', long = "event", value_name = "FILE", default_value = "-")]
    pub event: PathBuf,

    /// Print notifications instead of delivering them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long = "json")]
    pub json: bool,
}
