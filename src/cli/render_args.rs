// Render arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Options for rendering a single stored entry
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Leaf entry JSON document (`leaf_input` / `extra_data`)
    #[arg(value_name = "LEAF_JSON_FILE")]
    pub leaf_file: PathBuf,

    /// Key shown in the notification; defaults to the file name
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub key: Option<String>,
}
