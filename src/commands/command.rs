// Command trait - Defines the interface for all command implementations
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::Result;
use async_trait::async_trait;

/// Interface shared by every operational mode of ct-notify
///
/// Each command owns the arguments of its mode, builds the collaborators it
/// needs and reports failure through the returned `Result`, which the binary
/// turns into a non-zero exit status.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command asynchronously
    async fn execute(&self) -> Result<()>;

    /// Get a human-readable name for this command (for logging/debugging)
    fn name(&self) -> &'static str;
}
