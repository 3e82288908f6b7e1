// ct-notify - Certificate Transparency entry notifier
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use clap::Parser;
use ctnotify::Args;
use ctnotify::cli::LoggingArgs;
use ctnotify::commands::CommandRouter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(&args.logging)?;

    // Route to the command for the selected mode and run it
    let command = CommandRouter::route(args);
    debug!(command = command.name(), "Executing command");

    command.execute().await
}

/// Install the global subscriber; RUST_LOG takes precedence over --verbose
fn init_logging(logging: &LoggingArgs) -> Result<()> {
    let default_level = if logging.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.log_json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set subscriber: {}", e))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set subscriber: {}", e))
    }
}
