// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::{Parser, Subcommand};

mod handle_args;
mod logging_args;
mod render_args;

pub use handle_args::HandleArgs;
pub use logging_args::LoggingArgs;
pub use render_args::RenderArgs;

/// ct-notify - alerts on certificates stored from Certificate Transparency logs
///
/// The Args struct composes the logging options shared by every mode with
/// one subcommand per operational mode:
/// - `handle`: run a batch of object-created records through the pipeline
/// - `render`: show the notification for one stored entry without sending it
#[derive(Parser, Debug, Clone)]
#[command(name = "ct-notify")]
#[command(author, version, about = "Certificate Transparency entry notifier", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(subcommand)]
    pub mode: Mode,
}

/// Operational modes
#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Process an object-created event document
    Handle(HandleArgs),
    /// Print the notification for a stored leaf entry
    Render(RenderArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_handle_defaults() {
        let args = Args::try_parse_from(["ct-notify", "handle"]).unwrap();
        assert!(!args.logging.log_json);
        match args.mode {
            Mode::Handle(handle) => {
                assert!(handle.config.is_none());
                assert_eq!(handle.event, PathBuf::from("-"));
                assert!(!handle.dry_run);
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "ct-notify",
            "handle",
            "--config",
            "ct-notify.toml",
            "--event",
            "event.json",
            "--log-json",
            "-v",
        ])
        .unwrap();

        assert!(args.logging.log_json);
        assert!(args.logging.verbose);
        match args.mode {
            Mode::Handle(handle) => {
                assert_eq!(handle.config, Some(PathBuf::from("ct-notify.toml")));
                assert_eq!(handle.event, PathBuf::from("event.json"));
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_parse_render() {
        let args =
            Args::try_parse_from(["ct-notify", "render", "entry.json", "--key", "certs/x.json"])
                .unwrap();
        match args.mode {
            Mode::Render(render) => {
                assert_eq!(render.leaf_file, PathBuf::from("entry.json"));
                assert_eq!(render.key.as_deref(), Some("certs/x.json"));
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["ct-notify"]).is_err());
    }
}
