// CommandRouter - Routes CLI arguments to appropriate Command
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use super::{Command, HandleCommand, RenderCommand};
use crate::Args;
use crate::cli::Mode;

/// CommandRouter picks the Command for the parsed subcommand
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    pub fn route(args: Args) -> Box<dyn Command> {
        match args.mode {
            Mode::Handle(handle) => Box::new(HandleCommand::new(handle)),
            Mode::Render(render) => Box::new(RenderCommand::new(render)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_route_handle() {
        let args = Args::try_parse_from(["ct-notify", "handle"]).unwrap();
        assert_eq!(CommandRouter::route(args).name(), "HandleCommand");
    }

    #[test]
    fn test_route_render() {
        let args = Args::try_parse_from(["ct-notify", "render", "entry.json"]).unwrap();
        assert_eq!(CommandRouter::route(args).name(), "RenderCommand");
    }
}
