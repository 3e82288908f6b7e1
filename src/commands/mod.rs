// Commands module - Command Pattern implementation
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

mod command;
mod router;

// Individual command implementations
mod handle;
mod render;

pub use command::Command;
pub use router::CommandRouter;

pub use handle::HandleCommand;
pub use render::RenderCommand;
