//! Command implementations for branch-retire.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod clean;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Clean(args) => clean::cmd_clean(args),
    }
}
