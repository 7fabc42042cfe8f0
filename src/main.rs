//! branch-retire: decide which local git branches are safe to retire.
//!
//! This is the main entry point for the `branch-retire` CLI. It parses
//! arguments, initializes diagnostics, dispatches to the command handler,
//! and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod git;
mod logging;
pub mod retire;
pub mod vcs;

#[cfg(test)]
pub(crate) mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        return match Cli::print_help() {
            Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::from(exit_codes::FAILURE as u8)
            }
        };
    };

    match commands::dispatch(command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
