//! CLI argument parsing for branch-retire.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Clean local git branches safely.
///
/// Each local branch is classified as SKIP, KEEP, or DELETE by an ordered set
/// of guards (current branch, protected/critical names, optional upstream and
/// issue-closure checks, containment in a base branch, optional remote
/// presence). Only DELETE results remove the local branch reference.
#[derive(Parser, Debug)]
#[command(name = "branch-retire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// No subcommand prints help and exits successfully.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Print top-level help to stdout.
    pub fn print_help() -> std::io::Result<()> {
        Self::command().print_help()
    }
}

/// Available commands for branch-retire.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete local branches whose tip commit is already contained in `base`.
    ///
    /// Default (fast): containment in base is the only deletion criterion.
    /// Optional checks can be enabled via flags.
    Clean(CleanArgs),
}

/// Output format for per-branch status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `[TAG] branch (reason)` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Path to git repository.
    #[arg(long)]
    pub repo: PathBuf,

    /// Remote name (default: origin, or `remote` from the config file).
    #[arg(long)]
    pub remote: Option<String>,

    /// Base branch to check commit containment
    /// (default from BASE_BRANCH_FOR_COMMIT_CHECK env or 'dev').
    #[arg(long)]
    pub base: Option<String>,

    /// Print actions without deleting.
    #[arg(long)]
    pub dry_run: bool,

    /// Force delete (git branch -D).
    #[arg(long)]
    pub force: bool,

    /// Additional protected branch name(s). Can be passed multiple times.
    #[arg(long, value_name = "BRANCH")]
    pub protect: Vec<String>,

    /// Additional critical branch name(s). Can be passed multiple times.
    #[arg(long, value_name = "BRANCH")]
    pub critical: Vec<String>,

    /// Run 'git fetch <remote> --prune' before checks (slower, but fresher).
    #[arg(long)]
    pub fetch: bool,

    /// Only consider branches that have an upstream on the chosen remote.
    #[arg(long)]
    pub check_upstream_missing: bool,

    /// Only delete if branch is missing on remote (uses ls-remote; slower).
    #[arg(long)]
    pub check_remote_missing: bool,

    /// If branch name starts with an issue id, delete only if base contains
    /// "closes #<id>" (slower).
    #[arg(long)]
    pub check_issue_closure: bool,

    /// YAML file with protected/critical branches, base branch, and remote.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parse `clean` arguments for tests: `--repo .` followed by `extra`.
#[cfg(test)]
pub(crate) fn test_args(extra: &[&str]) -> CleanArgs {
    let mut argv = vec!["branch-retire", "clean", "--repo", "."];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv) {
        Ok(Cli {
            command: Some(Command::Clean(args)),
            ..
        }) => args,
        Ok(_) => panic!("expected the clean command"),
        Err(e) => panic!("invalid test arguments: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clean_defaults() {
        let args = test_args(&[]);
        assert_eq!(args.repo, PathBuf::from("."));
        assert_eq!(args.remote, None);
        assert_eq!(args.base, None);
        assert!(!args.dry_run);
        assert!(!args.force);
        assert!(!args.fetch);
        assert!(args.protect.is_empty());
        assert!(!args.check_upstream_missing);
        assert!(!args.check_remote_missing);
        assert!(!args.check_issue_closure);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn protect_can_repeat() {
        let args = test_args(&["--protect", "a", "--protect", "b"]);
        assert_eq!(args.protect, vec!["a", "b"]);
    }

    #[test]
    fn all_flags_parse() {
        let args = test_args(&[
            "--remote",
            "upstream",
            "--base",
            "origin/dev",
            "--dry-run",
            "--force",
            "--fetch",
            "--check-upstream-missing",
            "--check-remote-missing",
            "--check-issue-closure",
            "--format",
            "json",
        ]);
        assert_eq!(args.remote.as_deref(), Some("upstream"));
        assert_eq!(args.base.as_deref(), Some("origin/dev"));
        assert!(args.dry_run && args.force && args.fetch);
        assert!(args.check_upstream_missing);
        assert!(args.check_remote_missing);
        assert!(args.check_issue_closure);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn repo_is_required() {
        assert!(Cli::try_parse_from(["branch-retire", "clean"]).is_err());
    }

    #[test]
    fn bare_invocation_parses_without_command() {
        let cli = Cli::try_parse_from(["branch-retire"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["branch-retire", "clean", "--repo", ".", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
