//! Implementation of the `branch-retire clean` command.
//!
//! Enumerates local branches once, classifies each with the retirement
//! pipeline, and applies the result:
//! - SKIP / KEEP: a status line only
//! - DELETE: a status line, then `git branch -d` (`-D` with `--force`)
//!
//! # Safety
//!
//! - Configuration is validated before the repository is touched
//! - The base reference must resolve before any branch is classified
//! - `--dry-run` describes deletions without running them
//! - Safe deletion lets git refuse branches it considers unmerged
//!
//! Branches are processed sequentially in enumeration order, so output is
//! line-ordered and reproducible for an unchanged repository.

mod display;
mod execution;
mod types;


use crate::cli::CleanArgs;
use crate::config::Settings;
use crate::context::RetireContext;
use crate::error::Result;
use crate::git::ensure_git_repo;
use crate::retire::classify;
use crate::vcs::{GitRepository, VersionControl};
use std::io::{self, Write};
use tracing::{info, warn};

use execution::execute;
use types::RunSummary;

/// Execute the `branch-retire clean` command against the process environment
/// and stdout.
pub fn cmd_clean(args: CleanArgs) -> Result<()> {
    let settings = Settings::from_process_env(args.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_in_repo(&args, &settings, &mut out)
}

/// Validate the repository path, then retire branches in it.
pub fn run_in_repo<W: Write>(args: &CleanArgs, settings: &Settings, out: &mut W) -> Result<()> {
    let repo_root = ensure_git_repo(&args.repo)?;
    let repo = GitRepository::new(repo_root);
    info!(repo = %repo.root().display(), "retiring branches");

    retire_branches(args, settings, &repo, out)?.into_result()
}

/// Classify and act on every local branch of `vcs`.
///
/// Required operations (current branch, branch listing, base resolution,
/// tip resolution) abort the run; output already written for earlier
/// branches stays written.
pub fn retire_branches<W: Write>(
    args: &CleanArgs,
    settings: &Settings,
    vcs: &dyn VersionControl,
    out: &mut W,
) -> Result<RunSummary> {
    if args.fetch {
        let remote = args.remote.as_deref().unwrap_or(&settings.remote);
        if let Err(e) = vcs.fetch_prune(remote) {
            warn!(remote, error = %e, "fetch failed; continuing with local refs");
        }
    }

    let current = vcs.current_branch()?;
    let branches = vcs.local_branches()?;
    let ctx = RetireContext::resolve(settings, args, vcs)?;

    info!(
        count = branches.len(),
        base = %ctx.base,
        dry_run = ctx.dry_run,
        "classifying branches"
    );

    let mut summary = RunSummary::default();
    for branch in &branches {
        let classification = classify(branch, current.as_deref(), &ctx, vcs)?;
        let outcome = execute(&classification, &ctx, vcs, args.format, out)?;
        summary.record(branch, classification.action, outcome);
    }
    out.flush()?;

    info!(
        skipped = summary.skipped,
        kept = summary.kept,
        deleted = summary.deleted,
        would_delete = summary.would_delete,
        failed = summary.failed.len(),
        "run complete"
    );

    Ok(summary)
}
