//! Immutable run context for branch retirement.
//!
//! [`RetireContext`] merges resolved [`Settings`] with command-line options
//! and the resolved base commit. It is built once, before the first branch is
//! classified, and only read afterwards.

use crate::cli::CleanArgs;
use crate::config::{BranchSet, Settings};
use crate::error::{RetireError, Result};
use crate::vcs::{CommitId, DeleteMode, VersionControl};
use globset::GlobSet;
use tracing::debug;

/// Optional guards, each off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionalChecks {
    /// Skip branches without an upstream on the configured remote.
    pub upstream_missing: bool,
    /// Keep branches that still exist on the configured remote.
    pub remote_missing: bool,
    /// Require an issue-closure marker on base for `<id>-...` branches.
    pub issue_closure: bool,
}

/// Everything the pipeline and executor need to know about the run.
#[derive(Debug, Clone)]
pub struct RetireContext {
    /// Remote consulted by the upstream and remote-presence guards.
    pub remote: String,
    /// Base reference as given (e.g. `dev` or `origin/dev`).
    pub base: String,
    /// Commit the base reference resolved to at startup.
    pub base_commit: CommitId,
    pub protected: BranchSet,
    /// Case-insensitive protected glob patterns.
    pub protected_patterns: GlobSet,
    pub critical: BranchSet,
    pub checks: OptionalChecks,
    pub dry_run: bool,
    pub force: bool,
}

impl RetireContext {
    /// Build the context, resolving the base reference through `vcs`.
    ///
    /// # Returns
    ///
    /// * `Ok(RetireContext)` - Ready for classification
    /// * `Err(RetireError::ConfigError)` - Empty sets, empty base, or a base
    ///   reference that does not resolve to a commit
    pub fn resolve(
        settings: &Settings,
        args: &CleanArgs,
        vcs: &dyn VersionControl,
    ) -> Result<Self> {
        let remote = args
            .remote
            .clone()
            .unwrap_or_else(|| settings.remote.clone());
        let base = args
            .base
            .clone()
            .unwrap_or_else(|| settings.base_branch.clone());

        let mut protected = settings.protected_branches.clone();
        protected.extend(&args.protect);
        let mut critical = settings.critical_branches.clone();
        critical.extend(&args.critical);

        if protected.is_empty() || critical.is_empty() {
            return Err(RetireError::ConfigError(
                "protected and critical branch sets must not be empty. \
                 Refusing to run to avoid deleting important branches."
                    .to_string(),
            ));
        }
        if remote.trim().is_empty() {
            return Err(RetireError::ConfigError(
                "remote name must not be empty".to_string(),
            ));
        }
        if base.trim().is_empty() {
            return Err(RetireError::ConfigError(
                "base reference must not be empty".to_string(),
            ));
        }

        let protected_patterns = settings.protected_globs()?;
        debug!(
            protected = %protected.iter().collect::<Vec<_>>().join(","),
            critical = %critical.iter().collect::<Vec<_>>().join(","),
            patterns = protected_patterns.len(),
            "branch sets"
        );

        // Assume a local ref; pass --base origin/dev to compare against the remote.
        let base_commit = vcs
            .resolve_commit(&base)?
            .ok_or_else(|| RetireError::ConfigError(format!("Base ref not found: {}", base)))?;
        debug!(base = %base, commit = %base_commit, "resolved base reference");

        Ok(Self {
            remote,
            base,
            base_commit,
            protected,
            protected_patterns,
            critical,
            checks: OptionalChecks {
                upstream_missing: args.check_upstream_missing,
                remote_missing: args.check_remote_missing,
                issue_closure: args.check_issue_closure,
            },
            dry_run: args.dry_run,
            force: args.force,
        })
    }

    /// Whether `branch` is protected by name or by pattern.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected.contains(branch) || self.protected_patterns.is_match(branch.to_lowercase())
    }

    pub fn is_critical(&self, branch: &str) -> bool {
        self.critical.contains(branch)
    }

    pub fn delete_mode(&self) -> DeleteMode {
        DeleteMode::from_force(self.force)
    }
}
