//! The ordered guards of the retirement pipeline.
//!
//! Each guard either decides the branch (returns a [`Classification`]) or
//! passes it on. Guards run in [`GUARDS`] order and evaluation stops at the
//! first decision, so a guard never sees a branch an earlier guard decided.

use super::classification::Classification;
use super::oracles::{
    RemotePresence, base_has_issue_closure, has_upstream_on, issue_id_from_branch,
    remote_presence, tip_contained_in_base,
};
use crate::context::RetireContext;
use crate::error::Result;
use crate::vcs::{CommitId, VersionControl};

/// Per-branch state threaded through the guards.
pub struct Probe<'a> {
    pub branch: &'a str,
    /// Branch checked out in the work tree, `None` on a detached HEAD.
    pub current: Option<&'a str>,
    pub vcs: &'a dyn VersionControl,
    /// Tip commit, filled in by the ancestry guard.
    pub tip: Option<CommitId>,
    /// Optional checks this branch has passed, for the delete reason.
    pub passed: Vec<String>,
}

impl<'a> Probe<'a> {
    pub fn new(branch: &'a str, current: Option<&'a str>, vcs: &'a dyn VersionControl) -> Self {
        Self {
            branch,
            current,
            vcs,
            tip: None,
            passed: Vec::new(),
        }
    }
}

/// A guard: `Ok(Some(_))` decides the branch, `Ok(None)` passes it on.
pub type Guard = fn(&RetireContext, &mut Probe<'_>) -> Result<Option<Classification>>;

/// Guards in priority order.
pub const GUARDS: [(&str, Guard); 7] = [
    ("current", current_branch),
    ("protected", protected),
    ("critical", critical),
    ("upstream", upstream_presence),
    ("issue-closure", issue_closure),
    ("ancestry", ancestry),
    ("remote", remote_absence),
];

pub fn current_branch(_ctx: &RetireContext, probe: &mut Probe<'_>) -> Result<Option<Classification>> {
    if probe.current == Some(probe.branch) {
        return Ok(Some(Classification::skip(probe.branch, "current")));
    }
    Ok(None)
}

pub fn protected(ctx: &RetireContext, probe: &mut Probe<'_>) -> Result<Option<Classification>> {
    if ctx.is_protected(probe.branch) {
        return Ok(Some(Classification::skip(probe.branch, "protected")));
    }
    Ok(None)
}

pub fn critical(ctx: &RetireContext, probe: &mut Probe<'_>) -> Result<Option<Classification>> {
    if ctx.is_critical(probe.branch) {
        return Ok(Some(Classification::skip(probe.branch, "critical")));
    }
    Ok(None)
}

pub fn upstream_presence(
    ctx: &RetireContext,
    probe: &mut Probe<'_>,
) -> Result<Option<Classification>> {
    if !ctx.checks.upstream_missing {
        return Ok(None);
    }

    if !has_upstream_on(probe.vcs, probe.branch, &ctx.remote) {
        return Ok(Some(Classification::skip(
            probe.branch,
            format!("local-only or foreign upstream (not on {})", ctx.remote),
        )));
    }

    probe.passed.push(format!("upstream on {}", ctx.remote));
    Ok(None)
}

pub fn issue_closure(ctx: &RetireContext, probe: &mut Probe<'_>) -> Result<Option<Classification>> {
    if !ctx.checks.issue_closure {
        return Ok(None);
    }

    let Some(issue) = issue_id_from_branch(probe.branch) else {
        return Ok(Some(Classification::skip(probe.branch, "no issue id prefix")));
    };

    // Search from the commit resolved at startup, as the ancestry guard does.
    if !base_has_issue_closure(probe.vcs, ctx.base_commit.as_str(), &issue) {
        return Ok(Some(Classification::keep(
            probe.branch,
            format!(
                "no issue-closure marker found for #{} on {}",
                issue, ctx.base
            ),
        )));
    }

    probe.passed.push(format!("closure marker for #{}", issue));
    Ok(None)
}

/// Resolving the tip is required: failure aborts the run.
pub fn ancestry(ctx: &RetireContext, probe: &mut Probe<'_>) -> Result<Option<Classification>> {
    let tip = probe.vcs.tip_commit(probe.branch)?;

    if !tip_contained_in_base(probe.vcs, &tip, &ctx.base_commit) {
        return Ok(Some(Classification::keep(
            probe.branch,
            format!("tip {} not contained in {}", tip.short(), ctx.base),
        )));
    }

    probe.tip = Some(tip);
    Ok(None)
}

pub fn remote_absence(
    ctx: &RetireContext,
    probe: &mut Probe<'_>,
) -> Result<Option<Classification>> {
    if !ctx.checks.remote_missing {
        return Ok(None);
    }

    match remote_presence(probe.vcs, &ctx.remote, probe.branch) {
        RemotePresence::Present => Ok(Some(Classification::keep(
            probe.branch,
            format!("exists on remote {}", ctx.remote),
        ))),
        RemotePresence::Unknown => Ok(Some(Classification::keep(
            probe.branch,
            format!("remote {} unreachable; presence unknown", ctx.remote),
        ))),
        RemotePresence::Absent => {
            probe.passed.push(format!("absent on {}", ctx.remote));
            Ok(None)
        }
    }
}

/// Verdict when no guard fired.
pub fn retire(ctx: &RetireContext, probe: &Probe<'_>) -> Classification {
    let mut reason = match &probe.tip {
        Some(tip) => format!("tip {} is contained in {}", tip.short(), ctx.base),
        None => format!("tip is contained in {}", ctx.base),
    };
    for check in &probe.passed {
        reason.push_str("; ");
        reason.push_str(check);
    }
    Classification::delete(probe.branch, reason)
}
