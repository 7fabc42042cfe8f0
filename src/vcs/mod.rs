//! Version-control facade consumed by the retirement pipeline.
//!
//! The pipeline and executor only talk to a repository through the
//! [`VersionControl`] trait. [`GitRepository`] implements it on top of the
//! `git` CLI; tests substitute an in-memory fake.

mod git_repo;

#[cfg(test)]
pub(crate) mod fake;

pub use git_repo::GitRepository;

use crate::error::Result;
use std::fmt;

/// Opaque identifier of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for status lines.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a local branch is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Refuse when the branch has unmerged commits (`git branch -d`).
    Safe,
    /// Delete unconditionally (`git branch -D`).
    Forced,
}

impl DeleteMode {
    pub fn from_force(force: bool) -> Self {
        if force { Self::Forced } else { Self::Safe }
    }

    /// The `git branch` flag this mode maps to.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Safe => "-d",
            Self::Forced => "-D",
        }
    }
}

/// Read and write operations the retirement run needs from a repository.
///
/// Methods returning `Result` may fail; the caller decides whether a failure
/// is fatal (required operations) or folded into a conservative answer.
pub trait VersionControl {
    /// Names of all local branches.
    fn local_branches(&self) -> Result<Vec<String>>;

    /// The checked-out branch, or `None` on a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Upstream tracking ref in `remote/branch` form, or `None` when unset.
    fn upstream_of(&self, branch: &str) -> Result<Option<String>>;

    /// Commit the branch currently points to.
    fn tip_commit(&self, branch: &str) -> Result<CommitId>;

    /// Resolve any reference to a commit, `None` when it does not resolve.
    fn resolve_commit(&self, reference: &str) -> Result<Option<CommitId>>;

    /// Whether `ancestor` is reachable from (or equal to) `descendant`.
    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool>;

    /// Full messages of commits reachable from `reference` whose message
    /// contains `needle`, compared case-insensitively.
    fn commit_messages_containing(&self, reference: &str, needle: &str) -> Result<Vec<String>>;

    /// Full ref names (`refs/heads/...`) the remote advertises for `branch`.
    fn remote_heads(&self, remote: &str, branch: &str) -> Result<Vec<String>>;

    /// Fetch from the remote, pruning stale remote-tracking refs.
    fn fetch_prune(&self, remote: &str) -> Result<()>;

    /// Delete a local branch reference.
    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_id_short_truncates_to_eight() {
        let id = CommitId::new("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        assert_eq!(CommitId::new("abc").short(), "abc");
    }

    #[test]
    fn delete_mode_flags() {
        assert_eq!(DeleteMode::from_force(false), DeleteMode::Safe);
        assert_eq!(DeleteMode::from_force(true).flag(), "-D");
        assert_eq!(DeleteMode::Safe.flag(), "-d");
    }
}
