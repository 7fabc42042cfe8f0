//! Repository questions the guards ask, expressed over [`VersionControl`].
//!
//! Every oracle here is advisory: a failed git call is logged and answered
//! with the value that keeps the branch.

use crate::vcs::{CommitId, VersionControl};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// `<digits>` then `-` or `_` then at least one more character.
static ISSUE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)[-_].+").expect("Invalid issue prefix regex"));

/// A closure verb, whitespace, optional `#`, then the issue number as a whole word.
static CLOSURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:closes|closed|fixes|fixed|resolves|resolved)\s+#?([0-9]+)\b")
        .expect("Invalid issue closure regex")
});

/// Numeric issue id taken from a branch name prefix, digits kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueId(String);

impl IssueId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the leading issue id from names like `42-fix-bug` or `7_cleanup`.
pub fn issue_id_from_branch(branch: &str) -> Option<IssueId> {
    ISSUE_PREFIX_REGEX
        .captures(branch)
        .map(|caps| IssueId(caps[1].to_string()))
}

/// Whether a single commit message closes `issue`.
pub fn message_closes_issue(message: &str, issue: &IssueId) -> bool {
    CLOSURE_REGEX
        .captures_iter(message)
        .any(|caps| &caps[1] == issue.as_str())
}

/// Whether any commit reachable from `base` carries a closure marker for `issue`.
///
/// git narrows the history to messages containing the id; the closure
/// pattern is then applied locally.
pub fn base_has_issue_closure(vcs: &dyn VersionControl, base: &str, issue: &IssueId) -> bool {
    match vcs.commit_messages_containing(base, issue.as_str()) {
        Ok(messages) => messages
            .iter()
            .any(|message| message_closes_issue(message, issue)),
        Err(e) => {
            warn!(base, issue = %issue, error = %e, "issue-closure search failed; treating as not closed");
            false
        }
    }
}

/// Whether `tip` is an ancestor of (or equal to) `base`.
///
/// Shallow clones can report a contained commit as not contained; that
/// errs toward keeping the branch.
pub fn tip_contained_in_base(vcs: &dyn VersionControl, tip: &CommitId, base: &CommitId) -> bool {
    match vcs.is_ancestor(tip, base) {
        Ok(contained) => contained,
        Err(e) => {
            warn!(tip = %tip, base = %base, error = %e, "ancestry test failed; treating as not contained");
            false
        }
    }
}

/// Whether `branch` tracks a ref on `remote`.
pub fn has_upstream_on(vcs: &dyn VersionControl, branch: &str, remote: &str) -> bool {
    match vcs.upstream_of(branch) {
        Ok(Some(upstream)) => upstream.starts_with(&format!("{}/", remote)),
        Ok(None) => false,
        Err(e) => {
            warn!(branch, error = %e, "upstream lookup failed; treating as local-only");
            false
        }
    }
}

/// Answer of the remote-presence oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemotePresence {
    Present,
    Absent,
    /// The remote could not be queried.
    Unknown,
}

/// Ask `remote` whether it advertises a head named `branch`.
pub fn remote_presence(vcs: &dyn VersionControl, remote: &str, branch: &str) -> RemotePresence {
    match vcs.remote_heads(remote, branch) {
        Ok(heads) if heads.is_empty() => RemotePresence::Absent,
        Ok(_) => RemotePresence::Present,
        Err(e) => {
            warn!(remote, branch, error = %e, "remote head lookup failed");
            RemotePresence::Unknown
        }
    }
}
