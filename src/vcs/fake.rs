//! In-memory [`VersionControl`] used by pipeline and executor tests.

use super::{CommitId, DeleteMode, VersionControl};
use crate::error::{RetireError, Result};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A scripted repository. Every trait call is recorded in `calls` as
/// `"<method> <args>"` so tests can assert which oracles ran.
#[derive(Debug, Default)]
pub(crate) struct FakeRepository {
    /// Local branches and their tip commits, in enumeration order.
    pub branches: Vec<(String, String)>,
    pub current: Option<String>,
    pub upstreams: HashMap<String, String>,
    /// Resolvable non-branch references (e.g. `origin/dev`).
    pub refs: HashMap<String, String>,
    /// `(ancestor, descendant)` commit pairs considered reachable.
    pub ancestry: HashSet<(String, String)>,
    /// Commit messages reachable from each reference.
    pub history: HashMap<String, Vec<String>>,
    /// Branch names advertised by each remote.
    pub remote_heads: HashMap<String, BTreeSet<String>>,
    pub unreachable_remotes: HashSet<String>,
    pub fail_current_branch: bool,
    pub fail_upstream_lookup: bool,
    pub fail_ancestry: bool,
    pub fail_history: bool,
    /// Branches whose safe delete is refused.
    pub unmerged: HashSet<String>,
    pub deleted: RefCell<Vec<(String, DeleteMode)>>,
    pub fetched: RefCell<Vec<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, name: &str, tip: &str) -> Self {
        self.branches.push((name.to_string(), tip.to_string()));
        self
    }

    pub fn with_current(mut self, name: &str) -> Self {
        self.current = Some(name.to_string());
        self
    }

    pub fn with_ref(mut self, name: &str, commit: &str) -> Self {
        self.refs.insert(name.to_string(), commit.to_string());
        self
    }

    pub fn with_ancestor(mut self, ancestor: &str, descendant: &str) -> Self {
        self.ancestry
            .insert((ancestor.to_string(), descendant.to_string()));
        self
    }

    pub fn with_upstream(mut self, branch: &str, upstream: &str) -> Self {
        self.upstreams
            .insert(branch.to_string(), upstream.to_string());
        self
    }

    pub fn with_message(mut self, reference: &str, message: &str) -> Self {
        self.history
            .entry(reference.to_string())
            .or_default()
            .push(message.to_string());
        self
    }

    pub fn with_remote_head(mut self, remote: &str, branch: &str) -> Self {
        self.remote_heads
            .entry(remote.to_string())
            .or_default()
            .insert(branch.to_string());
        self
    }

    pub fn with_unreachable_remote(mut self, remote: &str) -> Self {
        self.unreachable_remotes.insert(remote.to_string());
        self
    }

    pub fn with_unmerged(mut self, branch: &str) -> Self {
        self.unmerged.insert(branch.to_string());
        self
    }

    /// Number of recorded calls whose description starts with `prefix`.
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn is_deleted(&self, branch: &str) -> bool {
        self.deleted.borrow().iter().any(|(name, _)| name == branch)
    }
}

impl VersionControl for FakeRepository {
    fn local_branches(&self) -> Result<Vec<String>> {
        self.record("local_branches".to_string());
        Ok(self
            .branches
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| !self.is_deleted(name))
            .collect())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.record("current_branch".to_string());
        if self.fail_current_branch {
            return Err(RetireError::GitError("HEAD is unreadable".to_string()));
        }
        Ok(self.current.clone())
    }

    fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        self.record(format!("upstream_of {}", branch));
        if self.fail_upstream_lookup {
            return Err(RetireError::GitError("bad upstream config".to_string()));
        }
        Ok(self.upstreams.get(branch).cloned())
    }

    fn tip_commit(&self, branch: &str) -> Result<CommitId> {
        self.record(format!("tip_commit {}", branch));
        self.branches
            .iter()
            .find(|(name, _)| name == branch)
            .map(|(_, tip)| CommitId::new(tip.clone()))
            .ok_or_else(|| RetireError::GitError(format!("unknown branch '{}'", branch)))
    }

    fn resolve_commit(&self, reference: &str) -> Result<Option<CommitId>> {
        self.record(format!("resolve_commit {}", reference));
        let from_branch = self
            .branches
            .iter()
            .find(|(name, _)| name == reference)
            .map(|(_, tip)| tip.clone());
        Ok(from_branch
            .or_else(|| self.refs.get(reference).cloned())
            .map(CommitId::new))
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool> {
        self.record(format!("is_ancestor {} {}", ancestor, descendant));
        if self.fail_ancestry {
            return Err(RetireError::GitError("shallow history".to_string()));
        }
        Ok(ancestor == descendant
            || self
                .ancestry
                .contains(&(ancestor.to_string(), descendant.to_string())))
    }

    fn commit_messages_containing(&self, reference: &str, needle: &str) -> Result<Vec<String>> {
        self.record(format!("commit_messages_containing {} {}", reference, needle));
        if self.fail_history {
            return Err(RetireError::GitError(format!("bad revision '{}'", reference)));
        }
        let needle = needle.to_lowercase();
        Ok(self
            .history
            .get(reference)
            .map(|messages| {
                messages
                    .iter()
                    .filter(|message| message.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn remote_heads(&self, remote: &str, branch: &str) -> Result<Vec<String>> {
        self.record(format!("remote_heads {} {}", remote, branch));
        if self.unreachable_remotes.contains(remote) {
            return Err(RetireError::GitError(format!(
                "could not read from remote '{}'",
                remote
            )));
        }
        let advertised = self
            .remote_heads
            .get(remote)
            .is_some_and(|heads| heads.contains(branch));
        if advertised {
            Ok(vec![format!("refs/heads/{}", branch)])
        } else {
            Ok(Vec::new())
        }
    }

    fn fetch_prune(&self, remote: &str) -> Result<()> {
        self.record(format!("fetch_prune {}", remote));
        if self.unreachable_remotes.contains(remote) {
            return Err(RetireError::GitError(format!(
                "could not read from remote '{}'",
                remote
            )));
        }
        self.fetched.borrow_mut().push(remote.to_string());
        Ok(())
    }

    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> Result<()> {
        self.record(format!("delete_branch {}", branch));
        if mode == DeleteMode::Safe && self.unmerged.contains(branch) {
            return Err(RetireError::GitError(format!(
                "the branch '{}' is not fully merged",
                branch
            )));
        }
        self.deleted
            .borrow_mut()
            .push((branch.to_string(), mode));
        Ok(())
    }
}
