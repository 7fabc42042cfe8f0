//! [`VersionControl`] implemented with the `git` CLI.

use super::{CommitId, DeleteMode, VersionControl};
use crate::error::{RetireError, Result};
use crate::git::{run_git, run_git_unchecked};
use std::path::{Path, PathBuf};

/// Separates commit messages in `git log` output.
const RECORD_SEPARATOR: char = '\u{1e}';

/// A repository on disk, driven through `git` subprocesses.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl VersionControl for GitRepository {
    fn local_branches(&self) -> Result<Vec<String>> {
        let output = run_git(
            &self.root,
            &[
                "for-each-ref",
                "--sort=refname",
                "--format=%(refname)",
                "refs/heads",
            ],
        )?;

        Ok(output
            .lines()
            .into_iter()
            .filter_map(|line| line.strip_prefix("refs/heads/"))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let output = run_git(&self.root, &["branch", "--show-current"])?;
        if output.is_empty() {
            Ok(None)
        } else {
            Ok(Some(output.stdout))
        }
    }

    fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        let rev = format!("{}@{{upstream}}", branch);
        let output = run_git_unchecked(&self.root, &["rev-parse", "--abbrev-ref", &rev])?;

        // Non-zero exit means no upstream is configured (or it vanished).
        if output.code != 0 || output.is_empty() {
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }

    fn tip_commit(&self, branch: &str) -> Result<CommitId> {
        let rev = format!("refs/heads/{}^{{commit}}", branch);
        let output = run_git(&self.root, &["rev-parse", "--verify", &rev]).map_err(|e| {
            RetireError::GitError(format!(
                "failed to resolve tip of branch '{}': {}",
                branch, e
            ))
        })?;
        Ok(CommitId::new(output.stdout))
    }

    fn resolve_commit(&self, reference: &str) -> Result<Option<CommitId>> {
        let rev = format!("{}^{{commit}}", reference);
        let output = run_git_unchecked(&self.root, &["rev-parse", "--verify", "--quiet", &rev])?;

        if output.code != 0 || output.is_empty() {
            return Ok(None);
        }
        Ok(Some(CommitId::new(output.stdout)))
    }

    fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> Result<bool> {
        let output = run_git_unchecked(
            &self.root,
            &[
                "merge-base",
                "--is-ancestor",
                ancestor.as_str(),
                descendant.as_str(),
            ],
        )?;

        match output.code {
            0 => Ok(true),
            1 => Ok(false),
            code => Err(RetireError::GitError(format!(
                "git merge-base failed (exit code {}): {}",
                code,
                output.message()
            ))),
        }
    }

    fn commit_messages_containing(&self, reference: &str, needle: &str) -> Result<Vec<String>> {
        let grep = format!("--grep={}", needle);
        let format = format!("--format=%B%x{:02x}", RECORD_SEPARATOR as u32);
        let output = run_git(
            &self.root,
            &[
                "log",
                "--regexp-ignore-case",
                "--fixed-strings",
                &grep,
                &format,
                reference,
                "--",
            ],
        )?;

        Ok(output
            .stdout
            .split(RECORD_SEPARATOR)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn remote_heads(&self, remote: &str, branch: &str) -> Result<Vec<String>> {
        let wanted = format!("refs/heads/{}", branch);
        let output = run_git(&self.root, &["ls-remote", "--heads", remote, &wanted])?;

        // Each line is "<sha>\t<refname>"; keep exact matches only.
        Ok(output
            .lines()
            .into_iter()
            .filter_map(|line| line.split_once('\t'))
            .map(|(_, name)| name.trim())
            .filter(|name| *name == wanted)
            .map(str::to_string)
            .collect())
    }

    fn fetch_prune(&self, remote: &str) -> Result<()> {
        run_git(&self.root, &["fetch", remote, "--prune"])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> Result<()> {
        run_git(&self.root, &["branch", mode.flag(), branch]).map_err(|e| {
            let force_hint = match mode {
                DeleteMode::Safe => {
                    "\n\nIf the branch is not fully merged and you want to delete it anyway,\n\
                     rerun with --force (not recommended without verifying the changes are safe to lose)."
                }
                DeleteMode::Forced => "",
            };
            RetireError::GitError(format!(
                "failed to delete branch '{}': {}{}",
                branch, e, force_hint
            ))
        })?;
        Ok(())
    }
}
