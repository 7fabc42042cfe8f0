//! Git command runner for branch-retire.
//!
//! Provides a wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git process spawning goes through this module.

use crate::error::{RetireError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::trace;

/// Captured output of a git command.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
    /// Process exit code, `-1` when terminated by a signal.
    pub code: i32,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            code: output.status.code().unwrap_or(-1),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }

    /// The most useful diagnostic text: stderr, or stdout when stderr is empty.
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Run a git command and return its output regardless of exit status.
///
/// Only a failure to spawn `git` is an error. Callers that care about a
/// specific exit code (e.g. `merge-base --is-ancestor`) inspect `code`.
pub fn run_git_unchecked<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    trace!(cwd = %cwd.display(), args = ?args, "running git");

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            RetireError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    Ok(GitOutput::from_output(&output))
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(RetireError::GitError)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let git_output = run_git_unchecked(cwd, args)?;

    if git_output.code == 0 {
        Ok(git_output)
    } else {
        Err(RetireError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            git_output.code,
            git_output.message()
        )))
    }
}

/// Validate that `path` is an existing directory inside a git work tree and
/// return the work tree root.
///
/// Both failure modes are configuration errors: the run must not start.
pub fn ensure_git_repo<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(RetireError::ConfigError(format!(
            "Path does not exist: {}",
            path.display()
        )));
    }

    let output = run_git_unchecked(path, &["rev-parse", "--show-toplevel"]).map_err(|e| {
        RetireError::ConfigError(format!("{} (is git installed?)", e))
    })?;

    if output.code != 0 || output.is_empty() {
        return Err(RetireError::ConfigError(format!(
            "Not a git repo: {}",
            path.display()
        )));
    }

    Ok(PathBuf::from(&output.stdout))
}
