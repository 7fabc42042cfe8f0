//! Classification results produced by the retirement pipeline.

use serde::Serialize;
use std::fmt;

/// What to do with a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Not a candidate at all (current, protected, out of scope for a check).
    Skip,
    /// A candidate that failed a safety condition.
    Keep,
    /// Safe to delete.
    Delete,
}

impl Action {
    /// Fixed-width status tag used in text output.
    pub fn tag(self) -> &'static str {
        match self {
            Action::Skip => "[SKIP]",
            Action::Keep => "[KEEP]",
            Action::Delete => "[DEL ]",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Skip => "skip",
            Action::Keep => "keep",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The pipeline's verdict for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Branch name exactly as enumerated.
    pub branch: String,
    pub action: Action,
    /// Short human-readable justification.
    pub reason: String,
}

impl Classification {
    pub fn skip(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(branch, Action::Skip, reason)
    }

    pub fn keep(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(branch, Action::Keep, reason)
    }

    pub fn delete(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(branch, Action::Delete, reason)
    }

    fn new(branch: impl Into<String>, action: Action, reason: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            action,
            reason: reason.into(),
        }
    }
}
