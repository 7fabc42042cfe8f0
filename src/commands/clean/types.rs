//! Data types for the clean command.

use crate::error::{RetireError, Result};
use crate::retire::Action;

/// What the executor did with one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// SKIP or KEEP: reported only.
    Reported,
    /// DELETE applied to the repository.
    Deleted,
    /// DELETE suppressed by dry-run.
    WouldDelete,
    /// DELETE refused by git.
    DeleteFailed,
}

/// Per-run counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub skipped: usize,
    pub kept: usize,
    pub deleted: usize,
    pub would_delete: usize,
    /// Branches whose deletion failed, in processing order.
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn record(&mut self, branch: &str, action: Action, outcome: Outcome) {
        match (action, outcome) {
            (Action::Skip, _) => self.skipped += 1,
            (Action::Keep, _) => self.kept += 1,
            (Action::Delete, Outcome::Deleted) => self.deleted += 1,
            (Action::Delete, Outcome::WouldDelete) => self.would_delete += 1,
            (Action::Delete, Outcome::DeleteFailed) => self.failed.push(branch.to_string()),
            (Action::Delete, Outcome::Reported) => {}
        }
    }

    /// `Ok(())` unless a deletion failed.
    pub fn into_result(self) -> Result<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(RetireError::DeletionFailed {
                count: self.failed.len(),
            })
        }
    }
}
