//! Status line rendering for clean command output.

use crate::retire::Classification;
use crate::vcs::DeleteMode;
use serde::Serialize;

/// `[TAG] branch (reason)`.
pub fn status_line(classification: &Classification) -> String {
    format!(
        "{} {} ({})",
        classification.action.tag(),
        classification.branch,
        classification.reason
    )
}

/// Describes the command a dry run did not execute.
pub fn dry_run_line(branch: &str, mode: DeleteMode) -> String {
    format!("[DRY] git branch {} {}", mode.flag(), branch)
}

/// One branch in `--format json` output.
#[derive(Debug, Serialize)]
pub struct StatusRecord<'a> {
    #[serde(flatten)]
    pub classification: &'a Classification,
    pub dry_run: bool,
    pub deleted: bool,
}
