//! Error types for the branch-retire CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for branch-retire operations.
#[derive(Error, Debug)]
pub enum RetireError {
    /// Configuration or pre-flight validation failed. Raised before any branch
    /// is classified.
    #[error("{0}")]
    ConfigError(String),

    /// A git operation the run cannot proceed without failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// One or more deletions were refused by git.
    #[error("{count} branch deletion(s) failed; see messages above")]
    DeletionFailed { count: usize },

    /// Writing status output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RetireError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RetireError::ConfigError(_)
            | RetireError::GitError(_)
            | RetireError::DeletionFailed { .. }
            | RetireError::Io(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for branch-retire operations.
pub type Result<T> = std::result::Result<T, RetireError>;
