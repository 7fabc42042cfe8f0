//! Configuration for branch-retire.
//!
//! Defines [`Settings`]: the protected and critical branch sets, the default
//! base reference, and the remote. Values come from built-in defaults, an
//! optional YAML file, and the `PROTECTED_BRANCHES`, `CRITICAL_BRANCHES` and
//! `BASE_BRANCH_FOR_COMMIT_CHECK` environment variables.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Settings;
pub use types::BranchSet;
