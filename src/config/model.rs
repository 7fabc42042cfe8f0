//! Settings struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Branch retirement settings.
///
/// Assembled from built-in defaults, an optional YAML file, and the
/// environment, in increasing order of precedence. Unknown YAML fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Branches never deleted. Must not be empty.
    #[serde(default = "default_protected_branches")]
    pub protected_branches: BranchSet,

    /// Branches never deleted regardless of other options. Must not be empty.
    #[serde(default = "default_critical_branches")]
    pub critical_branches: BranchSet,

    /// Glob patterns (e.g. `release/*`) whose matches count as protected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protected_patterns: Vec<String>,

    /// Reference whose history decides containment (default: "dev").
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Remote consulted by the upstream and remote-presence checks.
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            protected_branches: default_protected_branches(),
            critical_branches: default_critical_branches(),
            protected_patterns: Vec::new(),
            base_branch: default_base_branch(),
            remote: default_remote(),
        }
    }
}
