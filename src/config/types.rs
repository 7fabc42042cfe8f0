//! Branch name sets, environment keys, and defaults used by [`super::Settings`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Environment variable holding the comma-separated protected branch list.
pub const PROTECTED_BRANCHES_ENV: &str = "PROTECTED_BRANCHES";

/// Environment variable holding the comma-separated critical branch list.
pub const CRITICAL_BRANCHES_ENV: &str = "CRITICAL_BRANCHES";

/// Environment variable naming the default base reference.
pub const BASE_BRANCH_ENV: &str = "BASE_BRANCH_FOR_COMMIT_CHECK";

/// A set of lowercase branch names.
///
/// Membership tests lowercase the probe, so `Main` matches `main`. Git
/// always receives branch names verbatim from enumeration, never from here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BranchSet(BTreeSet<String>);

impl BranchSet {
    /// Build a set from names, trimming and lowercasing them and dropping blanks.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(names);
        set
    }

    /// Parse a comma-separated list such as `"main, dev,,release"`.
    pub fn parse_list(list: &str) -> Self {
        Self::from_names(list.split(','))
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0.extend(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty()),
        );
    }

    /// Case-insensitive membership.
    pub fn contains(&self, branch: &str) -> bool {
        self.0.contains(&branch.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for BranchSet {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<BranchSet> for Vec<String> {
    fn from(set: BranchSet) -> Self {
        set.0.into_iter().collect()
    }
}

// Default value functions for serde
pub(crate) fn default_protected_branches() -> BranchSet {
    BranchSet::parse_list("main,master,develop,dev,release,staging,production")
}
pub(crate) fn default_critical_branches() -> BranchSet {
    BranchSet::parse_list("master,dev")
}
pub(crate) fn default_base_branch() -> String {
    "dev".to_string()
}
pub(crate) fn default_remote() -> String {
    "origin".to_string()
}
