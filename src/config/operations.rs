//! Settings loading, environment overlay, and validation.

use super::model::Settings;
use super::types::{BASE_BRANCH_ENV, BranchSet, CRITICAL_BRANCHES_ENV, PROTECTED_BRANCHES_ENV};
use crate::error::{RetireError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for in the working directory and its ancestors.
const DOTENV_FILE: &str = ".env";

impl Settings {
    /// Resolve settings for a run.
    ///
    /// Starts from the YAML file when given (defaults otherwise), overlays the
    /// environment as seen through `lookup`, then validates. No repository is
    /// touched here, so an empty protected or critical set aborts the run
    /// before any git command executes.
    pub fn resolve<F>(config_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_env(lookup);
        settings.validate()?;
        Ok(settings)
    }

    /// Resolve settings from the process environment, falling back to the
    /// nearest `.env` file at or above the working directory.
    pub fn from_process_env(config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::resolve_in(config_path, &cwd, |key| std::env::var(key).ok())
    }

    /// Like [`Settings::resolve`], with variables from the nearest `.env` at
    /// or above `dir` filling in whatever `lookup` does not define.
    ///
    /// The `.env` values never enter the process environment.
    pub fn resolve_in<F>(config_path: Option<&Path>, dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dotenv = match find_dotenv(dir) {
            Some(path) => load_dotenv(&path)?,
            None => HashMap::new(),
        };
        Self::resolve(config_path, |key| {
            lookup(key).or_else(|| dotenv.get(key).cloned())
        })
    }

    /// Load settings from a YAML file without validating them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RetireError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string. Unknown fields are ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| RetireError::ConfigError(format!("failed to parse config YAML: {}", e)))
    }

    /// Overlay environment variables.
    ///
    /// A variable that is set replaces the corresponding value even when it
    /// resolves to nothing; validation then rejects the empty result.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(list) = lookup(PROTECTED_BRANCHES_ENV) {
            debug!(value = %list, "protected branches from environment");
            self.protected_branches = BranchSet::parse_list(&list);
        }
        if let Some(list) = lookup(CRITICAL_BRANCHES_ENV) {
            debug!(value = %list, "critical branches from environment");
            self.critical_branches = BranchSet::parse_list(&list);
        }
        if let Some(base) = lookup(BASE_BRANCH_ENV) {
            self.base_branch = base.trim().to_string();
        }
    }

    /// Validate settings and return an error on values that would make the
    /// run unsafe.
    ///
    /// Validation rules:
    /// - protected and critical sets must be non-empty
    /// - base branch and remote must be non-empty
    /// - every protected pattern must be a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.protected_branches.is_empty() {
            return Err(RetireError::ConfigError(format!(
                "{} resolved to an empty set. Refusing to run to avoid deleting important branches.",
                PROTECTED_BRANCHES_ENV
            )));
        }

        if self.critical_branches.is_empty() {
            return Err(RetireError::ConfigError(format!(
                "{} resolved to an empty set. Refusing to run to avoid deleting important branches.",
                CRITICAL_BRANCHES_ENV
            )));
        }

        if self.base_branch.trim().is_empty() {
            return Err(RetireError::ConfigError(format!(
                "{} is required to run checks",
                BASE_BRANCH_ENV
            )));
        }

        if self.remote.trim().is_empty() {
            return Err(RetireError::ConfigError(
                "config validation failed: remote must be non-empty".to_string(),
            ));
        }

        self.protected_globs()?;
        Ok(())
    }

    /// Compile `protected_patterns` into a case-insensitive matcher.
    pub fn protected_globs(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in &self.protected_patterns {
            let pattern = pattern.trim().to_lowercase();
            if pattern.is_empty() {
                continue;
            }
            let glob = Glob::new(&pattern).map_err(|e| {
                RetireError::ConfigError(format!(
                    "config validation failed: invalid protected pattern '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }

        builder.build().map_err(|e| {
            RetireError::ConfigError(format!(
                "config validation failed: protected patterns: {}",
                e
            ))
        })
    }
}

/// Nearest `.env` file at or above `dir`.
fn find_dotenv(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(DOTENV_FILE))
        .find(|candidate| candidate.is_file())
}

/// Parse a `.env` file into a map without touching the process environment.
fn load_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    debug!(path = %path.display(), "loading .env");

    let dotenv_error = |e: dotenvy::Error| {
        RetireError::ConfigError(format!(
            "failed to read env file '{}': {}",
            path.display(),
            e
        ))
    };

    dotenvy::from_path_iter(path)
        .map_err(dotenv_error)?
        .map(|item| item.map_err(dotenv_error))
        .collect()
}
