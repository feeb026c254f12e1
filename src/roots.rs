//! # Repository Roots
//!
//! Repositories are discovered under one or more root directories. The
//! first root is the primary root: when the same repository is reachable
//! from several roots, only the primary occurrence is listed.
//!
//! ## Resolution order
//!
//! 1. `LSREPO_ROOT`, split on the platform path-list separator.
//! 2. `git config --path --get-all lsrepo.root`.
//! 3. `~/lsrepo`.
//!
//! Every entry has a leading `~` expanded, is made absolute against the
//! current directory, and has symlinks resolved when it exists. Duplicates
//! are dropped, keeping the first occurrence.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults::{default_root, ROOT_ENV_VAR, ROOT_GIT_CONFIG_KEY};
use crate::error::{Error, Result};
use crate::git;

/// The ordered set of directories to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    paths: Vec<PathBuf>,
}

impl Roots {
    /// Resolve roots from the environment, git config, or the default.
    pub fn resolve() -> Result<Self> {
        resolve_from(env::var_os(ROOT_ENV_VAR), || {
            git::config_get_all(ROOT_GIT_CONFIG_KEY)
        })
    }

    /// Build roots from explicit paths, normalising each one.
    ///
    /// Fails when no non-empty path is given.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let cwd = env::current_dir()?;
        let mut normalized: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.as_os_str().is_empty() {
                continue;
            }
            let path = normalize(path, &cwd);
            if !normalized.contains(&path) {
                normalized.push(path);
            }
        }

        if normalized.is_empty() {
            return Err(Error::Path {
                message: "no repository roots configured".to_string(),
            });
        }
        Ok(Self { paths: normalized })
    }

    /// The highest-priority root.
    pub fn primary(&self) -> &Path {
        &self.paths[0]
    }

    /// All roots, primary first.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

fn resolve_from<F>(env_value: Option<OsString>, git_values: F) -> Result<Roots>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let paths: Vec<PathBuf> = env::split_paths(&value).collect();
        if paths.iter().any(|p| !p.as_os_str().is_empty()) {
            debug!("Using roots from {}", ROOT_ENV_VAR);
            return Roots::from_paths(paths);
        }
    }

    let values = git_values()?;
    if !values.is_empty() {
        debug!("Using roots from git config {}", ROOT_GIT_CONFIG_KEY);
        return Roots::from_paths(values);
    }

    debug!("Using default root");
    Roots::from_paths([default_root()])
}

/// Expand `~`, absolutise against `cwd`, and resolve symlinks if possible.
fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let expanded = expand_tilde(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    // Missing roots are kept as-is; the walker skips them
    std::fs::canonicalize(&absolute).unwrap_or(absolute)
}

fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
