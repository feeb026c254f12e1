//! # Local Repositories
//!
//! A `LocalRepository` is one working copy found under one root. The same
//! logical repository can be reachable from several roots (for example a
//! mirror directory listed next to the primary root); each occurrence is a
//! separate value sharing the same `rel_path`.
//!
//! ## Path vocabulary
//!
//! For a repository at `/home/me/src/github.com/owner/name` under the root
//! `/home/me/src`:
//!
//! - `rel_path`: `github.com/owner/name`, always `/`-separated.
//! - `path_parts`: `["github.com", "owner", "name"]`.
//! - `non_host_path()`: `owner/name`.
//! - `subpaths()`: `github.com/owner/name`, `owner/name`, `name`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::remote::looks_like_authority;
use crate::vcs::VcsBackend;

/// One repository occurrence under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    full_path: PathBuf,
    rel_path: String,
    path_parts: Vec<String>,
    root: PathBuf,
    primary_root: bool,
    vcs: Option<VcsBackend>,
}

impl LocalRepository {
    /// Build a repository from its absolute path and the root it was found
    /// under.
    ///
    /// Fails when `full_path` is not strictly below `root`.
    pub fn from_full_path(
        full_path: impl Into<PathBuf>,
        root: impl Into<PathBuf>,
        primary_root: bool,
        vcs: Option<VcsBackend>,
    ) -> Result<Self> {
        let full_path = full_path.into();
        let root = root.into();

        let relative = full_path.strip_prefix(&root).map_err(|_| Error::Path {
            message: format!(
                "{} is not under root {}",
                full_path.display(),
                root.display()
            ),
        })?;

        let path_parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if path_parts.is_empty() {
            return Err(Error::Path {
                message: format!("{} is the root itself", full_path.display()),
            });
        }

        Ok(Self {
            rel_path: path_parts.join("/"),
            path_parts,
            full_path,
            root,
            primary_root,
            vcs,
        })
    }

    /// Build a repository directly from a slash-separated relative path.
    ///
    /// The full path is `root` joined with every segment.
    pub fn from_rel_path(
        rel_path: &str,
        root: impl Into<PathBuf>,
        primary_root: bool,
        vcs: Option<VcsBackend>,
    ) -> Result<Self> {
        let root = root.into();
        let full_path = rel_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.clone(), |acc, part| acc.join(part));
        Self::from_full_path(full_path, root, primary_root, vcs)
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn path_parts(&self) -> &[String] {
        &self.path_parts
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vcs(&self) -> Option<VcsBackend> {
        self.vcs
    }

    /// Whether this occurrence was found under the primary root.
    pub fn is_under_primary_root(&self) -> bool {
        self.primary_root
    }

    /// The relative path without its leading host segment.
    ///
    /// The first segment is only dropped when it looks like a network
    /// authority and something follows it.
    pub fn non_host_path(&self) -> String {
        match self.path_parts.split_first() {
            Some((first, rest)) if !rest.is_empty() && looks_like_authority(first) => {
                rest.join("/")
            }
            _ => self.rel_path.clone(),
        }
    }

    /// Every non-empty suffix of `path_parts`, longest first.
    pub fn subpaths(&self) -> Vec<String> {
        (0..self.path_parts.len())
            .map(|i| self.path_parts[i..].join("/"))
            .collect()
    }

    /// Exact match: `query` equals the full relative path or one of its
    /// suffixes, so `github.com/owner/name`, `owner/name`, and `name` all
    /// select the same repository.
    pub fn matches(&self, query: &str) -> bool {
        self.subpaths().iter().any(|p| p == query)
    }

    /// Modification time of the working copy directory, read on demand.
    pub fn modified(&self) -> io::Result<SystemTime> {
        fs::metadata(&self.full_path)?.modified()
    }
}
