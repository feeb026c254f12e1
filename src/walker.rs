//! # Repository Discovery
//!
//! This module finds working copies on disk. It is built around the
//! `RepositorySource` trait so that listing logic can be exercised against
//! in-memory sources in tests.
//!
//! `FsRepositorySource` walks every root in parallel on the rayon pool,
//! one task per root. Within a root the walk is depth-first; a directory
//! holding a VCS marker is reported and not descended into, so nested
//! checkouts (submodules, vendored clones) are not listed separately.
//!
//! ## Error policy
//!
//! - A root that does not exist is skipped.
//! - Entries that vanish mid-walk, dangling symlinks, symlink loops, and
//!   unreadable hidden directories are skipped with a log message.
//! - Any other error aborts the whole walk.

use std::io::ErrorKind;
use std::path::Path;

use log::{debug, trace, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::repository::LocalRepository;
use crate::roots::Roots;
use crate::vcs::{self, VcsBackend};

/// A producer of repository records.
///
/// Implementations may invoke `callback` from several threads at once and
/// in any order. `walk` returns once every record has been delivered, or
/// with the first error observed.
pub trait RepositorySource: Send + Sync {
    /// Report every repository managed by `vcs` (or by any backend when
    /// `None`) to `callback`.
    fn walk(
        &self,
        vcs: Option<VcsBackend>,
        callback: &(dyn Fn(LocalRepository) + Sync),
    ) -> Result<()>;
}

/// Discovers repositories by walking the filesystem under each root.
#[derive(Debug, Clone)]
pub struct FsRepositorySource {
    roots: Roots,
}

impl FsRepositorySource {
    pub fn new(roots: Roots) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }
}

impl RepositorySource for FsRepositorySource {
    fn walk(
        &self,
        vcs: Option<VcsBackend>,
        callback: &(dyn Fn(LocalRepository) + Sync),
    ) -> Result<()> {
        self.roots
            .paths()
            .par_iter()
            .enumerate()
            .try_for_each(|(index, root)| walk_root(root, index == 0, vcs, callback))
    }
}

fn walk_root(
    root: &Path,
    primary: bool,
    vcs: Option<VcsBackend>,
    callback: &(dyn Fn(LocalRepository) + Sync),
) -> Result<()> {
    match root.metadata() {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::Walk {
                operation: format!("walking {}", root.display()),
                message: "root is not a directory".to_string(),
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Skipping missing root {}", root.display());
            return Ok(());
        }
        Err(e) => {
            return Err(Error::Walk {
                operation: format!("reading root {}", root.display()),
                message: e.to_string(),
            })
        }
    }

    let mut entries = WalkDir::new(root).follow_links(true).into_iter();
    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_skippable(&err) => {
                warn!("Skipping {}", err);
                continue;
            }
            Err(err) => {
                return Err(Error::Walk {
                    operation: format!("walking {}", root.display()),
                    message: err.to_string(),
                })
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        if let Some(backend) = vcs::detect(entry.path(), vcs) {
            let repo = LocalRepository::from_full_path(entry.path(), root, primary, Some(backend))?;
            trace!("Found {} repository {}", backend, repo.rel_path());
            callback(repo);
            entries.skip_current_dir();
        }
    }

    Ok(())
}

/// Errors that only affect one entry and never abort the walk.
fn is_skippable(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return true;
    }
    match err.io_error().map(|e| e.kind()) {
        Some(ErrorKind::NotFound) => true,
        Some(ErrorKind::PermissionDenied) => err
            .path()
            .and_then(|p| p.file_name())
            .is_some_and(|name| name.to_string_lossy().starts_with('.')),
        _ => false,
    }
}
