//! # Repository Listing
//!
//! This module turns a query and a `RepositorySource` into output lines.
//!
//! ## Pipeline
//!
//! 1.  **Collect (`collect`)**: drive the source, keeping every repository
//!     the `Matcher` accepts. The source may call back from many threads;
//!     accepted records are appended under a mutex held only for the push.
//! 2.  **Order by time (`sort_by_mtime`)**: only with `--time`. Stats each
//!     working copy at sort time; an unreadable one counts as the epoch.
//! 3.  **Render (`render`)**: one line per selected occurrence, as a
//!     relative path, a full path, or the shortest unique subpath.
//! 4.  **Order by name**: without `--time`, the rendered lines are sorted.
//!
//! ## Duplicate occurrences
//!
//! A repository reachable from several roots appears once per root in the
//! collected list. For relative and full paths, each group of occurrences
//! sharing a relative path is reduced to one: the primary-root occurrence
//! when there is one, otherwise the first occurrence in list order. Unique
//! mode only labels the primary-root occurrence of a duplicated path, so a
//! path duplicated across secondary roots alone is not listed.
//!
//! ## Unique paths
//!
//! Unique mode labels each repository with the shortest suffix of its path
//! segments that no other listed repository shares. `github.com/a/dotfiles`
//! and `github.com/b/dotfiles` keep their owner (`a/dotfiles`,
//! `b/dotfiles`), while a lone `github.com/c/myproject` becomes `myproject`.
//! Counting must see every repository before any label is chosen, so it is
//! done in a separate first pass. A repository whose every suffix is shared
//! (`a/b` next to `x/a/b`) gets no line.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use log::debug;

use crate::error::{Error, Result};
use crate::query::{Matcher, Query};
use crate::repository::LocalRepository;
use crate::vcs::VcsBackend;
use crate::walker::RepositorySource;

/// How each repository is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// Path relative to its root, e.g. `github.com/owner/name`.
    #[default]
    Relative,
    /// Absolute path of the working copy.
    Full,
    /// Shortest suffix that is unique among the listed repositories.
    Unique,
}

/// Options for a single listing.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Match the query against whole path suffixes instead of substrings.
    pub exact: bool,
    pub format: PathFormat,
    /// Order by modification time (oldest first) instead of by name.
    pub sort_by_time: bool,
    /// Only list repositories managed by this backend.
    pub vcs: Option<VcsBackend>,
}

/// List the repositories matching `raw_query`.
///
/// Returns the output lines in their final order. A source failure aborts
/// the listing; nothing is returned in that case.
pub fn list(
    source: &dyn RepositorySource,
    raw_query: &str,
    options: &ListOptions,
) -> Result<Vec<String>> {
    let query = Query::parse(raw_query);
    let matcher = Matcher::new(&query, options.exact);
    debug!("Listing with {:?}", matcher);

    let mut repos = collect(source, options.vcs, &matcher)?;
    if options.sort_by_time {
        sort_by_mtime(&mut repos);
    }

    let mut lines = render(&repos, options.format);
    if !options.sort_by_time {
        lines.sort();
    }
    Ok(lines)
}

/// Gather every repository from `source` accepted by `matcher`.
///
/// The order of the result is the order in which the source delivered
/// records, which is unspecified for parallel sources.
pub fn collect(
    source: &dyn RepositorySource,
    vcs: Option<VcsBackend>,
    matcher: &Matcher,
) -> Result<Vec<LocalRepository>> {
    let repos: Mutex<Vec<LocalRepository>> = Mutex::new(Vec::new());

    source
        .walk(vcs, &|repo: LocalRepository| {
            if !matcher.is_match(&repo) {
                return;
            }
            repos
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(repo);
        })
        .map_err(|e| match e {
            Error::Walk { .. } => e,
            other => Error::Walk {
                operation: "collecting repositories".to_string(),
                message: other.to_string(),
            },
        })?;

    repos.into_inner().map_err(|_| Error::LockPoisoned {
        context: "collected repositories".to_string(),
    })
}

/// Sort ascending by modification time of each working copy.
///
/// The sort is stable. Working copies that cannot be stat'd sort as if
/// modified at the epoch, ahead of everything readable.
pub fn sort_by_mtime(repos: &mut [LocalRepository]) {
    repos.sort_by_cached_key(|repo| {
        repo.modified().unwrap_or_else(|e| {
            debug!("Cannot stat {}: {}", repo.full_path().display(), e);
            SystemTime::UNIX_EPOCH
        })
    });
}

/// Render repositories as output lines, preserving their order.
///
/// Each repository yields at most one line, however many roots hold it.
pub fn render(repos: &[LocalRepository], format: PathFormat) -> Vec<String> {
    match format {
        PathFormat::Relative => select_occurrences(repos)
            .iter()
            .map(|repo| repo.rel_path().to_string())
            .collect(),
        PathFormat::Full => select_occurrences(repos)
            .iter()
            .map(|repo| repo.full_path().to_string_lossy().into_owned())
            .collect(),
        PathFormat::Unique => unique_paths(repos),
    }
}

/// Keep one occurrence per relative path, in list order.
///
/// The primary-root occurrence wins; without one, the first occurrence is
/// kept.
fn select_occurrences(repos: &[LocalRepository]) -> Vec<&LocalRepository> {
    let mut chosen: HashMap<&str, usize> = HashMap::new();
    for (index, repo) in repos.iter().enumerate() {
        match chosen.entry(repo.rel_path()) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(mut slot) => {
                if repo.is_under_primary_root() && !repos[*slot.get()].is_under_primary_root() {
                    slot.insert(index);
                }
            }
        }
    }

    let keep: HashSet<usize> = chosen.into_values().collect();
    repos
        .iter()
        .enumerate()
        .filter(|(index, _)| keep.contains(index))
        .map(|(_, repo)| repo)
        .collect()
}

/// Label each repository with its shortest globally unique subpath.
///
/// An occurrence whose relative path appears more than once is only
/// labelled when it lives under the primary root. A repository none of
/// whose subpaths is unique produces no line.
fn unique_paths(repos: &[LocalRepository]) -> Vec<String> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        *occurrences.entry(repo.rel_path()).or_default() += 1;
    }

    // Pass 1: how many distinct repositories share each subpath
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut counted: HashSet<&str> = HashSet::new();
    for repo in repos {
        if counted.insert(repo.rel_path()) {
            for subpath in repo.subpaths() {
                *counts.entry(subpath).or_default() += 1;
            }
        }
    }

    // Pass 2: first subpath, shortest to longest, seen exactly once
    let mut emitted: HashSet<&str> = HashSet::new();
    repos
        .iter()
        .filter(|repo| occurrences[repo.rel_path()] == 1 || repo.is_under_primary_root())
        .filter(|repo| emitted.insert(repo.rel_path()))
        .filter_map(|repo| {
            let label = repo
                .subpaths()
                .into_iter()
                .rev()
                .find(|subpath| counts.get(subpath) == Some(&1));
            if label.is_none() {
                // Another repository's path ends with this whole path
                debug!("No unique subpath for {}", repo.rel_path());
            }
            label
        })
        .collect()
}
