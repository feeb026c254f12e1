//! # lsrepo Library
//!
//! This library finds locally cloned source-control repositories under one
//! or more root directories and renders them as paths. It backs the
//! `lsrepo` command-line tool but can be used on its own.
//!
//! ## Quick Example
//!
//! ```
//! use lsrepo::list::{render, PathFormat};
//! use lsrepo::repository::LocalRepository;
//!
//! let repos: Vec<LocalRepository> = [
//!     "github.com/a/dotfiles",
//!     "github.com/b/dotfiles",
//!     "github.com/c/myproject",
//! ]
//! .iter()
//! .map(|p| LocalRepository::from_rel_path(p, "/src", true, None).unwrap())
//! .collect();
//!
//! let lines = render(&repos, PathFormat::Unique);
//! assert_eq!(lines, vec!["a/dotfiles", "b/dotfiles", "myproject"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Roots (`roots`)**: The ordered directories to search. The first is
//!   the primary root.
//! - **Repositories (`repository`)**: One working copy under one root, with
//!   helpers to split its relative path into segments and suffixes.
//! - **Discovery (`walker`, `vcs`)**: Walks each root in parallel and
//!   reports directories that carry VCS metadata.
//! - **Queries (`query`, `remote`)**: Turns a raw query, possibly a clone
//!   URL, into a predicate over repositories.
//! - **Listing (`list`)**: Collects matching repositories, orders them,
//!   and renders relative, full, or shortest-unique paths.
//!
//! ## Execution Flow
//!
//! 1.  **Normalise** the query (`query::Query::parse`).
//! 2.  **Build** the predicate (`query::Matcher::new`).
//! 3.  **Collect** matches from the roots (`list::collect`).
//! 4.  **Order** by modification time when requested (`list::sort_by_mtime`).
//! 5.  **Render** the output lines (`list::render`), then sort them by name
//!     unless ordering by time.

pub mod defaults;
pub mod error;
pub mod git;
pub mod list;
pub mod query;
pub mod remote;
pub mod repository;
pub mod roots;
pub mod suggestions;
pub mod vcs;
pub mod walker;

#[cfg(test)]
mod query_proptest;
