//! Shared test utilities for E2E tests.
//!
//! This module provides fixtures and helper functions to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_repo("github.com/a/x");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A test fixture holding one or more repository roots in temporary
/// directories.
///
/// The first root is the primary root. Commands built from the fixture
/// search exactly these roots through `LSREPO_ROOT`, so the user's git
/// config never leaks into tests.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_repo("github.com/a/dotfiles")
///     .with_repo("github.com/b/dotfiles");
///
/// fixture.command()
///     .args(["list", "--unique"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    roots: Vec<assert_fs::TempDir>,
}

impl TestFixture {
    /// Create a new fixture with a single empty root.
    pub fn new() -> Self {
        Self {
            roots: vec![assert_fs::TempDir::new().expect("Failed to create temp directory")],
        }
    }

    /// Add another, lower-priority root.
    pub fn with_secondary_root(mut self) -> Self {
        self.roots
            .push(assert_fs::TempDir::new().expect("Failed to create temp directory"));
        self
    }

    /// Add a git repository at `rel_path` under the primary root.
    pub fn with_repo(self, rel_path: &str) -> Self {
        self.with_repo_in(0, rel_path, ".git")
    }

    /// Add a repository with the given VCS marker under root `index`.
    pub fn with_repo_in(self, index: usize, rel_path: &str, marker: &str) -> Self {
        self.roots[index]
            .child(rel_path)
            .child(marker)
            .create_dir_all()
            .expect("Failed to create repository");
        self
    }

    /// Add a plain file under the primary root.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.roots[0]
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Path of root `index`.
    pub fn root(&self, index: usize) -> &Path {
        self.roots[index].path()
    }

    /// Canonical path of a repository under root `index`.
    pub fn repo_path(&self, index: usize, rel_path: &str) -> PathBuf {
        self.root(index)
            .canonicalize()
            .expect("Failed to canonicalize root")
            .join(rel_path)
    }

    /// The `LSREPO_ROOT` value for every root, primary first.
    pub fn root_env(&self) -> std::ffi::OsString {
        std::env::join_paths(self.roots.iter().map(|r| r.path()))
            .expect("Failed to join root paths")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command that searches this fixture's roots.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lsrepo");
        cmd.current_dir(self.root(0))
            .env("LSREPO_ROOT", self.root_env())
            .env_remove("RUST_LOG");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_root() {
        let fixture = TestFixture::new();
        assert!(fixture.root(0).exists());
    }

    #[test]
    fn test_fixture_with_repo() {
        let fixture = TestFixture::new().with_repo("github.com/a/x");
        assert!(fixture.root(0).join("github.com/a/x/.git").is_dir());
    }

    #[test]
    fn test_fixture_with_secondary_root() {
        let fixture = TestFixture::new()
            .with_secondary_root()
            .with_repo_in(1, "github.com/a/x", ".hg");
        assert!(fixture.root(1).join("github.com/a/x/.hg").is_dir());
    }
}
