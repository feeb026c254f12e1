//! # Version Control Backends
//!
//! A directory is treated as a repository working copy when it contains the
//! metadata marker of one of the supported backends. No metadata is ever
//! read; the marker's presence is enough.
//!
//! Markers are probed in a fixed order so that more specific layouts win:
//! a git-svn checkout also has a `.git` directory, so `.git/svn` is checked
//! first.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;
use crate::suggestions;

/// A supported version control system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsBackend {
    Git,
    GitSvn,
    Subversion,
    Mercurial,
    Darcs,
    Pijul,
    Fossil,
    Bazaar,
    Cvs,
}

/// Marker paths in probe order.
const MARKERS: &[(&str, VcsBackend)] = &[
    (".git/svn", VcsBackend::GitSvn),
    (".git", VcsBackend::Git),
    (".svn", VcsBackend::Subversion),
    (".hg", VcsBackend::Mercurial),
    ("_darcs", VcsBackend::Darcs),
    (".pijul", VcsBackend::Pijul),
    (".fslckout", VcsBackend::Fossil),
    ("_FOSSIL_", VcsBackend::Fossil),
    (".bzr", VcsBackend::Bazaar),
    ("CVS/Repository", VcsBackend::Cvs),
];

/// Names accepted by `--vcs`, including aliases.
const NAMES: &[(&str, VcsBackend)] = &[
    ("git", VcsBackend::Git),
    ("github", VcsBackend::Git),
    ("git-svn", VcsBackend::GitSvn),
    ("svn", VcsBackend::Subversion),
    ("subversion", VcsBackend::Subversion),
    ("hg", VcsBackend::Mercurial),
    ("mercurial", VcsBackend::Mercurial),
    ("darcs", VcsBackend::Darcs),
    ("pijul", VcsBackend::Pijul),
    ("fossil", VcsBackend::Fossil),
    ("bzr", VcsBackend::Bazaar),
    ("bazaar", VcsBackend::Bazaar),
    ("cvs", VcsBackend::Cvs),
];

impl VcsBackend {
    /// Canonical short name, as printed in logs.
    pub fn name(self) -> &'static str {
        match self {
            VcsBackend::Git => "git",
            VcsBackend::GitSvn => "git-svn",
            VcsBackend::Subversion => "svn",
            VcsBackend::Mercurial => "hg",
            VcsBackend::Darcs => "darcs",
            VcsBackend::Pijul => "pijul",
            VcsBackend::Fossil => "fossil",
            VcsBackend::Bazaar => "bzr",
            VcsBackend::Cvs => "cvs",
        }
    }

    /// Whether a working copy of this backend is accepted by `filter`.
    ///
    /// A `git` filter also accepts git-svn checkouts, which are git
    /// repositories underneath.
    pub fn satisfies(self, filter: Option<VcsBackend>) -> bool {
        match filter {
            None => true,
            Some(VcsBackend::Git) => matches!(self, VcsBackend::Git | VcsBackend::GitSvn),
            Some(wanted) => self == wanted,
        }
    }
}

impl fmt::Display for VcsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VcsBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, backend)| *backend)
            .ok_or_else(|| {
                let known: Vec<&str> = NAMES.iter().map(|(name, _)| *name).collect();
                Error::UnknownVcs {
                    name: s.to_string(),
                    hint: Some(suggestions::unknown_vcs_hint(&wanted, &known)),
                }
            })
    }
}

/// Detect which backend manages `dir`, if any.
///
/// Returns the first backend (in probe order) whose marker exists directly
/// inside `dir` and which satisfies `filter`.
pub fn detect(dir: &Path, filter: Option<VcsBackend>) -> Option<VcsBackend> {
    MARKERS
        .iter()
        .filter(|(_, backend)| backend.satisfies(filter))
        .find(|(marker, _)| dir.join(marker).exists())
        .map(|(_, backend)| *backend)
}
