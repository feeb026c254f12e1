//! # Query Resolution and Matching
//!
//! A raw query goes through two steps before it is tested against
//! repositories:
//!
//! 1. **Normalisation (`Query::parse`)**: a clone URL or SCP-like address is
//!    rewritten to the relative path the repository would have locally, so
//!    `git@github.com:owner/name.git` becomes `github.com/owner/name`. If
//!    the first segment then looks like a host and more segments follow,
//!    the host is split off and matched separately.
//! 2. **Predicate building (`Matcher::new`)**: the normalised query becomes
//!    one of three matchers, evaluated by `Matcher::is_match`.
//!
//! ## Smartcase
//!
//! Substring matching is case-insensitive while the query is all
//! lower-case. A single upper-case character makes it case-sensitive.

use log::debug;

use crate::remote;
use crate::repository::LocalRepository;

/// A normalised query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    full: String,
    path: String,
    host: Option<String>,
}

impl Query {
    /// Normalise a raw query string.
    ///
    /// URL resolution failures are not errors: the raw string is kept and
    /// matched literally.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        let full = resolve_remote(raw).unwrap_or_else(|| raw.to_string());

        match full.split_once('/') {
            Some((first, rest)) if !rest.is_empty() && remote::looks_like_authority(first) => {
                Self {
                    path: rest.to_string(),
                    host: Some(first.to_string()),
                    full,
                }
            }
            _ => Self {
                path: full.clone(),
                host: None,
                full,
            },
        }
    }

    /// The query before the host was split off.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The query with any host segment removed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The host segment, when one was split off.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }
}

/// Rewrite a URL or SCP-like address to a relative path, if it is one.
fn resolve_remote(raw: &str) -> Option<String> {
    if !remote::has_scheme(raw) && !remote::is_scp_like(raw) {
        return None;
    }

    match remote::parse_remote(raw).and_then(|url| remote::rel_path_for(&url)) {
        Ok(rel_path) => {
            debug!("Resolved query {} to {}", raw, rel_path);
            Some(rel_path.replace('\\', "/"))
        }
        Err(e) => {
            debug!("Matching {} literally: {}", raw, e);
            None
        }
    }
}

/// The repository predicate built from a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Accept every repository.
    All,
    /// Accept repositories whose relative path, or a suffix of it, equals
    /// the query.
    Exact(String),
    /// Accept repositories whose non-host path contains `query`, optionally
    /// restricted to one host.
    ///
    /// When `case_sensitive` is false, `query` is already lower-cased.
    Substring {
        query: String,
        host: Option<String>,
        case_sensitive: bool,
    },
}

impl Matcher {
    /// Build the predicate for `query`.
    ///
    /// Exact mode compares against the unsplit query; a host prefix is
    /// itself part of the relative path being compared.
    pub fn new(query: &Query, exact: bool) -> Self {
        if query.is_empty() {
            return Matcher::All;
        }
        if exact {
            return Matcher::Exact(query.full().to_string());
        }

        let path = query.path();
        let lowered = path.to_lowercase();
        let case_sensitive = lowered != path;
        Matcher::Substring {
            query: if case_sensitive { path.to_string() } else { lowered },
            host: query.host().map(str::to_string),
            case_sensitive,
        }
    }

    /// Test one repository.
    pub fn is_match(&self, repo: &LocalRepository) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Exact(query) => repo.matches(query),
            Matcher::Substring {
                query,
                host,
                case_sensitive,
            } => {
                let haystack = repo.non_host_path();
                let found = if *case_sensitive {
                    haystack.contains(query.as_str())
                } else {
                    haystack.to_lowercase().contains(query.as_str())
                };
                found
                    && host
                        .as_deref()
                        .is_none_or(|h| repo.path_parts().first().is_some_and(|p| p == h))
            }
        }
    }
}
