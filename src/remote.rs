//! # Remote Addresses
//!
//! Users may pass a clone URL (`https://github.com/owner/name.git`) or an
//! SCP-like address (`git@github.com:owner/name.git`) where a path query is
//! expected. This module recognises those forms and maps them onto the
//! relative path the repository would have under a root
//! (`github.com/owner/name`).
//!
//! It also provides `looks_like_authority`, the syntactic test used to
//! decide whether the first segment of a relative path names a host.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

static HAS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:]+://").expect("scheme pattern is valid"));

static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<user>[^@/]+@)?(?P<host>[^:/]+):(?P<path>/?.+)$")
        .expect("scp pattern is valid")
});

static AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z0-9]\.[A-Za-z]+|^localhost)(?::\d{1,5})?$")
        .expect("authority pattern is valid")
});

/// Whether `s` starts with a URL scheme such as `https://`.
pub fn has_scheme(s: &str) -> bool {
    HAS_SCHEME.is_match(s)
}

/// Whether `s` has the `[user@]host:path` shape used by scp and ssh remotes.
pub fn is_scp_like(s: &str) -> bool {
    !has_scheme(s) && SCP_LIKE.is_match(s)
}

/// Whether a path segment looks like a network authority.
///
/// Accepts `host.tld`, `host.tld:port`, and `localhost[:port]`.
pub fn looks_like_authority(segment: &str) -> bool {
    AUTHORITY.is_match(segment)
}

/// Parse a clone URL or SCP-like address into a `Url`.
///
/// SCP-like addresses are rewritten to the equivalent `ssh://` URL first.
pub fn parse_remote(s: &str) -> Result<Url> {
    if has_scheme(s) {
        return Ok(Url::parse(s)?);
    }

    let caps = SCP_LIKE.captures(s).ok_or_else(|| Error::Remote {
        url: s.to_string(),
        message: "not a URL or scp-like address".to_string(),
    })?;
    let user = caps.name("user").map_or("", |m| m.as_str());
    let host = &caps["host"];
    let path = caps["path"].trim_start_matches('/');

    Ok(Url::parse(&format!("ssh://{user}{host}/{path}"))?)
}

/// Map a remote URL onto its relative path under a root.
///
/// The result is `host/segment/...` with empty segments dropped and a
/// trailing `.git` removed. The port, user, query, and fragment are not
/// part of the local layout.
pub fn rel_path_for(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::Remote {
            url: url.to_string(),
            message: "missing host".to_string(),
        })?;

    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(Error::Remote {
            url: url.to_string(),
            message: "missing repository path".to_string(),
        });
    }

    let joined = format!("{}/{}", host, segments.join("/"));
    Ok(joined.strip_suffix(".git").unwrap_or(&joined).to_string())
}
