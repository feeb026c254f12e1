//! Default values for lsrepo configuration.
//!
//! This module provides centralized names and fallbacks used across
//! commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable holding a list of repository roots.
///
/// Entries are separated with the platform path-list separator (`:` on
/// Unix, `;` on Windows). The first entry is the primary root.
pub const ROOT_ENV_VAR: &str = "LSREPO_ROOT";

/// Git config key consulted when `LSREPO_ROOT` is unset.
///
/// The key may be set multiple times; values are read in order with
/// `git config --path --get-all`.
pub const ROOT_GIT_CONFIG_KEY: &str = "lsrepo.root";

/// Name of the fallback root directory under the user's home.
pub const DEFAULT_ROOT_DIRNAME: &str = "lsrepo";

/// Returns the default repository root.
///
/// Uses `~/lsrepo`, falling back to `./lsrepo` if the home directory
/// cannot be determined.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_ROOT_DIRNAME)
}
