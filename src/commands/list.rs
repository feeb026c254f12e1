//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints the local
//! repositories found under the configured roots.
//!
//! ## Functionality
//!
//! - **Query Filtering**: Substring match with smartcase, or exact match on
//!   path suffixes with `--exact`. Clone URLs and scp-style remotes are
//!   accepted as queries.
//! - **Output Formats**: Relative paths (default), full paths, or the
//!   shortest unique suffix of each path.
//! - **Sorting**: By name (default) or by modification time.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lsrepo::list::{self, ListOptions, PathFormat};
use lsrepo::roots::Roots;
use lsrepo::suggestions;
use lsrepo::vcs::VcsBackend;
use lsrepo::walker::FsRepositorySource;

/// List local repositories
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list repositories whose path contains QUERY.
    ///
    /// Matching is case-insensitive unless QUERY contains an upper-case
    /// letter. A leading host segment (e.g. `github.com/`) restricts the
    /// match to that host. Clone URLs are accepted.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Match QUERY exactly against the path or one of its suffixes.
    #[arg(short, long)]
    pub exact: bool,

    /// Print full paths.
    #[arg(short = 'p', long)]
    pub full_path: bool,

    /// Print the shortest path suffix that identifies each repository.
    ///
    /// Takes precedence over `--full-path`.
    #[arg(long)]
    pub unique: bool,

    /// Sort by modification time, oldest first.
    #[arg(short, long)]
    pub time: bool,

    /// Only list repositories managed by this VCS (git, hg, svn, ...).
    #[arg(long, value_name = "VCS")]
    pub vcs: Option<String>,

    /// Root directory to search. May be repeated; the first is primary.
    ///
    /// Defaults to `LSREPO_ROOT`, then git config `lsrepo.root`, then
    /// `~/lsrepo`.
    #[arg(long, value_name = "DIR")]
    pub root: Vec<PathBuf>,
}

impl ListArgs {
    fn options(&self) -> Result<ListOptions> {
        let vcs = self
            .vcs
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::parse::<VcsBackend>)
            .transpose()?;

        let format = if self.unique {
            PathFormat::Unique
        } else if self.full_path {
            PathFormat::Full
        } else {
            PathFormat::Relative
        };

        Ok(ListOptions {
            exact: self.exact,
            format,
            sort_by_time: self.time,
            vcs,
        })
    }
}

/// Execute the `list` command.
///
/// Resolves the roots, walks them, and prints one line per repository.
/// Nothing is printed if the walk fails.
pub fn execute(args: ListArgs) -> Result<()> {
    let options = args.options()?;
    let roots = resolve_roots(&args.root)?;
    let source = FsRepositorySource::new(roots);

    let lines = list::list(&source, args.query.as_deref().unwrap_or(""), &options)
        .map_err(|e| suggestions::walk_failed(&e, source.roots().paths()))?;

    write_lines(&mut io::stdout().lock(), &lines)
}

/// Roots from `--root`, or the configured ones.
pub(crate) fn resolve_roots(explicit: &[PathBuf]) -> Result<Roots> {
    let roots = if explicit.is_empty() {
        Roots::resolve()?
    } else {
        Roots::from_paths(explicit)?
    };
    log::debug!("Searching roots {:?}", roots.paths());
    Ok(roots)
}

fn write_lines<W: Write>(out: W, lines: &[String]) -> Result<()> {
    let mut out = BufWriter::new(out);
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> ListArgs {
        ListArgs {
            query: None,
            exact: false,
            full_path: false,
            unique: false,
            time: false,
            vcs: None,
            root: Vec::new(),
        }
    }

    #[test]
    fn test_options_defaults() {
        let options = args().options().unwrap();
        assert!(!options.exact);
        assert!(!options.sort_by_time);
        assert_eq!(options.format, PathFormat::Relative);
        assert_eq!(options.vcs, None);
    }

    #[test]
    fn test_options_formats_and_vcs() {
        let options = ListArgs {
            unique: true,
            vcs: Some("hg".to_string()),
            ..args()
        }
        .options()
        .unwrap();
        assert_eq!(options.format, PathFormat::Unique);
        assert_eq!(options.vcs, Some(VcsBackend::Mercurial));

        let options = ListArgs {
            full_path: true,
            vcs: Some(String::new()),
            ..args()
        }
        .options()
        .unwrap();
        assert_eq!(options.format, PathFormat::Full);
        assert_eq!(options.vcs, None);
    }

    #[test]
    fn test_options_unique_wins_over_full_path() {
        let options = ListArgs {
            full_path: true,
            unique: true,
            ..args()
        }
        .options()
        .unwrap();
        assert_eq!(options.format, PathFormat::Unique);
    }

    #[test]
    fn test_options_unknown_vcs() {
        let result = ListArgs {
            vcs: Some("perforce".to_string()),
            ..args()
        }
        .options();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown VCS backend"));
    }

    #[test]
    fn test_write_lines() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &["a/x".to_string(), "b/y".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a/x\nb/y\n");
    }

    #[test]
    fn test_execute_with_explicit_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("github.com/a/x/.git")).unwrap();

        let result = execute(ListArgs {
            root: vec![temp.path().to_path_buf()],
            ..args()
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_execute_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "").unwrap();

        let err = execute(ListArgs {
            root: vec![file],
            ..args()
        })
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to walk repositories"));
        assert!(message.contains("hint:"));
    }
}
