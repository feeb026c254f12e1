//! # Root Command Implementation
//!
//! Prints the primary repository root, or every root with `--all`. Useful
//! in shell scripts, e.g. `cd "$(lsrepo root)/$(lsrepo list | fzf)"`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lsrepo::roots::Roots;

use super::list::resolve_roots;

/// Show the repository roots
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Print every root, primary first.
    #[arg(short, long)]
    pub all: bool,

    /// Root directory to use instead of the configured ones. May be repeated.
    #[arg(long, value_name = "DIR")]
    pub root: Vec<PathBuf>,
}

/// Execute the `root` command.
pub fn execute(args: RootArgs) -> Result<()> {
    let roots = resolve_roots(&args.root)?;
    for line in root_lines(&roots, args.all) {
        println!("{}", line);
    }
    Ok(())
}

fn root_lines(roots: &Roots, all: bool) -> Vec<String> {
    let shown = if all {
        roots.paths()
    } else {
        &roots.paths()[..1]
    };
    shown.iter().map(|p| p.display().to_string()).collect()
}
