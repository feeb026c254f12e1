//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lsrepo::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("{}", err);
//!
//! // Use:
//! return Err(suggestions::walk_failed(&err, &roots));
//! ```

use std::path::PathBuf;

use crate::defaults::{ROOT_ENV_VAR, ROOT_GIT_CONFIG_KEY};
use crate::error::Error;

/// Generate an error for a failed repository walk.
///
/// Includes the configured roots and hints about:
/// - Checking directory permissions
/// - Overriding the roots with `--root`, `LSREPO_ROOT`, or git config
pub fn walk_failed(error: &Error, roots: &[PathBuf]) -> anyhow::Error {
    let roots = roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    anyhow::anyhow!(
        "{error}\n\
         roots: {roots}\n\n\
         hint: Check that every root directory is readable\n\
         hint: Use --root to list a different directory\n\
         hint: Set {ROOT_ENV_VAR} or git config {ROOT_GIT_CONFIG_KEY} to change the default roots"
    )
}

/// Build the hint for an unrecognised VCS backend name.
///
/// Suggests the closest known name when one is within a small edit
/// distance, and always lists the accepted names.
pub fn unknown_vcs_hint(name: &str, known: &[&str]) -> String {
    let did_you_mean = find_similar(name, known)
        .map(|s| format!("Did you mean '{s}'? "))
        .unwrap_or_default();

    format!("{did_you_mean}Valid backends are: {}", known.join(", "))
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Two rolling rows are enough; only the previous row is ever read.
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}
