//! Thin wrappers around the system `git` command.
//!
//! Only configuration lookups are needed: repository roots can be set with
//! a multi-valued git config key.

use std::io::ErrorKind;
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Read every value of a multi-valued git config key.
///
/// Runs `git config --path --get-all <key>`, so values such as `~/src` are
/// expanded by git itself. An unset key (exit status 1) and a missing `git`
/// executable both yield an empty list; any other failure is an error.
pub fn config_get_all(key: &str) -> Result<Vec<String>, Error> {
    let output = match Command::new("git")
        .args(["config", "--path", "--get-all", key])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("git executable not found, ignoring config key {}", key);
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(Error::GitCommand {
                command: format!("config --path --get-all {}", key),
                stderr: e.to_string(),
            })
        }
    };

    if !output.status.success() {
        // Exit status 1 means the key is not set
        if output.status.code() == Some(1) {
            return Ok(Vec::new());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: format!("config --path --get-all {}", key),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(parse_config_values(&String::from_utf8_lossy(&output.stdout)))
}

/// Split `git config --get-all` output into values, dropping blank lines.
fn parse_config_values(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
