//! # Error Handling
//!
//! This module defines the centralized error type for the `lsrepo` library.
//! It uses `thiserror` to build an `Error` enum covering every failure the
//! listing pipeline can surface, each variant carrying enough context to
//! tell the user which operation failed.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures that can escape the library.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Two failures never reach the caller: a query that looks like a URL but
//! cannot be parsed falls back to plain substring matching, and a failed
//! `stat` while ordering by modification time is treated as the epoch.

use thiserror::Error;

/// Main error type for lsrepo operations
#[derive(Error, Debug)]
pub enum Error {
    /// Walking the repository roots failed.
    ///
    /// `operation` names what was being done (for example the root being
    /// walked) so the top-level message identifies the failing step.
    #[error("Failed to walk repositories while {operation}: {message}")]
    Walk { operation: String, message: String },

    /// A path could not be interpreted relative to its root.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// The requested VCS backend name is not known.
    #[error("Unknown VCS backend: {name}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnknownVcs {
        name: String,
        /// Optional suggestion for a similarly named backend
        hint: Option<String>,
    },

    /// A remote address parsed but could not be mapped to a local path.
    #[error("Remote resolution error for {url}: {message}")]
    Remote { url: String, message: String },

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
