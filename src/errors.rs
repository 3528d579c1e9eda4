//! Defines application-specific error types.
//!
//! The taxonomy separates structural failures, which abort a run, from
//! per-file content failures, which are rendered inline and never abort.

use thiserror::Error;

/// Errors related to invalid configuration settings or combinations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Two options that cannot be used together were both set.
    #[error("Cannot use {option1} and {option2} simultaneously.")]
    Conflict {
        /// The first conflicting option.
        option1: String,
        /// The second conflicting option.
        option2: String,
    },
    /// An option was given a value outside its accepted range.
    #[error("Invalid value for {option}: {reason}")]
    InvalidValue {
        /// The option name.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A required option was not provided.
    #[error("Missing required option: {0}")]
    Missing(String),
}

/// Errors related to clipboard operations.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The system clipboard could not be opened.
    #[error("Failed to initialize clipboard: {0}")]
    Initialization(String),
    /// The clipboard was opened but the text could not be set.
    #[error("Failed to set clipboard content: {0}")]
    SetContent(String),
}

/// Application-specific errors used throughout `repoflat`.
#[derive(Error, Debug)]
pub enum Error {
    /// The repository URL is malformed or does not point at a supported host.
    /// Raised before any network activity.
    #[error("Invalid repository URL '{url}': {reason}")]
    Input {
        /// The URL as given by the user.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A listing or metadata request failed. Aborts the whole traversal.
    #[error("GitHub API request to '{url}' failed: {status_text}")]
    Provider {
        /// The request URL.
        url: String,
        /// The HTTP status code, if a response was received at all.
        status: Option<u16>,
        /// Human-readable status, including the API message when present.
        status_text: String,
    },

    /// Fetching a single file's content failed. Recovered per file.
    #[error("Failed to fetch '{url}': {}{status_text}{}", .status.map(|s| format!("{} ", s)).unwrap_or_default(), fmt_snippet(.body_snippet))]
    Fetch {
        /// The request URL.
        url: String,
        /// The HTTP status code, if a response was received at all.
        status: Option<u16>,
        /// The status reason or transport error text.
        status_text: String,
        /// The beginning of the response body, best effort.
        body_snippet: String,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Clipboard failure.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// Error occurring while writing output.
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a stream without an associated path (e.g. stdout).
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,

    /// The walk completed without recording a single entry.
    #[error("No files found in the repository at the requested path.")]
    NoEntriesFound,
}

/// Result alias used by the library.
pub type Result<T> = std::result::Result<T, Error>;

fn fmt_snippet(snippet: &str) -> String {
    if snippet.is_empty() {
        String::new()
    } else {
        format!(" - {}", snippet)
    }
}

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
