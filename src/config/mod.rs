//! Defines the `Config` struct and related types for application configuration.
//!
//! All settings parsed and validated from the CLI (or set programmatically via
//! [`ConfigBuilder`]) end up here, in a structured and type-safe form.

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS};
use crate::filtering::PatternFilter;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
mod validation;

/// The fully resolved configuration for a run.
#[derive(Clone)]
pub struct Config {
    /// The repository URL as given by the user. Parsed at the start of a run.
    pub repo_url: String,
    /// Branch override. Takes precedence over a branch named in the URL.
    pub branch: Option<String>,
    /// Access token sent as a bearer token, if any.
    pub token: Option<String>,
    /// Maximum directory depth to descend into.
    pub max_depth: usize,
    /// Ignore and binary rules.
    pub filter: PatternFilter,
    /// If `true`, skip content fetching and print only the listing.
    pub listing_only: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Where the rendered text goes.
    pub output_destination: OutputDestination,
}

// The token is redacted so configs can be logged at debug level.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repo_url", &self.repo_url)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("max_depth", &self.max_depth)
            .field("filter", &self.filter)
            .field("listing_only", &self.listing_only)
            .field("timeout", &self.timeout)
            .field("output_destination", &self.output_destination)
            .finish()
    }
}

impl Config {
    /// Creates a default `Config` for testing purposes.
    #[doc(hidden)]
    pub fn new_for_test(repo_url: &str) -> Self {
        Self {
            repo_url: repo_url.to_string(),
            branch: None,
            token: None,
            max_depth: DEFAULT_MAX_DEPTH,
            filter: PatternFilter::default(),
            listing_only: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_destination: OutputDestination::Stdout,
        }
    }
}

/// Represents the destination for the generated output.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum OutputDestination {
    /// Write to standard output.
    Stdout,
    /// Write to the specified file path.
    File(PathBuf),
    #[cfg(feature = "clipboard")]
    /// Copy the output to the system clipboard (requires the `clipboard` feature).
    Clipboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::new_for_test("https://github.com/o/r");
        config.token = Some("ghp_supersecret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_supersecret"));
        assert!(debug.contains("<redacted>"));
    }
}
