// src/config/builder.rs

use super::validation::validate_builder_options;
use super::{Config, OutputDestination};
use crate::cli::Cli;
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS};
use crate::errors::Result;
use crate::filtering::PatternFilter;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted for a token when none is given explicitly.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Builds a [`Config`] from CLI arguments or programmatic settings.
///
/// # Examples
///
/// ```
/// use repoflat::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .repo_url("https://github.com/octo/hello")
///     .max_depth(1)
///     .listing_only(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_depth, 1);
/// assert!(config.listing_only);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    pub(super) repo_url: Option<String>,
    pub(super) branch: Option<String>,
    pub(super) token: Option<String>,
    pub(super) token_from_env: bool,
    pub(super) max_depth: Option<usize>,
    pub(super) ignore_patterns: Option<Vec<String>>,
    pub(super) binary_extensions: Option<Vec<String>>,
    pub(super) no_default_ignores: bool,
    pub(super) listing_only: Option<bool>,
    pub(super) timeout_secs: Option<u64>,
    pub(super) output_file: Option<String>,
    pub(super) paste: Option<bool>,
}

impl ConfigBuilder {
    /// Creates an empty builder. No environment variables are read unless
    /// [`ConfigBuilder::token_from_env`] is enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from parsed CLI arguments. `GITHUB_TOKEN` is used when
    /// `--token` is absent.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            repo_url: Some(cli.repo_url),
            branch: cli.branch,
            token: cli.token,
            token_from_env: true,
            max_depth: cli.max_depth,
            ignore_patterns: cli.ignore_patterns,
            binary_extensions: cli.binary_extensions,
            no_default_ignores: cli.no_default_ignores,
            listing_only: Some(cli.listing_only),
            timeout_secs: cli.timeout,
            output_file: cli.output_file,
            #[cfg(feature = "clipboard")]
            paste: Some(cli.paste),
            #[cfg(not(feature = "clipboard"))]
            paste: None,
        }
    }

    /// Sets the repository URL.
    pub fn repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    /// Overrides the branch to read.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads `GITHUB_TOKEN` when no token was set explicitly.
    pub fn token_from_env(mut self, enabled: bool) -> Self {
        self.token_from_env = enabled;
        self
    }

    /// Sets the maximum directory depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Adds name substrings to skip.
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = Some(patterns);
        self
    }

    /// Adds extensions to treat as binary.
    pub fn binary_extensions(mut self, extensions: Vec<String>) -> Self {
        self.binary_extensions = Some(extensions);
        self
    }

    /// Drops the built-in ignore list.
    pub fn no_default_ignores(mut self, enabled: bool) -> Self {
        self.no_default_ignores = enabled;
        self
    }

    /// Skips content fetching.
    pub fn listing_only(mut self, enabled: bool) -> Self {
        self.listing_only = Some(enabled);
        self
    }

    /// Sets the per-request timeout, in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Writes output to a file.
    pub fn output_file(mut self, path: impl Into<String>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Copies output to the clipboard.
    #[cfg(feature = "clipboard")]
    pub fn paste(mut self, enabled: bool) -> Self {
        self.paste = Some(enabled);
        self
    }

    /// Validates the settings and builds the [`Config`].
    ///
    /// # Errors
    /// Returns a [`crate::errors::ConfigError`] for missing or conflicting options.
    pub fn build(self) -> Result<Config> {
        validate_builder_options(&self)?;

        let token = self
            .token
            .clone()
            .or_else(|| {
                if self.token_from_env {
                    env::var(TOKEN_ENV_VAR).ok()
                } else {
                    None
                }
            })
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if token.is_some() {
            log::debug!("Using an access token for authentication.");
        }

        let mut filter = PatternFilter::default();
        if self.no_default_ignores {
            filter = filter.with_ignore_patterns(Vec::new());
        }
        if let Some(patterns) = self.ignore_patterns {
            filter.extend_ignore_patterns(patterns);
        }
        if let Some(extensions) = self.binary_extensions {
            filter.extend_binary_extensions(extensions);
        }

        let output_destination = resolve_destination(self.output_file, self.paste);

        Ok(Config {
            repo_url: self.repo_url.unwrap_or_default(),
            branch: self.branch.filter(|b| !b.trim().is_empty()),
            token,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            filter,
            listing_only: self.listing_only.unwrap_or(false),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            output_destination,
        })
    }
}

#[cfg_attr(not(feature = "clipboard"), allow(unused_variables))]
fn resolve_destination(output_file: Option<String>, paste: Option<bool>) -> OutputDestination {
    #[cfg(feature = "clipboard")]
    {
        if paste.unwrap_or(false) {
            return OutputDestination::Clipboard;
        }
    }
    match output_file {
        Some(path) => OutputDestination::File(PathBuf::from(path)),
        None => OutputDestination::Stdout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigError, Error};
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() -> anyhow::Result<()> {
        let cli = Cli::parse_from(["repoflat", "https://github.com/octo/hello"]);
        let config = ConfigBuilder::from_cli(cli).token_from_env(false).build()?;
        assert_eq!(config.repo_url, "https://github.com/octo/hello");
        assert_eq!(config.branch, None);
        assert_eq!(config.token, None);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.listing_only);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.output_destination, OutputDestination::Stdout);
        assert!(config.filter.should_ignore("node_modules"));
        Ok(())
    }

    #[test]
    fn test_from_cli_all_options() -> anyhow::Result<()> {
        let cli = Cli::parse_from([
            "repoflat",
            "https://github.com/octo/hello",
            "--branch",
            "dev",
            "--token",
            "abc",
            "--max-depth",
            "5",
            "-i",
            "fixtures",
            "-x",
            "svg",
            "--listing-only",
            "--timeout",
            "7",
            "-o",
            "out.txt",
        ]);
        let config = ConfigBuilder::from_cli(cli).build()?;
        assert_eq!(config.branch.as_deref(), Some("dev"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.max_depth, 5);
        assert!(config.filter.should_ignore("test_fixtures"));
        assert!(config.filter.should_ignore(".git"));
        assert!(config.filter.is_binary("logo.svg"));
        assert!(config.listing_only);
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(
            config.output_destination,
            OutputDestination::File(PathBuf::from("out.txt"))
        );
        Ok(())
    }

    #[test]
    fn test_no_default_ignores() -> anyhow::Result<()> {
        let config = ConfigBuilder::new()
            .repo_url("https://github.com/o/r")
            .no_default_ignores(true)
            .ignore_patterns(vec!["secret".to_string()])
            .build()?;
        assert!(!config.filter.should_ignore("node_modules"));
        assert!(config.filter.should_ignore("secret.txt"));
        Ok(())
    }

    #[test]
    fn test_blank_token_is_ignored() -> anyhow::Result<()> {
        let config = ConfigBuilder::new()
            .repo_url("https://github.com/o/r")
            .token("   ")
            .build()?;
        assert_eq!(config.token, None);
        Ok(())
    }

    #[test]
    fn test_missing_repo_url_is_rejected() {
        let result = ConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::Missing(_)))
        ));
    }

    #[cfg(feature = "clipboard")]
    #[test]
    fn test_paste_sets_clipboard_destination() -> anyhow::Result<()> {
        let config = ConfigBuilder::new()
            .repo_url("https://github.com/o/r")
            .paste(true)
            .build()?;
        assert_eq!(config.output_destination, OutputDestination::Clipboard);
        Ok(())
    }
}
