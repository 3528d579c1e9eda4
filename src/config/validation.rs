// src/config/validation.rs

use super::ConfigBuilder;
use crate::errors::{ConfigError, Result};

/// Validates combinations of options that clap cannot easily express.
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<()> {
    if builder
        .repo_url
        .as_deref()
        .map_or(true, |u| u.trim().is_empty())
    {
        return Err(ConfigError::Missing("repository URL".to_string()).into());
    }
    if builder.output_file.is_some() && builder.paste.unwrap_or(false) {
        return Err(ConfigError::Conflict {
            option1: "--output".to_string(),
            option2: "--paste".to_string(),
        }
        .into());
    }
    if builder.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidValue {
            option: "--timeout".to_string(),
            reason: "must be at least 1 second".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::errors::Error;
    use clap::Parser;

    #[cfg(feature = "clipboard")]
    #[test]
    fn test_output_conflict_validation() {
        let cli = Cli::parse_from(["repoflat", "https://github.com/o/r", "-o", "out.txt", "-p"]);
        let result = validate_builder_options(&ConfigBuilder::from_cli(cli));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("simultaneously"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let builder = ConfigBuilder::new()
            .repo_url("https://github.com/o/r")
            .timeout_secs(0);
        assert!(matches!(
            validate_builder_options(&builder),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_valid_options_pass() -> Result<()> {
        let cli_stdout = Cli::parse_from(["repoflat", "https://github.com/o/r"]);
        validate_builder_options(&ConfigBuilder::from_cli(cli_stdout))?;

        let cli_file = Cli::parse_from(["repoflat", "https://github.com/o/r", "-o", "out.txt"]);
        validate_builder_options(&ConfigBuilder::from_cli(cli_file))?;

        Ok(())
    }
}
