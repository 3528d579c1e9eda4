// src/main.rs

use anyhow::Result;
use clap::Parser;
use repoflat::cli::Cli;
use repoflat::config::ConfigBuilder;
use repoflat::errors::Error;
#[cfg(feature = "progress")]
use repoflat::progress::IndicatifProgress;
use repoflat::progress::ProgressReporter;
use repoflat::run;
use repoflat::signal::setup_signal_handler;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "repoflat=debug".parse()?
                } else {
                    "repoflat=info".parse()?
                },
            ),
        )
        .init();

    log::info!("Starting repoflat v{}...", env!("CARGO_PKG_VERSION"));

    // --- Setup ---
    let cli = Cli::parse();

    // Show a progress bar only if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = ConfigBuilder::from_cli(cli).build()?;
    log::debug!("Configuration: {:?}", config);

    let token = setup_signal_handler()?;

    let result = run(&config, &token, progress_reporter);

    // --- Error Handling ---
    if let Err(e) = result {
        match e {
            Error::Interrupted => {
                eprintln!("\nOperation cancelled.");
                std::process::exit(130);
            }
            Error::NoEntriesFound => {
                eprintln!("repoflat: No files or directories found in the repository.");
                return Ok(());
            }
            _ => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
