// src/signal.rs

//! Ctrl+C handling for graceful shutdown.

use crate::cancellation::CancellationToken;
use anyhow::{Context, Result};

/// Registers a Ctrl+C (SIGINT) handler that cancels the returned token.
///
/// The walk and the content fetch poll the token, so an interrupted run stops
/// at the next request and returns [`crate::errors::Error::Interrupted`].
///
/// # Errors
/// Returns an error if the handler cannot be installed, e.g. because one is
/// already registered for this process.
pub fn setup_signal_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let handler_token = token.clone();

    ctrlc::set_handler(move || {
        log::info!("Ctrl+C signal received, stopping after the current request.");
        handler_token.cancel();
    })
    .context("Failed to set Ctrl+C signal handler")?;

    Ok(token)
}
