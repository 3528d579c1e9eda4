// src/output/writer.rs

//! Manages the output destination (stdout, file, or clipboard).

use crate::config::OutputDestination;
#[cfg(feature = "clipboard")]
use crate::errors::ClipboardError;
use crate::errors::{io_error_with_path, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Writes the rendered text to `destination`.
///
/// Files are created (or truncated) and written through a `BufWriter`. The
/// clipboard destination takes the whole string at once.
///
/// # Errors
/// Returns [`crate::errors::Error::Io`] if the file cannot be created or written,
/// and a clipboard error if the system clipboard is unavailable.
pub fn write_output(output: &str, destination: &OutputDestination) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes())?;
            handle.flush()?;
        }
        OutputDestination::File(path) => {
            let file = File::create(path).map_err(|e| io_error_with_path(e, path))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(output.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| io_error_with_path(e, path))?;
            log::info!("Output written to {}", path.display());
        }
        #[cfg(feature = "clipboard")]
        OutputDestination::Clipboard => {
            copy_to_clipboard(output)?;
            log::info!("Output copied to clipboard.");
        }
    }
    Ok(())
}

#[cfg(feature = "clipboard")]
fn copy_to_clipboard(content: &str) -> std::result::Result<(), ClipboardError> {
    use arboard::Clipboard;
    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::Initialization(e.to_string()))?;
    clipboard
        .set_text(content)
        .map_err(|e| ClipboardError::SetContent(e.to_string()))?;
    Ok(())
}
