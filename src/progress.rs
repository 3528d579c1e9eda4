// src/progress.rs

//! Progress reporting for the content download phase.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Receives updates while file contents are downloaded.
///
/// Downloads run on the rayon pool, so every worker calls [`ProgressReporter::inc`]
/// on the same shared reporter.
///
/// # Examples
///
/// ```
/// use repoflat::progress::ProgressReporter;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// #[derive(Default)]
/// struct Counter {
///     total: AtomicU64,
///     done: AtomicU64,
/// }
///
/// impl ProgressReporter for Counter {
///     fn set_length(&self, len: u64) {
///         self.total.store(len, Ordering::SeqCst);
///     }
///     fn inc(&self, delta: u64) {
///         self.done.fetch_add(delta, Ordering::SeqCst);
///     }
///     fn set_message(&self, _msg: String) {}
///     fn finish_with_message(&self, _msg: String) {}
/// }
///
/// let counter = Counter::default();
/// counter.set_length(2);
/// counter.inc(1);
/// counter.inc(1);
/// assert_eq!(counter.done.load(Ordering::SeqCst), 2);
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Sets the number of files that will be downloaded.
    fn set_length(&self, len: u64);
    /// Records `delta` finished downloads.
    fn inc(&self, delta: u64);
    /// Sets the label shown next to the bar.
    fn set_message(&self, msg: String);
    /// Ends reporting with a final label.
    fn finish_with_message(&self, msg: String);
}

/// Discards every update.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn set_length(&self, _len: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish_with_message(&self, _msg: String) {}
}

/// A terminal progress bar drawn on stderr by `indicatif`.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates an empty bar; the length is set once the walk is done.
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_progress_accepts_all_calls() {
        let reporter: &dyn ProgressReporter = &NoOpProgress;
        reporter.set_length(3);
        reporter.inc(1);
        reporter.set_message("Fetching".to_string());
        reporter.finish_with_message("Done".to_string());
    }
}
