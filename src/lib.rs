//! `repoflat` is a library and command-line tool for flattening a GitHub
//! repository into a single, line-numbered text artifact.
//!
//! It is designed for pasting whole codebases into Large Language Models or
//! review tools without cloning them first. Everything is read through the
//! GitHub REST API.
//!
//! As a library, it provides a four-stage pipeline:
//! 1.  **Walk**: Enumerate the repository tree with [`walk`], bounded by depth
//!     and ignore rules.
//! 2.  **Fetch**: Download the text files in parallel with [`fetch_contents`].
//! 3.  **Build**: Fold the flat entry map into a [`tree::FileNode`] hierarchy.
//! 4.  **Render**: Produce the listing and contents blocks with [`render`].
//!
//! [`flatten`] runs all four. Every network call goes through the
//! [`github::Transport`] trait, so the pipeline can run against canned
//! responses.
//!
//! # Example: Library Usage
//!
//! ```
//! use repoflat::github::{CannedTransport, HttpResponse};
//! use repoflat::{flatten, CancellationToken, ConfigBuilder};
//! use serde_json::json;
//!
//! // 1. Canned API responses for a one-file repository.
//! let raw = "https://raw.githubusercontent.com/octo/hello/main/README.md";
//! let transport = CannedTransport::new()
//!     .with_json(
//!         "https://api.github.com/repos/octo/hello/contents?ref=main",
//!         &json!([{
//!             "name": "README.md",
//!             "path": "README.md",
//!             "type": "file",
//!             "download_url": raw
//!         }]),
//!     )
//!     .with_response(raw, HttpResponse::new(200, "# Hello\n"));
//!
//! // 2. Configure the run. The URL names the branch, so no metadata lookup is needed.
//! let config = ConfigBuilder::new()
//!     .repo_url("https://github.com/octo/hello/tree/main")
//!     .build()
//!     .unwrap();
//!
//! // 3. Flatten.
//! let text = flatten(&config, &transport, &CancellationToken::new(), None).unwrap();
//!
//! assert!(text.starts_with("├── README.md\n\n"));
//! assert!(text.contains("/README.md:\n"));
//! assert!(text.contains("  1 | # Hello\n"));
//! ```

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod errors;
pub mod filtering;
pub mod github;
pub mod output;
pub mod prelude;
pub mod progress;
pub mod signal;
pub mod tree;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder, OutputDestination};
pub use core_types::{ContentMap, Entry, FileContent, FlatEntryMap, RepositoryRef};

use crate::errors::{Error, Result};
use crate::filtering::PatternFilter;
use crate::github::{
    parse_repo_url, resolve_default_branch, ContentFetcher, RepositoryWalker, ReqwestTransport,
    Transport, WalkTarget,
};
use crate::progress::ProgressReporter;
use rayon::prelude::*;
use std::sync::Arc;

/// The result of the walk stage: which repository and ref were read, and what
/// was found there.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// The repository, with `branch` set to the ref that was actually walked.
    pub repository: RepositoryRef,
    /// Every recorded file and directory, keyed by repository-relative path.
    pub entries: FlatEntryMap,
}

/// Parses the configured URL, settles on a branch and walks the repository.
///
/// The branch is, in order of precedence: `config.branch`, the branch named in
/// the URL, or the repository's default branch as reported by the API (falling
/// back to `main`). If the URL points into a subdirectory the walk starts there.
///
/// # Errors
/// *   [`Error::Input`] if the URL cannot be parsed. No request is made.
/// *   [`Error::Provider`] if any directory listing fails.
/// *   [`Error::Interrupted`] if `cancel` fires during the walk.
pub fn walk(
    config: &Config,
    transport: &dyn Transport,
    cancel: &CancellationToken,
) -> Result<WalkOutcome> {
    let parsed = parse_repo_url(&config.repo_url)?;
    let token = config.token.as_deref();

    let git_ref = match config.branch.clone().or_else(|| parsed.repo.branch.clone()) {
        Some(branch) => branch,
        None => resolve_default_branch(transport, &parsed.repo.owner, &parsed.repo.repo, token),
    };
    log::info!(
        "Reading {} at '{}'{}",
        parsed.repo.slug(),
        git_ref,
        if parsed.subdirectory.is_empty() {
            String::new()
        } else {
            format!(" from '{}'", parsed.subdirectory)
        }
    );

    let target = WalkTarget {
        owner: &parsed.repo.owner,
        repo: &parsed.repo.repo,
        git_ref: &git_ref,
    };
    let entries = RepositoryWalker::new(transport)
        .filter(config.filter.clone())
        .token(token)
        .max_depth(config.max_depth)
        .cancellation(cancel)
        .walk(target, &parsed.subdirectory)?;
    log::info!("Listed {} entries.", entries.len());

    let repository = parsed.repo.clone().with_branch(git_ref);
    Ok(WalkOutcome {
        repository,
        entries,
    })
}

/// Downloads the content of every non-binary file in `entries`.
///
/// Downloads run in parallel on the rayon pool. A failed download is stored as
/// [`FileContent::Failed`] and never aborts the others. Binary files are not
/// requested at all.
///
/// # Errors
/// Returns [`Error::Interrupted`] if `cancel` fires; partial results are dropped.
pub fn fetch_contents(
    entries: &FlatEntryMap,
    filter: &PatternFilter,
    fetcher: ContentFetcher<'_>,
    cancel: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<ContentMap> {
    let wanted: Vec<(&str, &str)> = entries
        .files()
        .filter(|(path, _)| !filter.is_binary(path))
        .collect();
    log::debug!("Fetching content for {} files.", wanted.len());

    if let Some(p) = &progress {
        p.set_length(wanted.len() as u64);
        p.set_message("Fetching file contents".to_string());
    }

    let fetched: Result<Vec<(String, FileContent)>> = wanted
        .par_iter()
        .map(|&(path, locator)| {
            cancel.check()?;
            let content = match fetcher.fetch_content(locator) {
                Ok(text) => FileContent::Text(text),
                Err(e) => {
                    log::warn!("Could not fetch '{}': {}", path, e);
                    FileContent::Failed {
                        message: e.to_string(),
                        url: locator.to_string(),
                        token_supplied: fetcher.has_token(),
                    }
                }
            };
            if let Some(p) = &progress {
                p.inc(1);
            }
            Ok((path.to_string(), content))
        })
        .collect();

    if let Some(p) = &progress {
        p.finish_with_message("Done".to_string());
    }

    let contents: ContentMap = fetched?.into_iter().collect();
    let failed = contents
        .values()
        .filter(|c| matches!(c, FileContent::Failed { .. }))
        .count();
    log::info!(
        "Fetched {} files ({} failed).",
        contents.len() - failed,
        failed
    );
    Ok(contents)
}

/// Renders the listing and, unless `contents` is `None`, the contents block.
pub fn render(entries: &FlatEntryMap, contents: Option<&ContentMap>, filter: &PatternFilter) -> String {
    let root = tree::build_tree(entries);
    let listing = output::render_listing(&root);
    match contents {
        Some(contents) => {
            let body = output::render_contents(entries, contents, filter);
            output::assemble(&listing, &body)
        }
        None => listing,
    }
}

/// Runs the whole pipeline against `transport` and returns the rendered text.
///
/// This does not treat an empty repository as an error; the result is then an
/// empty string. [`run`] is the variant that does.
///
/// # Errors
/// Propagates [`Error::Input`], [`Error::Provider`] and [`Error::Interrupted`]
/// from the stages. Per-file fetch failures are rendered inline instead.
pub fn flatten(
    config: &Config,
    transport: &dyn Transport,
    cancel: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<String> {
    let outcome = walk(config, transport, cancel)?;
    flatten_walked(config, transport, &outcome, cancel, progress)
}

fn flatten_walked(
    config: &Config,
    transport: &dyn Transport,
    outcome: &WalkOutcome,
    cancel: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<String> {
    let entries = &outcome.entries;
    if config.listing_only {
        return Ok(render(entries, None, &config.filter));
    }
    let fetcher = ContentFetcher::new(transport, config.token.as_deref())
        .git_ref(outcome.repository.branch.as_deref());
    let contents = fetch_contents(entries, &config.filter, fetcher, cancel, progress)?;
    Ok(render(entries, Some(&contents), &config.filter))
}

/// Executes the complete pipeline over HTTPS and writes the result to the
/// configured destination (stdout, file, or clipboard).
///
/// # Returns
/// `Ok(())` on success. Returns `Err(Error::NoEntriesFound)` if the walk
/// recorded nothing, in which case nothing is written.
pub fn run(
    config: &Config,
    cancel: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<()> {
    // Fail on a bad URL before building an HTTP client.
    parse_repo_url(&config.repo_url)?;

    let transport = ReqwestTransport::new(config.timeout).map_err(|e| Error::Provider {
        url: constants::GITHUB_API_BASE.to_string(),
        status: None,
        status_text: e.to_string(),
    })?;
    execute(config, &transport, cancel, progress)
}

/// Like [`run`], but over an arbitrary [`Transport`].
pub fn execute(
    config: &Config,
    transport: &dyn Transport,
    cancel: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<()> {
    let outcome = walk(config, transport, cancel)?;
    if outcome.entries.is_empty() {
        return Err(Error::NoEntriesFound);
    }
    let text = flatten_walked(config, transport, &outcome, cancel, progress)?;
    output::write_output(&text, &config.output_destination)
}
