//! Depth-bounded traversal of a repository through the Contents API.

use super::transport::{HttpResponse, Transport};
use super::url::contents_url;
use super::{api_message, request_headers};
use crate::cancellation::CancellationToken;
use crate::constants::{ACCEPT_JSON, DEFAULT_MAX_DEPTH};
use crate::core_types::{Entry, FlatEntryMap};
use crate::errors::{Error, Result};
use crate::filtering::PatternFilter;
use serde::Deserialize;
use serde_json::Value;

/// Represents a file or directory item from the GitHub Contents API.
#[derive(Deserialize, Debug)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    download_url: Option<String>,
    url: Option<String>,
}

impl ContentItem {
    /// The raw download URL, or the API URL when the item has none.
    fn locator(&self) -> Option<String> {
        self.download_url.clone().or_else(|| self.url.clone())
    }
}

/// A repository at a concrete ref, ready to be walked.
#[derive(Debug, Clone, Copy)]
pub struct WalkTarget<'a> {
    /// Repository owner.
    pub owner: &'a str,
    /// Repository name.
    pub repo: &'a str,
    /// The resolved branch, tag, or commit.
    pub git_ref: &'a str,
}

/// Enumerates a repository's tree into a [`FlatEntryMap`].
///
/// The walk is sequential and depth-first, driven by an explicit stack of
/// `(path, depth)` items so no accumulator is shared across frames.
///
/// *   Entries whose name matches the [`PatternFilter`] ignore list are neither
///     recorded nor descended into.
/// *   Directories at `depth == max_depth` are recorded but their children are
///     never listed. Anything deeper is dropped silently.
/// *   A failed listing aborts the walk with [`Error::Provider`].
///
/// # Examples
/// ```
/// use repoflat::github::{CannedTransport, RepositoryWalker, WalkTarget};
/// use repoflat::core_types::Entry;
/// use serde_json::json;
///
/// let transport = CannedTransport::new().with_json(
///     "https://api.github.com/repos/octo/hello/contents?ref=main",
///     &json!([
///         {"name": "README.md", "path": "README.md", "type": "file",
///          "download_url": "https://raw.githubusercontent.com/octo/hello/main/README.md"},
///         {"name": "node_modules", "path": "node_modules", "type": "dir", "download_url": null},
///     ]),
/// );
///
/// let target = WalkTarget { owner: "octo", repo: "hello", git_ref: "main" };
/// let flat = RepositoryWalker::new(&transport).walk(target, "").unwrap();
///
/// assert_eq!(flat.len(), 1);
/// assert!(matches!(flat.get("README.md"), Some(Entry::File(_))));
/// ```
pub struct RepositoryWalker<'a> {
    transport: &'a dyn Transport,
    filter: PatternFilter,
    token: Option<&'a str>,
    max_depth: usize,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> RepositoryWalker<'a> {
    /// Creates a walker with the default filter and depth bound.
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            transport,
            filter: PatternFilter::default(),
            token: None,
            max_depth: DEFAULT_MAX_DEPTH,
            cancel: None,
        }
    }

    /// Uses `filter` for ignore decisions.
    pub fn filter(mut self, filter: PatternFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sends `token` as a bearer token with every listing request.
    pub fn token(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    /// Sets the maximum recursion depth. `0` lists only the start directory.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks `cancel` before every listing request.
    pub fn cancellation(mut self, cancel: &'a CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Walks the tree rooted at `start_path` (empty for the repository root).
    ///
    /// Every ancestor of `start_path` is recorded as a directory, and so is
    /// `start_path` itself when it names a directory, so each recorded file's
    /// parent directories are keys of the map.
    #[tracing::instrument(skip_all, fields(owner = target.owner, repo = target.repo, git_ref = target.git_ref))]
    pub fn walk(&self, target: WalkTarget<'_>, start_path: &str) -> Result<FlatEntryMap> {
        let start = start_path.trim_matches('/');
        let mut flat = FlatEntryMap::new();
        for (i, _) in start.match_indices('/') {
            flat.insert(&start[..i], Entry::Directory);
        }
        let mut stack: Vec<(String, usize)> = vec![(start.to_string(), 0)];

        while let Some((path, depth)) = stack.pop() {
            if depth > self.max_depth {
                continue;
            }
            if let Some(cancel) = self.cancel {
                cancel.check()?;
            }

            let items = self.list(target, &path)?;
            let mut subdirectories = Vec::new();

            match items {
                Listing::Single(item) => {
                    // The start path named a file rather than a directory.
                    match item.locator() {
                        Some(locator) => {
                            flat.insert(item.path, Entry::File(locator));
                        }
                        None => log::warn!("Skipping file with no download URL: {}", item.path),
                    }
                }
                Listing::Directory(items) => {
                    if depth == 0 && !path.is_empty() {
                        flat.insert(path.clone(), Entry::Directory);
                    }
                    for item in items {
                        if self.filter.should_ignore(&item.name) {
                            log::debug!("Ignoring '{}'", item.path);
                            continue;
                        }
                        match item.item_type.as_str() {
                            "file" | "symlink" => match item.locator() {
                                Some(locator) => {
                                    flat.insert(item.path, Entry::File(locator));
                                }
                                None => {
                                    log::warn!("Skipping file with no download URL: {}", item.path)
                                }
                            },
                            "dir" => {
                                flat.insert(item.path.clone(), Entry::Directory);
                                if depth < self.max_depth {
                                    subdirectories.push(item.path);
                                } else {
                                    log::debug!(
                                        "Depth limit {} reached, not descending into '{}'",
                                        self.max_depth,
                                        item.path
                                    );
                                }
                            }
                            other => {
                                log::debug!("Skipping '{}' of type '{}'", item.path, other)
                            }
                        }
                    }
                }
            }

            // Reversed so the first subdirectory is popped, and walked, first.
            for dir in subdirectories.into_iter().rev() {
                stack.push((dir, depth + 1));
            }
        }

        log::debug!("Walk recorded {} entries", flat.len());
        Ok(flat)
    }

    fn list(&self, target: WalkTarget<'_>, path: &str) -> Result<Listing> {
        let api_url = contents_url(target.owner, target.repo, path, target.git_ref);
        log::debug!("Fetching directory contents from: {}", api_url);

        let response = self
            .transport
            .fetch(&api_url, &request_headers(ACCEPT_JSON, self.token))
            .map_err(|e| Error::Provider {
                url: api_url.clone(),
                status: None,
                status_text: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(provider_error(&api_url, &response, self.token.is_some()));
        }

        // The API returns a single object if the path is a file, or an array for a directory.
        let malformed = |e: serde_json::Error| Error::Provider {
            url: api_url.clone(),
            status: Some(response.status),
            status_text: format!("unexpected response payload: {}", e),
        };
        let json_value: Value = serde_json::from_slice(&response.body).map_err(malformed)?;
        if json_value.is_array() {
            Ok(Listing::Directory(
                serde_json::from_value(json_value).map_err(malformed)?,
            ))
        } else {
            Ok(Listing::Single(
                serde_json::from_value(json_value).map_err(malformed)?,
            ))
        }
    }
}

enum Listing {
    Single(ContentItem),
    Directory(Vec<ContentItem>),
}

/// Builds an [`Error::Provider`] from a non-success listing response.
fn provider_error(url: &str, response: &HttpResponse, token_supplied: bool) -> Error {
    let mut status_text = format!("{} {}", response.status, response.status_text);
    if let Some(message) = api_message(response) {
        status_text.push_str(&format!(" ({})", message));
    }
    let rate_limited = response.status == 403
        && response.header("x-ratelimit-remaining") == Some("0");
    if rate_limited && !token_supplied {
        status_text.push_str(
            ". Set a GITHUB_TOKEN environment variable or pass --token to raise the rate limit",
        );
    }
    Error::Provider {
        url: url.to_string(),
        status: Some(response.status),
        status_text,
    }
}
