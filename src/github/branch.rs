//! Resolves which branch to read when none was given.

use super::request_headers;
use super::transport::Transport;
use super::url::repo_info_url;
use crate::constants::{ACCEPT_JSON, FALLBACK_BRANCH};
use serde::Deserialize;

/// Repository metadata, only for getting the default branch.
#[derive(Deserialize, Debug)]
struct RepoInfo {
    default_branch: String,
}

/// Fetches the default branch name for a repository.
///
/// This is best effort: a transport failure, a non-success status, or an
/// unexpected payload is logged and answered with `"main"`. Branch lookup never
/// aborts a run.
///
/// # Examples
/// ```
/// use repoflat::github::{resolve_default_branch, CannedTransport};
/// use serde_json::json;
///
/// let transport = CannedTransport::new()
///     .with_json("https://api.github.com/repos/octo/hello", &json!({"default_branch": "trunk"}));
/// assert_eq!(resolve_default_branch(&transport, "octo", "hello", None), "trunk");
///
/// // Unregistered URLs answer 404, which falls back to "main".
/// assert_eq!(resolve_default_branch(&transport, "octo", "other", None), "main");
/// ```
pub fn resolve_default_branch(
    transport: &dyn Transport,
    owner: &str,
    repo: &str,
    token: Option<&str>,
) -> String {
    let api_url = repo_info_url(owner, repo);
    log::debug!("Fetching repo metadata from: {}", api_url);

    let response = match transport.fetch(&api_url, &request_headers(ACCEPT_JSON, token)) {
        Ok(response) => response,
        Err(e) => {
            log::warn!(
                "Could not fetch metadata for {}/{} ({}); assuming branch '{}'.",
                owner,
                repo,
                e,
                FALLBACK_BRANCH
            );
            return FALLBACK_BRANCH.to_string();
        }
    };

    if !response.is_success() {
        log::warn!(
            "Metadata request for {}/{} returned {} {}; assuming branch '{}'.",
            owner,
            repo,
            response.status,
            response.status_text,
            FALLBACK_BRANCH
        );
        return FALLBACK_BRANCH.to_string();
    }

    match serde_json::from_slice::<RepoInfo>(&response.body) {
        Ok(info) if !info.default_branch.is_empty() => info.default_branch,
        Ok(_) => FALLBACK_BRANCH.to_string(),
        Err(e) => {
            log::warn!(
                "Unexpected metadata payload for {}/{} ({}); assuming branch '{}'.",
                owner,
                repo,
                e,
                FALLBACK_BRANCH
            );
            FALLBACK_BRANCH.to_string()
        }
    }
}
