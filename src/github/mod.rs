// src/github/mod.rs
//! Talks to the GitHub REST API.
//!
//! This module provides functionality to:
//! - Parse GitHub repository URLs and build API URLs.
//! - Resolve a repository's default branch.
//! - Walk a repository tree through the Contents API with depth and ignore bounds.
//! - Fetch individual file contents, falling back from the raw host to the API.
//!
//! All requests go through the [`Transport`] trait.

mod branch;
mod content;
mod transport;
mod url;
mod walker;

pub use branch::resolve_default_branch;
pub use content::ContentFetcher;
pub use transport::{
    CannedTransport, Header, HttpResponse, RecordedRequest, ReqwestTransport, Transport,
    TransportError,
};
pub use self::url::{contents_url, parse_repo_url, raw_to_api_url, repo_info_url, ParsedRepoUrl};
pub use walker::{RepositoryWalker, WalkTarget};

use serde::Deserialize;

/// Builds the `Accept` and optional `Authorization` headers for a request.
pub(crate) fn request_headers(accept: &str, token: Option<&str>) -> Vec<Header> {
    let mut headers = vec![("accept", accept.to_string())];
    if let Some(token) = token {
        headers.push(("authorization", format!("Bearer {}", token)));
    }
    headers
}

/// Extracts the `message` field GitHub puts in JSON error bodies.
pub(crate) fn api_message(response: &HttpResponse) -> Option<String> {
    #[derive(Deserialize)]
    struct ApiError {
        message: String,
    }
    serde_json::from_slice::<ApiError>(&response.body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_with_and_without_token() {
        assert_eq!(
            request_headers("application/json", None),
            vec![("accept", "application/json".to_string())]
        );
        assert_eq!(
            request_headers("application/json", Some("abc")),
            vec![
                ("accept", "application/json".to_string()),
                ("authorization", "Bearer abc".to_string())
            ]
        );
    }

    #[test]
    fn test_api_message() {
        let response = HttpResponse::new(404, r#"{"message":"Not Found","documentation_url":"x"}"#);
        assert_eq!(api_message(&response).as_deref(), Some("Not Found"));
        assert_eq!(api_message(&HttpResponse::new(500, "oops")), None);
    }
}
