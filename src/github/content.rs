//! Retrieves the text of a single file.

use super::request_headers;
use super::transport::{HttpResponse, Transport};
use super::url::raw_to_api_url;
use crate::constants::{ACCEPT_RAW, ERROR_BODY_SNIPPET_LEN};
use crate::errors::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

/// A Contents API file payload.
#[derive(Deserialize, Debug)]
struct EncodedContent {
    content: String,
    encoding: Option<String>,
}

/// Fetches file contents by locator, with an optional bearer token.
///
/// Every call hits the transport; nothing is cached.
///
/// # Examples
/// ```
/// use repoflat::github::{CannedTransport, ContentFetcher, HttpResponse};
///
/// let transport = CannedTransport::new().with_response(
///     "https://raw.githubusercontent.com/octo/hello/main/a.txt",
///     HttpResponse::new(200, "hello\n"),
/// );
/// let fetcher = ContentFetcher::new(&transport, None);
/// let text = fetcher
///     .fetch_content("https://raw.githubusercontent.com/octo/hello/main/a.txt")
///     .unwrap();
/// assert_eq!(text, "hello\n");
/// ```
#[derive(Clone, Copy)]
pub struct ContentFetcher<'a> {
    transport: &'a dyn Transport,
    token: Option<&'a str>,
    git_ref: Option<&'a str>,
}

impl<'a> ContentFetcher<'a> {
    /// Creates a fetcher. `token`, if any, is sent as a bearer token.
    pub fn new(transport: &'a dyn Transport, token: Option<&'a str>) -> Self {
        Self {
            transport,
            token,
            git_ref: None,
        }
    }

    /// Sets the ref the locators were listed at, used to rewrite raw-host
    /// URLs whose ref contains `/`.
    pub fn git_ref(mut self, git_ref: Option<&'a str>) -> Self {
        self.git_ref = git_ref;
        self
    }

    /// `true` if requests carry an `Authorization` header.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetches the text behind `locator`.
    ///
    /// If `locator` is a raw-host URL and the direct request fails, it is
    /// rewritten to the equivalent Contents API URL and retried once. The
    /// retry's outcome is final.
    ///
    /// # Errors
    /// Returns [`Error::Fetch`] with the status, reason and a body snippet.
    pub fn fetch_content(&self, locator: &str) -> Result<String> {
        match self.fetch_once(locator) {
            Ok(text) => Ok(text),
            Err(direct_err) => match raw_to_api_url(locator, self.git_ref) {
                Some(api_url) => {
                    log::debug!(
                        "Direct download of '{}' failed ({}), retrying via {}",
                        locator,
                        direct_err,
                        api_url
                    );
                    self.fetch_once(&api_url)
                }
                None => Err(direct_err),
            },
        }
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        log::debug!("Downloading file from: {}", url);
        let response = self
            .transport
            .fetch(url, &request_headers(ACCEPT_RAW, self.token))
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                status: None,
                status_text: e.to_string(),
                body_snippet: String::new(),
            })?;

        if !response.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: Some(response.status),
                status_text: response.status_text.clone(),
                body_snippet: body_snippet(&response),
            });
        }

        Ok(decode_body(&response))
    }
}

/// Returns the file text carried by a successful response.
///
/// Contents API metadata payloads (`{"content": "...", "encoding": "base64"}`)
/// are decoded; any other body is returned as text.
fn decode_body(response: &HttpResponse) -> String {
    if let Ok(payload) = serde_json::from_slice::<EncodedContent>(&response.body) {
        if payload.encoding.as_deref() == Some("base64") {
            let compact: String = payload
                .content
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            match STANDARD.decode(compact.as_bytes()) {
                Ok(bytes) => return String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => log::warn!("Could not decode base64 content, using raw body: {}", e),
            }
        }
    }
    response.text()
}

fn body_snippet(response: &HttpResponse) -> String {
    let text = response.text();
    let trimmed = text.trim();
    if trimmed.chars().count() <= ERROR_BODY_SNIPPET_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(ERROR_BODY_SNIPPET_LEN).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::transport::CannedTransport;
    use serde_json::json;

    const RAW_URL: &str = "https://raw.githubusercontent.com/octo/hello/main/src/lib.rs";
    const API_URL: &str = "https://api.github.com/repos/octo/hello/contents/src/lib.rs?ref=main";

    #[test]
    fn test_fetch_raw_text() {
        let transport =
            CannedTransport::new().with_response(RAW_URL, HttpResponse::new(200, "fn a() {}\n"));
        let text = ContentFetcher::new(&transport, None)
            .fetch_content(RAW_URL)
            .unwrap();
        assert_eq!(text, "fn a() {}\n");
        assert_eq!(transport.requested_urls(), vec![RAW_URL.to_string()]);
    }

    #[test]
    fn test_fetch_sends_raw_accept_and_token() {
        let transport =
            CannedTransport::new().with_response(RAW_URL, HttpResponse::new(200, "x"));
        ContentFetcher::new(&transport, Some("tok"))
            .fetch_content(RAW_URL)
            .unwrap();
        let request = &transport.requests()[0];
        assert_eq!(request.header("accept"), Some(ACCEPT_RAW));
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_fetch_decodes_base64_payload_with_newlines() {
        // "line1\nline2" split across lines the way the API wraps base64.
        let transport = CannedTransport::new().with_json(
            API_URL,
            &json!({"name": "lib.rs", "encoding": "base64", "content": "bGlu\nZTEK\nbGluZTI=\n"}),
        );
        let text = ContentFetcher::new(&transport, None)
            .fetch_content(API_URL)
            .unwrap();
        assert_eq!(text, "line1\nline2");
    }

    #[test]
    fn test_json_file_without_base64_encoding_is_returned_verbatim() {
        let body = r#"{"content": "not base64", "version": 1}"#;
        let transport = CannedTransport::new().with_response(RAW_URL, HttpResponse::new(200, body));
        let text = ContentFetcher::new(&transport, None)
            .fetch_content(RAW_URL)
            .unwrap();
        assert_eq!(text, body);
    }

    #[test]
    fn test_raw_failure_falls_back_to_api() {
        let transport = CannedTransport::new()
            .with_response(RAW_URL, HttpResponse::new(404, "404: Not Found"))
            .with_json(
                API_URL,
                &json!({"encoding": "base64", "content": "aGVsbG8="}),
            );
        let text = ContentFetcher::new(&transport, Some("tok"))
            .fetch_content(RAW_URL)
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(
            transport.requested_urls(),
            vec![RAW_URL.to_string(), API_URL.to_string()]
        );
        assert_eq!(
            transport.requests()[1].header("authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn test_fallback_keeps_slash_ref_intact() {
        let raw = "https://raw.githubusercontent.com/octo/hello/feature/x/src/lib.rs";
        let api = "https://api.github.com/repos/octo/hello/contents/src/lib.rs?ref=feature%2Fx";
        let transport = CannedTransport::new()
            .with_response(raw, HttpResponse::new(404, "404: Not Found"))
            .with_response(api, HttpResponse::new(200, "from feature/x"));
        let text = ContentFetcher::new(&transport, None)
            .git_ref(Some("feature/x"))
            .fetch_content(raw)
            .unwrap();
        assert_eq!(text, "from feature/x");
        assert_eq!(
            transport.requested_urls(),
            vec![raw.to_string(), api.to_string()]
        );
    }

    #[test]
    fn test_raw_transport_failure_falls_back_to_api() {
        let transport = CannedTransport::new()
            .with_failure(RAW_URL, "dns error")
            .with_response(API_URL, HttpResponse::new(200, "raw body"));
        let text = ContentFetcher::new(&transport, None)
            .fetch_content(RAW_URL)
            .unwrap();
        assert_eq!(text, "raw body");
    }

    #[test]
    fn test_both_attempts_failing_reports_api_error() {
        let transport = CannedTransport::new()
            .with_response(RAW_URL, HttpResponse::new(404, "404: Not Found"))
            .with_response(
                API_URL,
                HttpResponse::new(403, r#"{"message":"Resource not accessible"}"#),
            );
        let err = ContentFetcher::new(&transport, None)
            .fetch_content(RAW_URL)
            .unwrap_err();
        match err {
            Error::Fetch {
                url,
                status,
                status_text,
                body_snippet,
            } => {
                assert_eq!(url, API_URL);
                assert_eq!(status, Some(403));
                assert_eq!(status_text, "Forbidden");
                assert!(body_snippet.contains("Resource not accessible"));
            }
            other => panic!("Expected Fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_raw_locator_has_no_fallback() {
        let other = "https://example.test/file.txt";
        let transport = CannedTransport::new();
        let err = ContentFetcher::new(&transport, None)
            .fetch_content(other)
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { status: Some(404), .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_no_caching_between_calls() {
        let transport = CannedTransport::new().with_response(RAW_URL, HttpResponse::new(200, "x"));
        let fetcher = ContentFetcher::new(&transport, None);
        fetcher.fetch_content(RAW_URL).unwrap();
        fetcher.fetch_content(RAW_URL).unwrap();
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_body_snippet_is_truncated() {
        let response = HttpResponse::new(500, "e".repeat(ERROR_BODY_SNIPPET_LEN + 50));
        let snippet = body_snippet(&response);
        assert_eq!(snippet.len(), ERROR_BODY_SNIPPET_LEN + 3);
        assert!(snippet.ends_with("..."));
    }
}
