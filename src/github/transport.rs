//! The HTTP seam used by every outbound request.
//!
//! The engine never talks to `reqwest` directly; it goes through [`Transport`],
//! so listing, metadata, and content requests can be served from memory in
//! tests with [`CannedTransport`].

use crate::constants::USER_AGENT;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// A request header as a `(name, value)` pair.
pub type Header = (&'static str, String);

/// A response as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The canonical reason phrase for `status`, e.g. `Not Found`.
    pub status_text: String,
    /// Response headers with lowercase names.
    pub headers: Vec<(String, String)>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Builds a response with the canonical reason phrase for `status`.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header. The name is stored lowercase.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A request that never produced a response (DNS, TLS, timeout, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Performs a single GET request.
///
/// Implementations must not retry or follow provider-specific fallbacks; those
/// live in the callers.
pub trait Transport: Send + Sync {
    /// Fetches `url` with the given request headers.
    fn fetch(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError> {
        (**self).fetch(url, headers)
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with the crate's `User-Agent` and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn fetch(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            let (name, value) = header_pair(name, value)?;
            request = request.header(name, value);
        }

        let response = request.send().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .bytes()
            .map_err(|e| TransportError(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers: response_headers,
            body: body.to_vec(),
        })
    }
}

/// A recorded request, as seen by [`CannedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// The requested URL.
    pub url: String,
    /// The request headers, names as given.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Looks up a request header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory [`Transport`] serving pre-registered responses by exact URL.
///
/// Unregistered URLs answer `404 Not Found`. Every request is recorded so
/// callers can assert on what was sent.
///
/// # Examples
///
/// ```
/// use repoflat::github::{CannedTransport, HttpResponse, Transport};
///
/// let transport = CannedTransport::new()
///     .with_response("https://example.test/a", HttpResponse::new(200, "hello"));
///
/// let ok = transport.fetch("https://example.test/a", &[]).unwrap();
/// assert_eq!(ok.text(), "hello");
///
/// let missing = transport.fetch("https://example.test/b", &[]).unwrap();
/// assert_eq!(missing.status, 404);
/// assert_eq!(transport.requests().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: HashMap<String, Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl CannedTransport {
    /// Creates a transport with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the response served for `url`.
    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.responses.insert(url.into(), Ok(response));
        self
    }

    /// Registers a `200 OK` JSON response for `url`.
    pub fn with_json(self, url: impl Into<String>, json: &serde_json::Value) -> Self {
        let body = json.to_string();
        self.with_response(
            url,
            HttpResponse::new(200, body).with_header("content-type", "application/json"),
        )
    }

    /// Registers a transport failure (no response at all) for `url`.
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Err(TransportError(message.into())));
        self
    }

    /// All requests made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for CannedTransport {
    fn fetch(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });
        }
        match self.responses.get(url) {
            Some(response) => response.clone(),
            None => Ok(HttpResponse::new(404, r#"{"message":"Not Found"}"#)),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TransportError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError(format!("Invalid header name '{}': {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| TransportError(format!("Invalid header value for '{}': {}", name, e)))?;
    Ok((header_name, header_value))
}
