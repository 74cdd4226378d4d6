// crates/replication-locator-http/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: reqwest-backed implementation of the core transport interface.
// Purpose: Fetch descriptor text and probe URLs over HTTP(S).
// Dependencies: replication-locator-core, reqwest, url
// ============================================================================

//! ## Overview
//! One blocking client is built per transport and reused for every request.
//! `GET` requests use the client-wide timeout; `HEAD` probes override it per
//! request. Redirects are followed up to the configured limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use replication_locator_core::Transport;
use replication_locator_core::TransportError;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default per-fetch timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
/// Default body size cap in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024;
/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = "replication-locator/0.1";

/// HTTP transport settings.
///
/// # Invariants
/// - `timeout_ms` applies to the full lifecycle of each `GET` request.
/// - `max_response_bytes` bounds every descriptor body read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Per-fetch timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirects: usize,
    /// Maximum response body size, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Transport settings.
    config: HttpTransportConfig,
    /// Shared HTTP client.
    client: Client,
}

impl HttpTransport {
    /// Builds a transport with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] when the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(|err| TransportError::Http(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the transport settings.
    #[must_use]
    pub const fn config(&self) -> &HttpTransportConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let url = parse_http_url(url)?;
        let response = self.client.get(url.as_str()).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let bytes = read_response_limited(response, self.config.max_response_bytes)?;
        String::from_utf8(bytes).map_err(|err| TransportError::Decode(err.to_string()))
    }

    fn head(&self, url: &str, timeout: Duration) -> Result<(), TransportError> {
        let url = parse_http_url(url)?;
        let response =
            self.client.head(url.as_str()).timeout(timeout).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses `raw` and rejects schemes other than `http` and `https`.
fn parse_http_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw).map_err(|err| TransportError::InvalidUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(TransportError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Classifies a request failure.
fn request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Http(format!("request timed out: {err}"))
    } else if err.is_redirect() {
        TransportError::Http(format!("redirect limit exceeded: {err}"))
    } else {
        TransportError::Http(err.to_string())
    }
}

/// Reads the response body, failing once it exceeds `max_bytes`.
fn read_response_limited(response: Response, max_bytes: usize) -> Result<Vec<u8>, TransportError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| TransportError::Http("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(TransportError::TooLarge {
            max_bytes,
            actual_bytes: usize::try_from(expected).unwrap_or(usize::MAX),
        });
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf).map_err(|err| TransportError::Http(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(TransportError::TooLarge {
            max_bytes,
            actual_bytes: buf.len(),
        });
    }
    if let Some(expected) = expected_len
        && u64::try_from(buf.len()).is_ok_and(|read| read < expected)
    {
        return Err(TransportError::Http("http response truncated".to_string()));
    }
    Ok(buf)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
