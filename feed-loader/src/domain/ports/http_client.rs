//! Driven port for fetching bytes over HTTP.
//!
//! The domain owns the response shape so the loader stays independent of the
//! concrete transport. Implementations resolve every call exactly once, with
//! either a delivered response or an error.

use std::collections::BTreeMap;

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// A response delivered by the transport, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final URL of the response after any redirects.
    pub url: Url,
    /// HTTP status code (100–599).
    pub status: u16,
    /// Response headers with lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// Full response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response with no headers.
    ///
    /// # Examples
    /// ```
    /// use feed_loader::domain::ports::HttpResponse;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://a-url.com").expect("valid url");
    /// let response = HttpResponse::new(url, 200, b"{}".to_vec());
    /// assert!(response.headers.is_empty());
    /// ```
    #[must_use]
    pub const fn new(url: Url, status: u16, body: Vec<u8>) -> Self {
        Self {
            url,
            status,
            headers: BTreeMap::new(),
            body,
        }
    }
}

define_port_error! {
    /// Errors surfaced by an HTTP transport before a response was delivered.
    pub enum HttpClientError {
        /// Network transport failed before receiving a response.
        Transport {
            /// Transport-level cause.
            message: String,
        } =>
            "http transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout {
            /// Which deadline was exceeded.
            message: String,
        } =>
            "http request timed out: {message}",
        /// The transport produced something that is not a usable response.
        UnexpectedResponse {
            /// What was wrong with the response.
            message: String,
        } =>
            "http response unusable: {message}",
    }
}

/// What one `get` call resolves to.
pub type TransportOutcome = Result<HttpResponse, HttpClientError>;

/// Port for issuing HTTP GET requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch `url` and resolve with the transport outcome.
    ///
    /// Non-2xx statuses are delivered as responses, not errors; judging the
    /// status is the caller's job.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use feed_loader::domain::ports::HttpClient;
    ///
    /// let response = client.get(&url).await?;
    /// assert!((100..=599).contains(&response.status));
    /// # Ok::<(), feed_loader::domain::ports::HttpClientError>(())
    /// ```
    async fn get(&self, url: &Url) -> TransportOutcome;
}
