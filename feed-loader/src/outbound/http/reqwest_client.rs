//! Reqwest-backed HTTP client adapter.
//!
//! This adapter owns transport details only: request headers, timeout and
//! transport error mapping. Status codes are delivered untouched; judging
//! them belongs to the feed mapper.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap};
use tracing::debug;
use url::Url;

use crate::domain::ports::{HttpClient, HttpClientError, HttpResponse, TransportOutcome};

const DEFAULT_USER_AGENT: &str = concat!("feed-loader/", env!("CARGO_PKG_VERSION"));

/// Outbound identity sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientIdentity {
    /// HTTP user-agent header value.
    pub user_agent: String,
}

impl Default for HttpClientIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// [`HttpClient`] adapter performing GET requests with reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Build an adapter with an explicit request timeout.
    /// ```rust,ignore
    /// let client = ReqwestHttpClient::new(Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(timeout, HttpClientIdentity::default())
    }

    /// Build an adapter with an explicit timeout and outbound identity.
    /// ```rust,ignore
    /// let client = ReqwestHttpClient::with_identity(timeout, identity)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        timeout: Duration,
        identity: HttpClientIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(identity.user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> TransportOutcome {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(map_body_error)?;
        debug!(url = %final_url, status, bytes = body.len(), "http response received");

        Ok(HttpResponse {
            url: final_url,
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> HttpClientError {
    if error.is_timeout() {
        HttpClientError::timeout(error.to_string())
    } else {
        HttpClientError::transport(error.to_string())
    }
}

fn map_body_error(error: reqwest::Error) -> HttpClientError {
    if error.is_timeout() {
        HttpClientError::timeout(error.to_string())
    } else {
        HttpClientError::unexpected_response(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};

    #[test]
    fn default_identity_names_the_crate() {
        let identity = HttpClientIdentity::default();
        assert!(identity.user_agent.starts_with("feed-loader/"));
    }

    #[test]
    fn collects_headers_with_lowercase_names() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_bytes(b"X-Request-Id").expect("valid header name"),
            HeaderValue::from_static("abc-123"),
        );

        let collected = collect_headers(&headers);

        assert_eq!(
            collected.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(collected.get("x-request-id").map(String::as_str), Some("abc-123"));
    }

    #[test]
    fn skips_headers_that_are_not_visible_ascii() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-binary",
            HeaderValue::from_bytes(b"caf\xe9").expect("opaque header value"),
        );

        assert!(collect_headers(&headers).is_empty());
    }

    #[test]
    fn builds_with_custom_identity() {
        let identity = HttpClientIdentity {
            user_agent: "feed-tests/1.0".to_owned(),
        };

        assert!(ReqwestHttpClient::with_identity(Duration::from_secs(1), identity).is_ok());
    }
}
