//! Remote feed loading.
//!
//! The crate fetches a JSON feed over HTTP and decodes it into
//! [`FeedItem`](domain::FeedItem) values. Transport is consumed through the
//! [`HttpClient`](domain::ports::HttpClient) port so callers and the decoding
//! pipeline never see transport details; every failure is reported as one of
//! the two [`FeedLoadError`](domain::FeedLoadError) kinds.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use feed_loader::domain::RemoteFeedLoader;
//! use feed_loader::domain::ports::FeedLoader;
//! use feed_loader::outbound::http::ReqwestHttpClient;
//! use url::Url;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReqwestHttpClient::new(Duration::from_secs(30))?;
//! let url = Url::parse("https://example.com/feed")?;
//! let loader = RemoteFeedLoader::new(url, Arc::new(client));
//! let items = loader.load().await?;
//! println!("{} items", items.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
