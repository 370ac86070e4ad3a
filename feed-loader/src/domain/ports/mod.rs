//! Domain ports defining the edges of the feed pipeline.
//!
//! Ports describe what the loader needs from driven adapters (the HTTP
//! transport) and what it offers to callers. Adapter failures are mapped into
//! typed port errors rather than leaking transport crates into the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod feed_loader;
mod http_client;

pub use feed_loader::FeedLoader;
#[cfg(test)]
pub(crate) use http_client::MockHttpClient;
pub use http_client::{HttpClient, HttpClientError, HttpResponse, TransportOutcome};
