//! Closed error set reported to feed loader callers.
//!
//! Transport causes never cross this boundary: timeouts, DNS and TLS failures
//! all surface as [`FeedLoadError::Connectivity`].

use thiserror::Error;

use super::FeedItem;

/// Why a feed load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FeedLoadError {
    /// The transport failed to deliver any response.
    #[error("feed request failed to reach the server")]
    Connectivity,
    /// A response arrived but its status was not 200 or its body did not
    /// decode as an items document.
    #[error("feed response did not contain valid feed data")]
    InvalidData,
}

/// Outcome of one load attempt.
pub type LoadFeedResult = Result<Vec<FeedItem>, FeedLoadError>;
