//! Feed domain: items, the closed load error set, and the remote loader.
//!
//! Purpose: keep the feed pipeline independent of any transport. The loader
//! talks to the network only through [`ports::HttpClient`], and the mapper
//! turns a delivered response into items or a typed failure.
//!
//! Public surface:
//! - FeedItem — one decoded feed entry.
//! - FeedLoadError / LoadFeedResult — the outcome handed to callers.
//! - RemoteFeedLoader — fetch-then-decode orchestration.
//! - feed_items_mapper — status check and JSON decode.

pub mod error;
pub mod feed_item;
pub mod feed_items_mapper;
pub mod ports;
pub mod remote_feed_loader;

pub use self::error::{FeedLoadError, LoadFeedResult};
pub use self::feed_item::FeedItem;
pub use self::remote_feed_loader::{LoadDelivery, PendingLoad, RemoteFeedLoader};
