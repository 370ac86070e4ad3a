//! Driving port exposed to callers that want a feed.

use async_trait::async_trait;

use crate::domain::LoadFeedResult;

/// Anything that can produce the current feed.
#[async_trait]
pub trait FeedLoader: Send + Sync {
    /// Load the feed once.
    ///
    /// Dropping the returned future before it resolves abandons the load; no
    /// result is produced in that case.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use feed_loader::domain::ports::FeedLoader;
    ///
    /// let items = loader.load().await?;
    /// assert!(items.iter().all(|item| item.image_url().has_host()));
    /// # Ok::<(), feed_loader::domain::FeedLoadError>(())
    /// ```
    async fn load(&self) -> LoadFeedResult;
}
