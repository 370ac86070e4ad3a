//! Fetch-then-decode orchestration for one remote feed.
//!
//! The loader issues one `get` per load against its fixed URL, hands
//! delivered responses to [`feed_items_mapper::map`], and collapses every
//! transport error into [`FeedLoadError::Connectivity`]. There is no retry.
//!
//! Callback-style loads ([`RemoteFeedLoader::load_with`]) are bound to the
//! loader's lifetime: once the loader is dropped, outcomes that arrive later
//! are discarded and the completion is never run. The request itself is left
//! to finish; only its result is dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::domain::ports::{FeedLoader, HttpClient, TransportOutcome};
use crate::domain::{FeedLoadError, LoadFeedResult, feed_items_mapper};

/// Loads the feed at one URL through an [`HttpClient`].
pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
    lifetime: CancellationToken,
}

/// How a callback-style load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDelivery {
    /// The completion ran with a result.
    Delivered,
    /// The loader was dropped first; the completion was dropped unrun.
    Discarded,
}

/// Handle to a load started with [`RemoteFeedLoader::load_with`].
///
/// Dropping the handle does not cancel the load.
#[derive(Debug)]
pub struct PendingLoad {
    task: JoinHandle<LoadDelivery>,
}

impl PendingLoad {
    /// Wait for the load to finish and report whether the completion ran.
    ///
    /// # Panics
    ///
    /// Resumes the panic if the completion itself panicked.
    pub async fn join(self) -> LoadDelivery {
        match self.task.await {
            Ok(delivery) => delivery,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => LoadDelivery::Discarded,
        }
    }
}

impl RemoteFeedLoader {
    /// Build a loader for `url` using `client` for every request.
    ///
    /// Construction issues no request.
    /// ```rust,ignore
    /// let loader = RemoteFeedLoader::new(url, Arc::new(client));
    /// ```
    #[must_use]
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url,
            client,
            lifetime: CancellationToken::new(),
        }
    }

    /// The URL every load requests.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Start a load and deliver its result to `completion`.
    ///
    /// The request runs on the ambient Tokio runtime. `completion` runs at
    /// most once, and not at all if this loader is dropped before the
    /// transport resolves. Dropping the loader does not abort the request.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    ///
    /// ```rust,ignore
    /// let pending = loader.load_with(|result| match result {
    ///     Ok(items) => tracing::info!(count = items.len(), "feed loaded"),
    ///     Err(error) => tracing::warn!(error = %error, "feed load failed"),
    /// });
    /// pending.join().await;
    /// ```
    pub fn load_with<F>(&self, completion: F) -> PendingLoad
    where
        F: FnOnce(LoadFeedResult) + Send + 'static,
    {
        let url = self.url.clone();
        let client = Arc::clone(&self.client);
        let lifetime = self.lifetime.clone();

        let task = tokio::spawn(async move {
            let outcome = client.get(&url).await;
            if lifetime.is_cancelled() {
                debug!(url = %url, "feed loader dropped before the response; discarding");
                return LoadDelivery::Discarded;
            }
            completion(resolve(&url, outcome));
            LoadDelivery::Delivered
        });

        PendingLoad { task }
    }
}

#[async_trait]
impl FeedLoader for RemoteFeedLoader {
    async fn load(&self) -> LoadFeedResult {
        let outcome = self.client.get(&self.url).await;
        resolve(&self.url, outcome)
    }
}

impl Drop for RemoteFeedLoader {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

fn resolve(url: &Url, outcome: TransportOutcome) -> LoadFeedResult {
    match outcome {
        Ok(response) => feed_items_mapper::map(&response.body, response.status),
        Err(error) => {
            debug!(url = %url, error = %error, "feed transport failed");
            Err(FeedLoadError::Connectivity)
        }
    }
}
