//! Test doubles and fixtures for feed loader tests.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration tests under `tests/`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::sync::{Notify, oneshot};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::domain::FeedItem;
use crate::domain::ports::{HttpClient, HttpClientError, HttpResponse, TransportOutcome};

struct SpyMessage {
    url: Url,
    responder: Option<oneshot::Sender<TransportOutcome>>,
}

/// [`HttpClient`] double that records requests and holds each one open until
/// the test completes it by index.
#[derive(Default)]
pub struct HttpClientSpy {
    messages: Mutex<Vec<SpyMessage>>,
    requested: Notify,
}

impl HttpClientSpy {
    /// URLs requested so far, in call order.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<Url> {
        self.lock_messages()
            .iter()
            .map(|message| message.url.clone())
            .collect()
    }

    /// Wait until at least `count` requests have been issued.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.requested.notified();
            if self.lock_messages().len() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Resolve request `index` with a transport error.
    ///
    /// # Panics
    ///
    /// Panics if request `index` was already completed.
    pub async fn complete_with_error(&self, error: HttpClientError, index: usize) {
        self.respond(Err(error), index).await;
    }

    /// Resolve request `index` with a delivered response.
    ///
    /// # Panics
    ///
    /// Panics if request `index` was already completed.
    pub async fn complete_with_status(&self, status: u16, body: impl Into<Vec<u8>>, index: usize) {
        let body = body.into();
        self.wait_for_requests(index + 1).await;
        let url = match self.requested_urls().into_iter().nth(index) {
            Some(url) => url,
            None => panic!("no request recorded at index {index}"),
        };
        self.respond(Ok(HttpResponse::new(url, status, body)), index)
            .await;
    }

    async fn respond(&self, outcome: TransportOutcome, index: usize) {
        self.wait_for_requests(index + 1).await;
        let responder = match self.lock_messages().get_mut(index) {
            Some(message) => message.responder.take(),
            None => panic!("no request recorded at index {index}"),
        };
        let Some(responder) = responder else {
            panic!("request {index} was already completed");
        };
        if responder.send(outcome).is_err() {
            debug!(index, "request was abandoned before completion");
        }
    }

    fn lock_messages(&self) -> MutexGuard<'_, Vec<SpyMessage>> {
        match self.messages.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("spy messages mutex"),
        }
    }
}

#[async_trait]
impl HttpClient for HttpClientSpy {
    async fn get(&self, url: &Url) -> TransportOutcome {
        let (responder, response) = oneshot::channel();
        self.lock_messages().push(SpyMessage {
            url: url.clone(),
            responder: Some(responder),
        });
        self.requested.notify_waiters();

        match response.await {
            Ok(outcome) => outcome,
            Err(_) => Err(HttpClientError::transport("spy dropped the request")),
        }
    }
}

/// Build an item and its wire representation, omitting absent fields.
///
/// # Panics
///
/// Panics if `image` is not an absolute URL.
#[must_use]
pub fn make_item(
    id: Uuid,
    description: Option<&str>,
    location: Option<&str>,
    image: &str,
) -> (FeedItem, Value) {
    let image_url = match Url::parse(image) {
        Ok(url) => url,
        Err(error) => panic!("fixture image url {image}: {error}"),
    };

    let mut record = Map::new();
    record.insert("id".to_owned(), json!(id.to_string()));
    if let Some(description) = description {
        record.insert("description".to_owned(), json!(description));
    }
    if let Some(location) = location {
        record.insert("location".to_owned(), json!(location));
    }
    record.insert("image".to_owned(), json!(image_url.as_str()));

    let item = FeedItem::new(
        id,
        description.map(str::to_owned),
        location.map(str::to_owned),
        image_url,
    );
    (item, Value::Object(record))
}

/// Wrap records in an `{"items": [...]}` document.
#[must_use]
pub fn make_items_json(items: &[Value]) -> Vec<u8> {
    match serde_json::to_vec(&json!({ "items": items })) {
        Ok(bytes) => bytes,
        Err(error) => panic!("fixture json: {error}"),
    }
}
