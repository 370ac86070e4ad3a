//! Feed item value type.

use serde::Serialize;
use url::Url;
use uuid::Uuid;

/// One entry of a decoded feed.
///
/// ## Invariants
/// - `image_url` is an absolute URL.
/// - Optional text fields are `None` when the source omitted them; they are
///   never stored as empty strings on the source's behalf.
///
/// Serialises with the same field names the remote feed uses; `feed-fetch`
/// wraps its items in an `{"items": [...]}` document the mapper accepts.
///
/// # Examples
/// ```
/// use feed_loader::domain::FeedItem;
/// use url::Url;
/// use uuid::Uuid;
///
/// let image = Url::parse("https://a-url.com/image.png").expect("valid url");
/// let item = FeedItem::new(Uuid::nil(), None, Some("Lisbon".to_owned()), image);
/// assert_eq!(item.location(), Some("Lisbon"));
/// assert!(item.description().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeedItem {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(rename = "image")]
    image_url: Url,
}

impl FeedItem {
    /// Build an item from already validated parts.
    #[must_use]
    pub const fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        image_url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            image_url,
        }
    }

    /// Item identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Free-form description, if the source provided one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Location label, if the source provided one.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Absolute URL of the item's image.
    #[must_use]
    pub const fn image_url(&self) -> &Url {
        &self.image_url
    }
}
