//! Status validation and JSON decoding of feed responses.
//!
//! The body is decoded into private DTOs first, then mapped into
//! [`FeedItem`] values in one pass. Decoding is all-or-nothing: one bad
//! record fails the whole document.

use serde::{Deserialize, Deserializer, de};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::{FeedItem, FeedLoadError, LoadFeedResult};

const OK_200: u16 = 200;
const HYPHENATED_UUID_LEN: usize = 36;

#[derive(Debug, Deserialize)]
struct FeedDocumentDto {
    items: Vec<FeedItemDto>,
}

#[derive(Debug, Deserialize)]
struct FeedItemDto {
    #[serde(deserialize_with = "hyphenated_uuid")]
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

/// Accept only the 8-4-4-4-12 form; simple, braced and URN forms are rejected.
fn hyphenated_uuid<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err(de::Error::custom(format!(
            "uuid '{raw}' is not in hyphenated form"
        )));
    }
    Uuid::try_parse(&raw).map_err(de::Error::custom)
}

impl FeedDocumentDto {
    fn into_items(self) -> Vec<FeedItem> {
        self.items.into_iter().map(FeedItemDto::into_item).collect()
    }
}

impl FeedItemDto {
    fn into_item(self) -> FeedItem {
        FeedItem::new(self.id, self.description, self.location, self.image)
    }
}

/// Map a delivered response into feed items.
///
/// Any status other than 200 is rejected without looking at the body.
///
/// # Errors
///
/// Returns [`FeedLoadError::InvalidData`] for a non-200 status, or when the
/// body is not an `{"items": [...]}` document whose records all carry a UUID
/// `id` and an absolute `image` URL.
///
/// # Examples
/// ```
/// use feed_loader::domain::{FeedLoadError, feed_items_mapper};
///
/// assert_eq!(feed_items_mapper::map(br#"{"items": []}"#, 200), Ok(vec![]));
/// assert_eq!(
///     feed_items_mapper::map(br#"{"items": []}"#, 404),
///     Err(FeedLoadError::InvalidData)
/// );
/// ```
pub fn map(data: &[u8], status: u16) -> LoadFeedResult {
    if status != OK_200 {
        debug!(status, "rejecting feed response with non-200 status");
        return Err(FeedLoadError::InvalidData);
    }

    let document: FeedDocumentDto = serde_json::from_slice(data).map_err(|error| {
        debug!(error = %error, bytes = data.len(), "feed body failed to decode");
        FeedLoadError::InvalidData
    })?;
    Ok(document.into_items())
}

#[cfg(test)]
mod tests {
    //! Decoding rules for feed responses.

    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn items_json(items: &[Value]) -> Vec<u8> {
        serde_json::to_vec(&json!({ "items": items })).expect("fixture json")
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("fixture url")
    }

    #[rstest]
    #[case(199)]
    #[case(201)]
    #[case(300)]
    #[case(400)]
    #[case(401)]
    #[case(500)]
    fn rejects_non_200_even_with_a_valid_document(#[case] status: u16) {
        assert_eq!(map(&items_json(&[]), status), Err(FeedLoadError::InvalidData));
    }

    #[test]
    fn rejects_non_200_without_inspecting_the_body() {
        assert_eq!(map(b"not json at all", 503), Err(FeedLoadError::InvalidData));
    }

    #[test]
    fn decodes_empty_list() {
        assert_eq!(map(&items_json(&[]), 200), Ok(vec![]));
    }

    #[rstest]
    #[case::plain_text(b"Invalid JSON".as_slice())]
    #[case::empty_body(b"".as_slice())]
    #[case::missing_items_key(br#"{"feed": []}"#.as_slice())]
    #[case::items_not_a_list(br#"{"items": {}}"#.as_slice())]
    fn rejects_bodies_that_are_not_items_documents(#[case] body: &[u8]) {
        assert_eq!(map(body, 200), Err(FeedLoadError::InvalidData));
    }

    #[test]
    fn decodes_items_in_source_order() {
        let first_id = Uuid::new_v4();
        let second_id = Uuid::new_v4();
        let body = items_json(&[
            json!({ "id": first_id.to_string(), "image": "https://a-url.com" }),
            json!({
                "id": second_id.to_string(),
                "description": "description",
                "location": "location",
                "image": "https://another-url.com",
            }),
        ]);

        let items = map(&body, 200).expect("document decodes");

        assert_eq!(
            items,
            vec![
                FeedItem::new(first_id, None, None, url("https://a-url.com")),
                FeedItem::new(
                    second_id,
                    Some("description".to_owned()),
                    Some("location".to_owned()),
                    url("https://another-url.com"),
                ),
            ]
        );
    }

    #[test]
    fn treats_null_optional_fields_as_absent() {
        let id = Uuid::new_v4();
        let body = items_json(&[json!({
            "id": id.to_string(),
            "description": null,
            "location": null,
            "image": "https://a-url.com",
        })]);

        let items = map(&body, 200).expect("document decodes");

        assert_eq!(items, vec![FeedItem::new(id, None, None, url("https://a-url.com"))]);
    }

    #[test]
    fn keeps_empty_strings_as_given() {
        let id = Uuid::new_v4();
        let body = items_json(&[json!({
            "id": id.to_string(),
            "description": "",
            "image": "https://a-url.com",
        })]);

        let items = map(&body, 200).expect("document decodes");

        assert_eq!(items.first().and_then(FeedItem::description), Some(""));
    }

    #[test]
    fn accepts_duplicate_ids() {
        let id = Uuid::new_v4();
        let record = json!({ "id": id.to_string(), "image": "https://a-url.com" });

        let items = map(&items_json(&[record.clone(), record]), 200).expect("document decodes");

        assert_eq!(items.len(), 2);
    }

    #[rstest]
    #[case::invalid_uuid(json!({ "id": "not-a-uuid", "image": "https://a-url.com" }))]
    #[case::simple_uuid(json!({ "id": "73a7f70c75da4c2eb5a3eed40dc53aa6", "image": "https://a-url.com" }))]
    #[case::braced_uuid(json!({
        "id": "{73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6}",
        "image": "https://a-url.com",
    }))]
    #[case::urn_uuid(json!({
        "id": "urn:uuid:73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6",
        "image": "https://a-url.com",
    }))]
    #[case::missing_id(json!({ "image": "https://a-url.com" }))]
    #[case::missing_image(json!({ "id": "73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6" }))]
    #[case::relative_image(json!({ "id": "73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6", "image": "/images/1.png" }))]
    #[case::numeric_description(json!({
        "id": "73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6",
        "description": 7,
        "image": "https://a-url.com",
    }))]
    fn one_bad_record_fails_the_whole_document(#[case] bad_record: Value) {
        let good_record = json!({
            "id": "BA298A85-6275-48D3-8315-9C8F7C1CD109",
            "image": "https://url-2.com",
        });

        let result = map(&items_json(&[good_record, bad_record]), 200);

        assert_eq!(result, Err(FeedLoadError::InvalidData));
    }

    #[rstest]
    #[case::uppercase("73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6")]
    #[case::lowercase("73a7f70c-75da-4c2e-b5a3-eed40dc53aa6")]
    fn accepts_hyphenated_ids_in_either_case(#[case] raw: &str) {
        let body = items_json(&[json!({ "id": raw, "image": "https://a-url.com" })]);

        let items = map(&body, 200).expect("document decodes");

        assert_eq!(
            items.first().map(FeedItem::id),
            Some(Uuid::parse_str(raw).expect("fixture uuid"))
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let id = Uuid::new_v4();
        let body = items_json(&[json!({
            "id": id.to_string(),
            "image": "https://a-url.com",
            "likes": 12,
        })]);

        assert_eq!(
            map(&body, 200),
            Ok(vec![FeedItem::new(id, None, None, url("https://a-url.com"))])
        );
    }
}
