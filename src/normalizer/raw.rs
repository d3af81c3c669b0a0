//! Boundary mapping from loosely shaped proxy payloads to [`RawEntry`].
//!
//! Upstream feeds disagree on field names, so every fallback lives here:
//!
//! | field     | tried in order                               |
//! |-----------|----------------------------------------------|
//! | content   | `content_text`, `content_html`, `summary`    |
//! | author    | `authors[0].name`, `author` (string or obj)  |
//! | published | `date_published`, `pubDate`                  |
//! | image     | `image`, `thumbnail`                         |
//!
//! Empty strings count as missing. Numbers and booleans are taken as text;
//! other wrongly typed values count as missing without dropping the entry.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::app::SourceError;

/// Typed record produced once per upstream entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Position in the upstream `items` array.
    pub index: usize,
    pub title: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    #[serde(default, deserialize_with = "scalar")]
    title: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    content_text: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    content_html: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    summary: Option<String>,
    #[serde(default)]
    authors: Value,
    #[serde(default)]
    author: Value,
    #[serde(default, deserialize_with = "scalar")]
    url: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    date_published: Option<String>,
    #[serde(rename = "pubDate", default, deserialize_with = "scalar")]
    pub_date: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    image: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    thumbnail: Option<String>,
}

/// Strings pass through, numbers and booleans are rendered, anything else
/// counts as absent.
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `"Ada"` or `{"name": "Ada"}`.
fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(person) => present(person.get("name").and_then(scalar_text)),
        other => present(scalar_text(other)),
    }
}

impl WireEntry {
    fn into_raw(self, index: usize) -> RawEntry {
        let author = self
            .authors
            .as_array()
            .and_then(|authors| authors.first())
            .and_then(author_name)
            .or_else(|| author_name(&self.author));

        RawEntry {
            index,
            title: present(self.title),
            content: present(self.content_text)
                .or_else(|| present(self.content_html))
                .or_else(|| present(self.summary))
                .unwrap_or_default(),
            author,
            url: present(self.url),
            published_at: present(self.date_published).or_else(|| present(self.pub_date)),
            image_url: present(self.image).or_else(|| present(self.thumbnail)),
        }
    }
}

/// Extract entries from a payload's `items` array.
///
/// A payload without an `items` array is a [`SourceError::ParseFailed`].
/// Individual entries that are not objects are skipped.
pub fn parse_entries(payload: &Value) -> Result<Vec<RawEntry>, SourceError> {
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::ParseFailed("payload has no items array".to_string()))?;

    let entries = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!("Skipping item {}: not an object", index);
                return None;
            }
            match WireEntry::deserialize(item) {
                Ok(wire) => Some(wire.into_raw(index)),
                Err(e) => {
                    tracing::warn!("Skipping item {}: {}", index, e);
                    None
                }
            }
        })
        .collect();

    Ok(entries)
}
