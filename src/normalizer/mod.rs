pub mod analyzer;
pub mod raw;

use chrono::{DateTime, SecondsFormat, Utc};
use html_escape::decode_html_entities;
use serde_json::Value;

use crate::app::SourceError;
use crate::domain::{FeedItem, FeedSource};

pub use raw::{parse_entries, RawEntry};

pub const EXCERPT_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

const DEFAULT_TITLE: &str = "No Title";
const DEFAULT_URL: &str = "#";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_COUNTRY: &str = "US";

/// First [`EXCERPT_CHARS`] characters of `content`, with [`ELLIPSIS`]
/// appended when anything was cut.
pub fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a proxy payload and normalize every entry in it.
    pub fn normalize(
        &self,
        source: &FeedSource,
        payload: &Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<Vec<FeedItem>, SourceError> {
        let entries = parse_entries(payload)?;
        Ok(entries
            .into_iter()
            .map(|entry| self.normalize_entry(source, entry, fetched_at))
            .collect())
    }

    pub fn normalize_entry(
        &self,
        source: &FeedSource,
        entry: RawEntry,
        fetched_at: DateTime<Utc>,
    ) -> FeedItem {
        let title_text = entry
            .title
            .map(|t| decode_html_entities(&t).to_string())
            .unwrap_or_default();
        let content = decode_html_entities(&entry.content).to_string();

        let analyzed = format!("{} {}", title_text, content);
        let word_count = analyzer::word_count(&analyzed);

        let title = if title_text.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title_text
        };

        FeedItem {
            id: format!("{}_{}", source.id, entry.index),
            title,
            excerpt: excerpt(&content),
            author: entry
                .author
                .map(|a| decode_html_entities(&a).to_string())
                .unwrap_or_else(|| source.name.clone()),
            source: source.name.clone(),
            url: entry.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            published_at: entry
                .published_at
                .unwrap_or_else(|| fetched_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            image_url: entry.image_url,
            category: source.category.clone(),
            tags: analyzer::extract_tags(&analyzed),
            reading_time: analyzer::reading_time_minutes(word_count),
            word_count,
            sentiment: analyzer::sentiment(&analyzed),
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;
    use chrono::TimeZone;
    use serde_json::json;

    fn source() -> FeedSource {
        FeedSource::new("feed-2", "Feed 2", "https://example.com/f.json", "General", 2)
    }

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_excerpt_short_content_verbatim() {
        assert_eq!(excerpt(""), "");
        let exact = "x".repeat(200);
        assert_eq!(excerpt(&exact), exact);
    }

    #[test]
    fn test_excerpt_truncates_long_content() {
        let long = "y".repeat(250);
        let out = excerpt(&long);
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..200], &long[..200]);
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        let long = "é".repeat(201);
        let out = excerpt(&long);
        assert_eq!(out.chars().count(), 203);
        assert!(out.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_normalize_full_entry() {
        let payload = json!({
            "items": [{
                "title": "AI breakthrough &amp; more",
                "content_text": "An amazing result in robotics research.",
                "authors": [{ "name": "Ada" }],
                "url": "https://example.com/1",
                "date_published": "2024-04-30T08:00:00Z",
                "image": "https://example.com/1.png"
            }]
        });

        let items = Normalizer::new()
            .normalize(&source(), &payload, fetched_at())
            .unwrap();
        let item = &items[0];

        assert_eq!(item.id, "feed-2_0");
        assert_eq!(item.title, "AI breakthrough & more");
        assert_eq!(item.excerpt, item.content);
        assert_eq!(item.author, "Ada");
        assert_eq!(item.source, "Feed 2");
        assert_eq!(item.category, "General");
        assert_eq!(item.published_at, "2024-04-30T08:00:00Z");
        assert_eq!(item.image_url.as_deref(), Some("https://example.com/1.png"));
        // four title words plus six content words
        assert_eq!(item.word_count, 10);
        assert_eq!(item.reading_time, 1);
        assert_eq!(item.tags, ["AI", "robotics", "research"]);
        assert_eq!(item.sentiment, Sentiment::Positive);
        assert_eq!(item.language, "en");
        assert_eq!(item.country, "US");
    }

    #[test]
    fn test_normalize_defaults() {
        let payload = json!({ "items": [{}, { "title": "Second" }] });
        let items = Normalizer::new()
            .normalize(&source(), &payload, fetched_at())
            .unwrap();

        let first = &items[0];
        assert_eq!(first.id, "feed-2_0");
        assert_eq!(first.title, "No Title");
        assert_eq!(first.content, "");
        assert_eq!(first.author, "Feed 2");
        assert_eq!(first.url, "#");
        assert_eq!(first.published_at, "2024-05-01T12:00:00.000Z");
        assert_eq!(first.word_count, 0);
        assert_eq!(first.reading_time, 1);
        assert_eq!(first.sentiment, Sentiment::Neutral);

        assert_eq!(items[1].id, "feed-2_1");
    }

    #[test]
    fn test_reading_time_from_long_content() {
        let content = vec!["word"; 401].join(" ");
        let payload = json!({ "items": [{ "title": "T", "content_text": content }] });
        let items = Normalizer::new()
            .normalize(&source(), &payload, fetched_at())
            .unwrap();

        assert_eq!(items[0].word_count, 402);
        assert_eq!(items[0].reading_time, 3);
        assert!(items[0].excerpt.chars().count() <= EXCERPT_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn test_title_only_entry_counts_title_words() {
        let payload = json!({ "items": [{ "title": "Three word title" }] });
        let items = Normalizer::new()
            .normalize(&source(), &payload, fetched_at())
            .unwrap();

        assert_eq!(items[0].content, "");
        assert_eq!(items[0].word_count, 3);
        assert_eq!(items[0].reading_time, 1);
    }

    #[test]
    fn test_payload_without_items_fails() {
        let err = Normalizer::new()
            .normalize(&source(), &json!({ "title": "x" }), fetched_at())
            .unwrap_err();
        assert!(matches!(err, SourceError::ParseFailed(_)));
    }
}
