//! Static list of feed sources.
//!
//! The registry is built once and never mutated. Every query filters to
//! enabled sources; ordering is ascending priority with declaration order
//! as the tie-break.

use std::collections::{BTreeSet, HashSet};

use crate::app::{GazetteError, Result};
use crate::domain::FeedSource;

pub const TRENDING: &str = "Trending";

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<FeedSource>,
}

impl SourceRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(sources: Vec<FeedSource>) -> Result<Self> {
        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.id.as_str()) {
                return Err(GazetteError::DuplicateSource(source.id.clone()));
            }
        }
        Ok(Self { sources })
    }

    /// Enabled sources, optionally restricted to one category.
    pub fn list_enabled(&self, category: Option<&str>) -> Vec<FeedSource> {
        let mut sources: Vec<FeedSource> = self
            .sources
            .iter()
            .filter(|s| s.enabled)
            .filter(|s| category.is_none_or(|c| s.category == c))
            .cloned()
            .collect();
        // sort_by_key is stable, so equal priorities keep declaration order
        sources.sort_by_key(|s| s.priority);
        sources
    }

    pub fn list_categories(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.category.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&FeedSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

/// Built-in sources: one trending feed and nine general ones.
pub fn default_sources() -> Vec<FeedSource> {
    const GENERAL: [(&str, &str, i32); 9] = [
        ("feed-2", "hd9ERoOglTDtQGB5", 2),
        ("feed-3", "nstPTXGvSOtovcBa", 2),
        ("feed-4", "H09AmWgYZgGhhSbi", 2),
        ("feed-5", "XCyJPliS1iOyCv5y", 2),
        ("feed-6", "OAP8F5qMaQkzsFUt", 3),
        ("feed-7", "UWLe7qkql3LoXBK1", 3),
        ("feed-8", "90oLLBd6LsucuHjN", 3),
        ("feed-9", "e4AYkortCX0iBkYk", 3),
        ("feed-10", "XoWQmqjmjYamCBKD", 3),
    ];

    let mut sources = vec![FeedSource::new(
        "reddit-trending",
        "Reddit Trending",
        "https://rss.app/feeds/v1.1/V6yeazGWEdtV98wO.json",
        TRENDING,
        1,
    )];

    sources.extend(GENERAL.iter().map(|(id, key, priority)| {
        let n = id.trim_start_matches("feed-");
        FeedSource::new(
            *id,
            format!("Feed {}", n),
            format!("https://rss.app/feeds/v1.1/{}.json", key),
            "General",
            *priority,
        )
    }));

    sources
}
