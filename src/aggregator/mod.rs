//! Multi-source feed aggregation.
//!
//! ```text
//! registry → batches → (jitter → fetch → retry) → normalize → merge → cache
//! ```
//!
//! Sources are fetched in fixed-size batches. Inside a batch every source is
//! fetched concurrently; batches run strictly one after another with a
//! pause in between. A source that keeps failing contributes nothing and
//! never fails the query: an empty result is a valid answer.

pub mod config;
pub mod session;

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use moka::future::Cache;
use rand::Rng;
use serde_json::Value;
use tokio::time::{sleep, timeout};

use crate::app::{GazetteError, Result, SourceError};
use crate::domain::{FeedItem, FeedSource};
use crate::fetcher::{retry, FetchError, Fetcher};
use crate::normalizer::Normalizer;
use crate::registry::{SourceRegistry, TRENDING};

pub use config::AggregatorConfig;
pub use session::FeedSession;

/// Result cache key: category (or `"all"`) plus the requested limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub scope: String,
    pub limit: usize,
}

impl CacheKey {
    pub fn new(category: Option<&str>, limit: usize) -> Self {
        Self {
            scope: category.unwrap_or("all").to_string(),
            limit,
        }
    }
}

/// Outcome of fetching one source.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source_id: String,
    pub source_name: String,
    pub items: Vec<FeedItem>,
    pub error: Option<SourceError>,
}

impl SourceReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct FeedAggregator {
    registry: Arc<SourceRegistry>,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    config: AggregatorConfig,
    cache: Cache<CacheKey, Vec<FeedItem>>,
}

impl FeedAggregator {
    pub fn new(
        registry: Arc<SourceRegistry>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        config: AggregatorConfig,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl())
            .build();

        Self {
            registry,
            fetcher,
            normalizer: Normalizer::new(),
            config,
            cache,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Items for a category (or every enabled source), newest first.
    ///
    /// Served from the result cache while fresh. Concurrent calls for the
    /// same key share a single fetch; if the fetching caller is cancelled a
    /// waiting one takes over.
    pub async fn get_items(&self, category: Option<&str>, limit: usize) -> Result<Vec<FeedItem>> {
        if limit == 0 {
            return Err(GazetteError::InvalidLimit(limit));
        }

        let key = CacheKey::new(category, limit);
        if let Some(items) = self.cache.get(&key).await {
            tracing::debug!("Result cache hit for {:?}", key);
            return Ok(items);
        }

        Ok(self.cache.get_with(key, self.load(category, limit)).await)
    }

    async fn load(&self, category: Option<&str>, limit: usize) -> Vec<FeedItem> {
        let reports = self.fetch_report(category).await;
        let sources = reports.len();
        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        let items = merge(reports, limit);

        tracing::info!(
            "Fetched {} items from {} sources ({} failed)",
            items.len(),
            sources,
            failed
        );

        items
    }

    pub async fn get_trending(&self, limit: usize) -> Result<Vec<FeedItem>> {
        self.get_items(Some(TRENDING), limit).await
    }

    pub async fn get_all(&self, limit: usize) -> Result<Vec<FeedItem>> {
        self.get_items(None, limit).await
    }

    /// Case-insensitive filter over title, content and tags of the newest
    /// `search_pool` items. Upstream sources cannot search themselves.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<FeedItem>> {
        if limit == 0 {
            return Err(GazetteError::InvalidLimit(limit));
        }
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.get_all(self.config.search_pool.max(limit)).await?;
        Ok(pool
            .into_iter()
            .filter(|item| item.matches(query))
            .take(limit)
            .collect())
    }

    pub fn list_categories(&self) -> BTreeSet<String> {
        self.registry.list_categories()
    }

    pub fn list_sources(&self) -> Vec<FeedSource> {
        self.registry.list_enabled(None)
    }

    /// Drop every cached query result and every cached raw payload.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        self.fetcher.clear_cache();
    }

    pub async fn cached_results(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Fetch every enabled source of a category, bypassing the result cache,
    /// and report each source's outcome.
    pub async fn fetch_report(&self, category: Option<&str>) -> Vec<SourceReport> {
        let sources = self.registry.list_enabled(category);
        let batches: Vec<&[FeedSource]> = sources.chunks(self.config.batch_size.max(1)).collect();
        let total = batches.len();
        let mut reports = Vec::with_capacity(sources.len());

        for (i, batch) in batches.into_iter().enumerate() {
            tracing::info!("Processing batch {} of {}", i + 1, total);

            let results = join_all(batch.iter().map(|source| self.fetch_source(source))).await;
            reports.extend(results);

            if i + 1 < total && !self.config.batch_delay().is_zero() {
                tracing::debug!("Waiting {:?} before next batch", self.config.batch_delay());
                sleep(self.config.batch_delay()).await;
            }
        }

        reports
    }

    async fn fetch_source(&self, source: &FeedSource) -> SourceReport {
        let fetched = retry(&self.config.retry, |_| self.fetch_once(source)).await;

        let outcome = fetched
            .map_err(SourceError::from)
            .and_then(|payload| self.normalizer.normalize(source, &payload, Utc::now()));

        match outcome {
            Ok(items) => {
                tracing::info!("Fetched {} items from {}", items.len(), source.name);
                SourceReport {
                    source_id: source.id.clone(),
                    source_name: source.name.clone(),
                    items,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", source.name, e);
                SourceReport {
                    source_id: source.id.clone(),
                    source_name: source.name.clone(),
                    items: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    /// One attempt: random jitter, then a fetch bounded by the timeout.
    async fn fetch_once(&self, source: &FeedSource) -> std::result::Result<Value, FetchError> {
        let jitter = self.jitter();
        if !jitter.is_zero() {
            sleep(jitter).await;
        }

        match timeout(self.config.fetch_timeout(), self.fetcher.fetch_raw(&source.location)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }

    fn jitter(&self) -> Duration {
        let max = self.config.max_jitter_ms;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=max))
    }
}

/// Concatenate every report's items, newest first, cut to `limit`.
///
/// Items without a parsable date go last; the sort is stable.
pub fn merge(reports: Vec<SourceReport>, limit: usize) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = reports.into_iter().flat_map(|r| r.items).collect();
    items.sort_by_cached_key(|item| Reverse(item.published_time()));
    items.truncate(limit);
    items
}
