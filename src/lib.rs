//! # Gazette
//!
//! A category-aware news feed aggregator that reads its sources through an
//! aggregation proxy.
//!
//! ## Architecture
//!
//! ```text
//! SourceRegistry → FeedAggregator → ProxyClient → Normalizer → merged items
//! ```
//!
//! - [`registry`]: Catalog of configured sources
//! - [`fetcher`]: Proxy client with a raw-payload cache and retry policy
//! - [`normalizer`]: Maps raw entries to [`FeedItem`](domain::FeedItem)s and enriches them
//! - [`aggregator`]: Paced fan-out, merge, result cache, search
//!
//! ## Quick Start
//!
//! ```bash
//! # Newest items across all sources
//! gazette items
//!
//! # Trending only
//! gazette trending --limit 5
//!
//! # Search
//! gazette search rust
//!
//! # Keep refreshing every 5 minutes
//! gazette watch --interval 5m
//! ```

/// Pacing, merging and caching of multi-source queries.
///
/// - [`FeedAggregator`](aggregator::FeedAggregator): Query entry point
/// - [`FeedSession`](aggregator::FeedSession): Cancels superseded loads
pub mod aggregator;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// registry, fetcher, aggregator.
pub mod app;

/// Command-line interface using clap.
///
/// - `items [--category]` - Newest items
/// - `trending` / `all` - Shortcuts for common queries
/// - `search <query>` - Filter recent items
/// - `categories` / `sources` - Inspect the registry
/// - `report` - Per-source fetch outcome
/// - `watch` - Auto-refresh loop
pub mod cli;

/// Configuration loaded from `~/.config/gazette/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): A configured source
/// - [`FeedItem`](domain::FeedItem): A normalized, enriched entry
pub mod domain;

/// Fetching raw payloads through the aggregation proxy.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for raw payload fetching
/// - [`ProxyClient`](fetcher::ProxyClient): reqwest-based implementation
/// - [`retry`](fetcher::retry::retry): Attempt loop with exponential backoff
pub mod fetcher;

/// Entry normalization and text analysis.
pub mod normalizer;

/// Periodic re-query of the aggregator.
pub mod refresh;

/// Source catalog.
pub mod registry;
