use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::fetcher::RetryPolicy;

/// Pacing, retry and caching knobs for the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Sources fetched concurrently per batch (default: 2)
    pub batch_size: usize,

    /// Pause between batches in milliseconds (default: 2000)
    pub batch_delay_ms: u64,

    /// Upper bound of the random delay before each fetch attempt (default: 3000)
    pub max_jitter_ms: u64,

    /// Per-attempt fetch timeout in seconds (default: 10)
    pub fetch_timeout_secs: u64,

    /// Result cache lifetime in seconds (default: 600)
    pub cache_ttl_secs: u64,

    /// Maximum number of cached query results (default: 64)
    pub cache_capacity: u64,

    /// How many items search filters over (default: 100)
    pub search_pool: usize,

    pub retry: RetryPolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            batch_size: 2,
            batch_delay_ms: 2000,
            max_jitter_ms: 3000,
            fetch_timeout_secs: 10,
            cache_ttl_secs: 10 * 60,
            cache_capacity: 64,
            search_pool: 100,
            retry: RetryPolicy::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.max_jitter_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// No pacing or backoff delays; retries and caching behave as usual.
    pub fn immediate() -> Self {
        Self {
            batch_delay_ms: 0,
            max_jitter_ms: 0,
            retry: RetryPolicy::no_delay(RetryPolicy::default().max_attempts),
            ..Default::default()
        }
    }
}
