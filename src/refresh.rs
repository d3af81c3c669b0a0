//! Periodic re-query of the aggregator.
//!
//! Ticks on a fixed interval (first tick immediately) and hands each result
//! to a callback. Without `force` a tick is served from the result cache
//! while it is still fresh; with it every tick goes back to the proxy.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::time::{interval, MissedTickBehavior};

use crate::aggregator::FeedAggregator;
use crate::app::Result;
use crate::domain::FeedItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between refreshes (default: 300 = 5 minutes)
    pub interval_secs: u64,
    /// Drop the result and payload caches before every tick
    pub force: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            force: false,
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Parse interval string like "1h", "30m", "90s", "1d"
    pub fn parse_interval(s: &str) -> std::result::Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (digits, unit, scale) = if let Some(d) = s.strip_suffix('d') {
            (d, "days", 86400)
        } else if let Some(h) = s.strip_suffix('h') {
            (h, "hours", 3600)
        } else if let Some(m) = s.strip_suffix('m') {
            (m, "minutes", 60)
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, "seconds", 1)
        } else {
            return s
                .parse::<u64>()
                .map_err(|_| format!("Invalid interval: {}. Use format like '5m', '1h'", s));
        };

        let value = digits
            .parse::<u64>()
            .map_err(|_| format!("Invalid {}: {}", unit, digits))?;
        value
            .checked_mul(scale)
            .ok_or_else(|| format!("Interval too large: {}", s))
    }

    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs.is_multiple_of(86400) {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

pub struct AutoRefresh {
    aggregator: Arc<FeedAggregator>,
    config: RefreshConfig,
    shutdown: Notify,
}

impl AutoRefresh {
    pub fn new(aggregator: Arc<FeedAggregator>, config: RefreshConfig) -> Self {
        Self {
            aggregator,
            config,
            shutdown: Notify::new(),
        }
    }

    /// Make a running [`run`](AutoRefresh::run) return after its current tick.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }

    /// One query; with `force` every cache is dropped first.
    pub async fn refresh_once(&self, category: Option<&str>, limit: usize) -> Result<Vec<FeedItem>> {
        if self.config.force {
            self.aggregator.invalidate();
        }
        self.aggregator.get_items(category, limit).await
    }

    pub async fn run<F>(&self, category: Option<&str>, limit: usize, mut on_items: F) -> Result<()>
    where
        F: FnMut(&[FeedItem]) + Send,
    {
        tracing::info!(
            "Auto-refresh started (every {})",
            RefreshConfig::format_interval(self.config.interval().as_secs())
        );

        let mut timer = interval(self.config.interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                _ = timer.tick() => {}
            }

            let items = self.refresh_once(category, limit).await?;
            tracing::debug!("Refresh produced {} items", items.len());
            on_items(&items);
        }

        tracing::info!("Auto-refresh stopped");
        Ok(())
    }
}
