use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the feed proxy transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy endpoint that accepts `POST {"url": ...}`
    pub endpoint: String,

    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// How long a raw payload stays cached, in seconds (default: 300)
    pub cache_ttl_secs: u64,

    /// Maximum number of cached payloads (default: 256)
    pub cache_capacity: u64,

    /// User agent string to send
    pub user_agent: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/api/v1/rss/proxy".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 5 * 60,
            cache_capacity: 256,
            user_agent: concat!("gazette/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
