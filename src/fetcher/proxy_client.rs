use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use url::Url;

use crate::app::Result;
use crate::fetcher::{FetchError, FetchResult, Fetcher, ProxyConfig};

/// Fetches feeds through the aggregation proxy, caching raw payloads.
pub struct ProxyClient {
    client: Client,
    endpoint: Url,
    cache: Cache<String, Value>,
}

impl ProxyClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl())
            .build();

        Ok(Self {
            client,
            endpoint,
            cache,
        })
    }

    /// Cache key for a source location
    pub fn cache_key(location: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(location.as_bytes());
        format!("rss_{}", hex::encode(hasher.finalize()))
    }

    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    async fn request(&self, location: &str) -> FetchResult {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "url": location }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body: Value = response.json().await?;
        unwrap_envelope(body)
    }
}

/// The proxy may answer with the feed itself or with a
/// `{"success": bool, "data": ..., "error": ...}` envelope around it.
fn unwrap_envelope(body: Value) -> FetchResult {
    if body.get("items").is_some() {
        return Ok(body);
    }

    match body.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("proxy reported failure");
            Err(FetchError::Transport(reason.to_string()))
        }
        Some(true) => Ok(body.get("data").cloned().unwrap_or(Value::Null)),
        None => Ok(body),
    }
}

#[async_trait]
impl Fetcher for ProxyClient {
    async fn fetch_raw(&self, location: &str) -> FetchResult {
        let key = Self::cache_key(location);

        if let Some(payload) = self.cache.get(&key).await {
            tracing::debug!("Proxy cache hit for {}", location);
            return Ok(payload);
        }

        // failures are not cached; concurrent misses share one request
        self.cache
            .try_get_with(key, self.request(location))
            .await
            .map_err(|e| e.as_ref().clone())
    }

    fn clear_cache(&self) {
        self.cache.invalidate_all();
    }
}
