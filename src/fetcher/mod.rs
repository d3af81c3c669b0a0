pub mod config;
#[cfg(test)]
pub mod fake;
pub mod proxy_client;
pub mod retry;
#[cfg(test)]
pub mod test_server;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use config::ProxyConfig;
pub use proxy_client::ProxyClient;
pub use retry::{retry, RetryPolicy};

/// Why fetching one source failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

pub type FetchResult = std::result::Result<Value, FetchError>;

/// Cached transport for raw feed payloads. Implementations never retry.
#[async_trait]
pub trait Fetcher {
    async fn fetch_raw(&self, location: &str) -> FetchResult;

    /// Forget cached payloads so the next fetch goes upstream.
    fn clear_cache(&self) {}
}
