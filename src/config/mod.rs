//! Configuration management for Gazette.
//!
//! Configuration is read from `~/.config/gazette/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::aggregator::AggregatorConfig;
use crate::app::Result as AppResult;
use crate::domain::FeedSource;
use crate::fetcher::ProxyConfig;
use crate::refresh::RefreshConfig;
use crate::registry::SourceRegistry;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub proxy: ProxyConfig,
    pub aggregator: AggregatorConfig,
    pub refresh: RefreshConfig,
    /// Replaces the built-in source list when non-empty.
    pub sources: Vec<FeedSource>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    /// Build the source registry, falling back to the built-in sources.
    pub fn registry(&self) -> AppResult<SourceRegistry> {
        if self.sources.is_empty() {
            Ok(SourceRegistry::default())
        } else {
            SourceRegistry::new(self.sources.clone())
        }
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gazette Configuration
#
# Durations ending in _ms are milliseconds, _secs are seconds.

[proxy]
# Aggregation proxy; receives POST {"url": "<feed location>"}
endpoint = "http://localhost:8000/api/v1/rss/proxy"
timeout_secs = 10

# Raw payload cache
cache_ttl_secs = 300
cache_capacity = 256

[aggregator]
# Sources fetched together, and the pause between batches
batch_size = 2
batch_delay_ms = 2000

# Random delay (0..max) before every fetch attempt
max_jitter_ms = 3000

# Per-attempt timeout
fetch_timeout_secs = 10

# Query result cache
cache_ttl_secs = 600
cache_capacity = 64

# Number of newest items search looks through
search_pool = 100

[aggregator.retry]
max_attempts = 2
base_delay_ms = 2000
multiplier = 2.0
max_delay_ms = 60000

[refresh]
# Auto-refresh interval for `gazette watch`
interval_secs = 300
force = false

# Replace the built-in sources by listing your own:
#
# [[sources]]
# id = "rust-blog"
# name = "Rust Blog"
# location = "https://blog.rust-lang.org/feed.json"
# category = "Technology"
# priority = 1
# enabled = true
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
