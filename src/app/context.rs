use std::sync::Arc;

use crate::aggregator::FeedAggregator;
use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, ProxyClient};
use crate::registry::SourceRegistry;

pub struct AppContext {
    pub registry: Arc<SourceRegistry>,
    pub aggregator: Arc<FeedAggregator>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(ProxyClient::new(&config.proxy)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Wire the components around an arbitrary transport.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let registry = Arc::new(config.registry()?);
        let aggregator = Arc::new(FeedAggregator::new(
            registry.clone(),
            fetcher,
            config.aggregator.clone(),
        ));

        Ok(Self {
            registry,
            aggregator,
            config,
        })
    }
}
