use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

use crate::aggregator::FeedAggregator;
use crate::app::Result;
use crate::domain::FeedItem;

/// One consumer's view onto the aggregator.
///
/// Each [`load`](FeedSession::load) supersedes the previous one: a load that
/// is still running gets aborted. Results are cached only after every fetch
/// has settled, so an aborted load leaves the result cache untouched.
pub struct FeedSession {
    aggregator: Arc<FeedAggregator>,
    current: Mutex<Option<AbortHandle>>,
}

impl FeedSession {
    pub fn new(aggregator: Arc<FeedAggregator>) -> Self {
        Self {
            aggregator,
            current: Mutex::new(None),
        }
    }

    pub fn load(
        &self,
        category: Option<String>,
        limit: usize,
    ) -> JoinHandle<Result<Vec<FeedItem>>> {
        let aggregator = self.aggregator.clone();
        let handle =
            tokio::spawn(async move { aggregator.get_items(category.as_deref(), limit).await });

        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle.abort_handle());

        if let Some(previous) = previous {
            if !previous.is_finished() {
                tracing::debug!("Abandoning superseded load");
            }
            previous.abort();
        }

        handle
    }

    /// Abort the load in flight, if any.
    pub fn cancel(&self) {
        if let Some(current) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            current.abort();
        }
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
