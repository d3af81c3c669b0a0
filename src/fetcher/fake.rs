//! Scripted in-memory [`Fetcher`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use crate::fetcher::{FetchError, FetchResult, Fetcher};

#[derive(Debug, Clone)]
pub enum Scripted {
    Payload(Value),
    Fail(FetchError),
    /// Fail this many times, then return the payload.
    FailThen(usize, Value),
    /// Never answer.
    Hang,
}

#[derive(Default)]
pub struct FakeFetcher {
    scripts: HashMap<String, Scripted>,
    latency: Duration,
    calls: Mutex<Vec<(String, Instant)>>,
    clears: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: &str, script: Scripted) -> Self {
        self.scripts.insert(location.to_string(), script);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, location: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == location)
            .count()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_raw(&self, location: &str) -> FetchResult {
        let previous = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|(l, _)| l == location).count();
            calls.push((location.to_string(), Instant::now()));
            previous
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.scripts.get(location) {
            Some(Scripted::Payload(v)) => Ok(v.clone()),
            Some(Scripted::Fail(e)) => Err(e.clone()),
            Some(Scripted::FailThen(n, v)) if previous >= *n => Ok(v.clone()),
            Some(Scripted::FailThen(_, _)) => Err(FetchError::HttpStatus(503)),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(FetchError::HttpStatus(404)),
        }
    }

    fn clear_cache(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}
