//! Shared application state for the ballot service.
//!
//! The store, request counter, and metrics are owned here and handed out as
//! `Arc`s/clones so the HTTP layer and the health reporter share the same
//! instances without process-wide statics.

use std::sync::Arc;

use ballot_core::{CounterStore, RequestCounter};

use crate::obs::metrics::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    store: Arc<CounterStore>,
    requests: RequestCounter,
    metrics: Arc<ServiceMetrics>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(CounterStore::new()),
            RequestCounter::new(),
            Arc::new(ServiceMetrics::default()),
        )
    }
}

impl AppState {
    pub fn new(
        store: Arc<CounterStore>,
        requests: RequestCounter,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            store,
            requests,
            metrics,
        }
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    pub fn requests(&self) -> &RequestCounter {
        &self.requests
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    /// State-derived lines appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("ballot_requests_seen", self.requests.total()),
            ("ballot_keys", self.store.len() as u64),
        ]
    }
}
