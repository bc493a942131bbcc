//! Scripted transport and failing cache for exercising the pipeline without
//! a network.
use crate::Request;
use crate::transport::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use netcache_cache::{CacheError, ResponseCache};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Transport that replays queued outcomes in order and records every request.
///
/// Running out of outcomes is reported as a connect error, so an unexpected
/// network call shows up as a failed fetch instead of a hang.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<String>>,
    latency: Duration,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request waits `latency` before its outcome is returned.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn respond(&self, status: u16, body: impl Into<Bytes>) {
        self.push(Ok(TransportResponse {
            status: Some(status),
            body: body.into(),
        }));
    }

    pub fn respond_without_status(&self, body: impl Into<Bytes>) {
        self.push(Ok(TransportResponse {
            status: None,
            body: body.into(),
        }));
    }

    pub fn fail(&self, err: TransportError) {
        self.push(Err(err));
    }

    /// Number of requests executed so far.
    pub fn calls(&self) -> usize {
        self.requested_urls().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, outcome: Result<TransportResponse, TransportError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: &Request,
    ) -> Result<TransportResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.cache_key().to_string());
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front())
            .unwrap_or_else(|| {
                Err(TransportError::Connect("no scripted response left".into()))
            })
    }
}

/// Cache whose backend fails on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCache;

#[async_trait]
impl ResponseCache for FailingCache {
    async fn lookup(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
        Err(CacheError::Backend("lookup unavailable".into()))
    }

    async fn store(&self, _key: &str, _payload: Bytes) -> Result<(), CacheError> {
        Err(CacheError::Backend("store unavailable".into()))
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}
