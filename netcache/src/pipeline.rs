//! Cache-backed fetch pipeline.
//!
//! For every request the pipeline decides whether a fresh cached response can
//! be served or whether the network must be used:
//!
//! 1. look up the exact request URL in the response cache
//! 2. on a hit, decode the cached bytes
//! 3. on a miss, execute the request, reject non-2xx statuses, store the raw
//!    body and decode it
//!
//! Failures are reported as a single [`NetworkError`]. Nothing is retried and
//! there is no fallback between cache and network in either direction.
use crate::reachability::Reachability;
use crate::transport::{AbstractTransport, ReqwestTransport, TransportError};
use crate::{Endpoint, NetworkError, Request};
use bytes::Bytes;
use netcache_cache::{AbstractResponseCache, InMemoryResponseCache};
use netcache_config::NetworkConfig;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Status codes treated as success.
const SUCCESS_STATUS_CODES: Range<u16> = 200..300;

impl From<TransportError> for NetworkError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::InvalidResponse(_) => Self::InvalidResponse,
            other => Self::RequestFailed(other.to_string()),
        }
    }
}

/// Fetches JSON resources through a shared response cache.
///
/// Cloning is cheap and clones share the transport and the cache. Concurrent
/// fetches run independently: two misses on the same URL both reach the
/// network and the last completed store wins.
#[derive(Clone)]
pub struct FetchPipeline {
    transport: AbstractTransport,
    cache: AbstractResponseCache,
    reachability: Option<Reachability>,
}

impl FetchPipeline {
    /// Pipeline with a `reqwest` transport and an in-memory cache using the
    /// configured time-to-live.
    pub fn new(config: &NetworkConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::from_params(&config.http)?;
        let cache = InMemoryResponseCache::new(config.cache.ttl);
        Ok(Self::with_parts(Arc::new(transport), Arc::new(cache)))
    }

    /// Pipeline over caller-supplied parts. The caller may keep clones of
    /// either `Arc`.
    pub fn with_parts(
        transport: AbstractTransport,
        cache: AbstractResponseCache,
    ) -> Self {
        Self {
            transport,
            cache,
            reachability: None,
        }
    }

    /// Refuse network access with [`NetworkError::NoNetworkConnection`] while
    /// `reachability` reports offline. Fresh cache entries are still served.
    pub fn with_reachability(mut self, reachability: Reachability) -> Self {
        self.reachability = Some(reachability);
        self
    }

    pub fn cache(&self) -> &AbstractResponseCache {
        &self.cache
    }

    /// Fetch `request` and decode the JSON body as `T`.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn fetch<T>(&self, request: &Request) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
    {
        if let Some(cached) = self.cached(request.cache_key()).await {
            debug!("Serving response from cache");
            return decode(&cached);
        }

        if let Some(reachability) = &self.reachability {
            reachability.require_connection().inspect_err(|_| {
                warn!("Network unreachable, request not sent");
            })?;
        }

        let body = self.fetch_from_network(request).await?;
        decode(&body)
    }

    /// Resolve `endpoint` into a request and fetch it.
    pub async fn fetch_endpoint<T, E>(&self, endpoint: &E) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        let request = endpoint.request()?;
        self.fetch(&request).await
    }

    /// Fresh cached payload for `key`. Backend failures count as a miss.
    async fn cached(&self, key: &str) -> Option<Bytes> {
        match self.cache.lookup(key).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn fetch_from_network(&self, request: &Request) -> Result<Bytes, NetworkError> {
        let response = self.transport.execute(request).await.map_err(|err| {
            warn!(error = %err, "Transport failed");
            NetworkError::from(err)
        })?;

        match response.status {
            Some(status) if SUCCESS_STATUS_CODES.contains(&status) => {
                debug!(status, size = response.body.len(), "Fetched from network");
            }
            status => {
                warn!(?status, "Unexpected response status, not caching");
                return Err(NetworkError::unexpected_status(status));
            }
        }

        if let Err(err) = self
            .cache
            .store(request.cache_key(), response.body.clone())
            .await
        {
            warn!(error = %err, "Failed to cache response");
        }

        Ok(response.body)
    }
}

impl std::fmt::Debug for FetchPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchPipeline")
            .field("cache_ttl", &self.cache.ttl())
            .field("reachability", &self.reachability)
            .finish_non_exhaustive()
    }
}

/// JSON decode with the pipeline's error mapping.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, NetworkError> {
    serde_json::from_slice(bytes).map_err(|err| match err.classify() {
        Category::Syntax | Category::Data | Category::Eof => {
            debug!(error = %err, "Response body does not match target type");
            NetworkError::DecodingFailed
        }
        Category::Io => {
            warn!(error = %err, "Unexpected error while decoding");
            NetworkError::RequestFailed("An unknown error occurred.".to_string())
        }
    })
}
