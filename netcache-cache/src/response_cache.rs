use crate::CacheError;
use async_trait::async_trait;
use bytes::Bytes;
use std::{sync::Arc, time::Duration};

/// Core response cache trait that backends must implement.
///
/// Keys are exact URL strings. Implementations serialize access internally:
/// a `lookup` never observes a half-written entry.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Get the payload stored for `key`, only while it is still fresh.
    async fn lookup(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    /// Insert or replace the payload for `key`, stamped with the current time.
    async fn store(&self, key: &str, payload: Bytes) -> Result<(), CacheError>;

    /// Time-to-live applied to every entry.
    fn ttl(&self) -> Duration;
}

pub type AbstractResponseCache = Arc<dyn ResponseCache + Send + Sync>;

/// Backend that doesn't cache anything.
/// Used when caching is disabled - every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResponseCache;

#[async_trait]
impl ResponseCache for NoopResponseCache {
    async fn lookup(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
        Ok(None)
    }

    async fn store(&self, _key: &str, _payload: Bytes) -> Result<(), CacheError> {
        Ok(())
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_cache_always_misses() {
        let cache: AbstractResponseCache = Arc::new(NoopResponseCache);

        cache
            .store("https://example.com/a", Bytes::from_static(b"{}"))
            .await
            .unwrap();

        assert!(cache.lookup("https://example.com/a").await.unwrap().is_none());
        assert_eq!(cache.ttl(), Duration::ZERO);
    }
}
