use bytes::Bytes;
use std::time::Duration;
use tokio::time::Instant;

/// A cached response body captured from the network.
///
/// Fields are private: an entry is built once, at insertion, and replaced
/// wholesale on overwrite. `captured_at` never moves after construction.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Exact request URL the payload was fetched from
    key: String,
    /// Raw response bytes, exactly as received
    payload: Bytes,
    /// When the payload was captured
    captured_at: Instant,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(key: impl Into<String>, payload: Bytes) -> Self {
        Self {
            key: key.into(),
            payload,
            captured_at: Instant::now(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// Time elapsed since capture.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.captured_at)
    }

    /// An entry is fresh while its age is strictly below `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}
