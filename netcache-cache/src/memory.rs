//! In-memory implementation of the ResponseCache trait. Entries live in a
//! mutex-guarded map and expire after a single time-to-live chosen at
//! construction. Expired entries are not served but stay in memory until they
//! are overwritten or purged.
use crate::{CacheEntry, CacheError, ResponseCache};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, trace};

/// Default time-to-live, one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

pub struct InMemoryResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl InMemoryResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    fn entries(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, CacheEntry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Lock(e.to_string()))
    }

    /// Raw entry for `key`, fresh or not.
    ///
    /// Useful to inspect the last good payload after it expired.
    pub fn entry(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries()?.get(key).cloned())
    }

    /// Number of entries held, including expired ones.
    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.entries()?.is_empty())
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> Result<usize, CacheError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        let purged = before - entries.len();
        debug!(purged, "Purged expired cache entries");
        Ok(purged)
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn lookup(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let entries = self.entries()?;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                trace!(key, age = ?entry.age(), "Fresh cache entry");
                Ok(Some(entry.payload().clone()))
            }
            Some(entry) => {
                trace!(key, age = ?entry.age(), "Expired cache entry");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn store(&self, key: &str, payload: Bytes) -> Result<(), CacheError> {
        // Build the entry before taking the lock so it is inserted as a unit.
        let entry = CacheEntry::new(key, payload);
        let size = entry.payload().len();
        self.entries()?.insert(key.to_string(), entry);
        debug!(key, size, "Cached response");
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for InMemoryResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("InMemoryResponseCache");
        debug.field("ttl", &self.ttl);
        match self.entries.lock() {
            Ok(entries) => debug.field("entries", &entries.len()),
            Err(_) => debug.field("entries", &"<poisoned>"),
        };
        debug.finish()
    }
}
