//! Response cache implementations for netcache.
//!
//! This crate holds the cache store used by the fetch pipeline. It offers a
//! trait-based API with pluggable backends, keyed by the exact request URL.
//!
//! Currently supported backends:
//! - In-memory map with a single time-to-live
//! - No-op backend that never caches

mod cache;
mod error;
mod memory;
mod response_cache;

pub use cache::CacheEntry;
pub use error::CacheError;
pub use memory::{DEFAULT_TTL, InMemoryResponseCache};
pub use response_cache::{AbstractResponseCache, NoopResponseCache, ResponseCache};
