use crate::config::{ConfigError, seconds};
use std::time::Duration;

/// Default response time-to-live in seconds.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Response cache settings.
///
/// ```yaml
/// cache:
///     ttl: 3600   # seconds, optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheParams {
    pub ttl: Duration,
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl CacheParams {
    pub fn from_config(cache_config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        Ok(Self {
            ttl: seconds(cache_config, "cache", "ttl", Some(DEFAULT_TTL_SECS))?,
        })
    }
}
