use crate::config::{ConfigError, seconds};
use std::time::Duration;

/// Probe target used when none is configured. Cloudflare's DNS resolver is
/// reachable over HTTPS and has high uptime.
pub const DEFAULT_PROBE_URL: &str = "https://1.1.1.1";

/// Connectivity monitor settings.
///
/// ```yaml
/// reachability:
///     probe_url: https://1.1.1.1   # optional
///     interval: 10                 # seconds between probes, optional
///     timeout: 1                   # seconds per probe, optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityParams {
    pub probe_url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ReachabilityParams {
    fn default() -> Self {
        Self {
            probe_url: DEFAULT_PROBE_URL.to_string(),
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(1),
        }
    }
}

impl ReachabilityParams {
    pub fn from_config(config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let probe_url = match config.get("probe_url") {
            None | Some(serde_yaml::Value::Null) => defaults.probe_url,
            Some(value) => value.as_str().map(str::to_string).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: "reachability.probe_url".to_string(),
                    reason: "expected a string".to_string(),
                }
            })?,
        };

        Ok(Self {
            probe_url,
            interval: seconds(
                config,
                "reachability",
                "interval",
                Some(defaults.interval.as_secs()),
            )?,
            timeout: seconds(
                config,
                "reachability",
                "timeout",
                Some(defaults.timeout.as_secs()),
            )?,
        })
    }
}
