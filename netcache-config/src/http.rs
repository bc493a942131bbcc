//! HTTP client settings for the network transport.
//!
//! This module provides functionality for building and configuring the
//! `reqwest` client used to talk to endpoints:
//! - Request and connect timeouts
//! - User agent customization
//!
//! # Example
//! ```no_run
//! use netcache_config::http::{HttpClientParams, build_http_client};
//! use serde_yaml::Value;
//!
//! let config: Value = serde_yaml::from_str(r#"
//! http:
//!     timeout: 30
//!     connect_timeout: 10
//!     user_agent: forecast-bot/1.0
//! "#).unwrap();
//!
//! let params = HttpClientParams::from_config(&config["http"]).unwrap();
//! let client = build_http_client(&params).unwrap();
//! ```
use crate::config::{ConfigError, seconds};
use std::time::Duration;

/// User agent sent when the configuration does not name one.
pub const DEFAULT_USER_AGENT: &str =
    concat!("netcache/", env!("CARGO_PKG_VERSION"));

/// Parameters for configuring an HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientParams {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientParams {
    /// Creates an HttpClientParams instance from a YAML configuration.
    ///
    /// The configuration should follow this structure:
    /// ```yaml
    /// http:
    ///     timeout: 30
    ///     connect_timeout: 10
    ///     user_agent: my-app/1.0   # optional
    /// ```
    ///
    /// `timeout` and `connect_timeout` are required.
    pub fn from_config(http_config: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let timeout = seconds(http_config, "http", "timeout", None)?;
        let connect_timeout = seconds(http_config, "http", "connect_timeout", None)?;
        let user_agent = match http_config.get("user_agent") {
            None | Some(serde_yaml::Value::Null) => DEFAULT_USER_AGENT.to_string(),
            Some(value) => value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "http.user_agent".to_string(),
                    reason: "expected a string".to_string(),
                })?,
        };

        Ok(Self {
            timeout,
            connect_timeout,
            user_agent,
        })
    }
}

/// Builds an HTTP client with the specified parameters.
///
/// Creates a reqwest::Client configured with:
/// - rustls TLS
/// - Timeout configurations
/// - User agent
#[cfg(feature = "http")]
pub fn build_http_client(
    params: &HttpClientParams,
) -> Result<reqwest::Client, reqwest::Error> {
    tracing::debug!(
        timeout = ?params.timeout,
        connect_timeout = ?params.connect_timeout,
        user_agent = %params.user_agent,
        "Building HTTP client"
    );
    reqwest::ClientBuilder::new()
        .use_rustls_tls()
        .timeout(params.timeout)
        .connect_timeout(params.connect_timeout)
        .user_agent(params.user_agent.as_str())
        .build()
}
