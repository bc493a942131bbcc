//! # netcache
//!
//! `netcache` is a small HTTP client for JSON APIs with a time-bounded
//! response cache in front of the network. A fresh cached body is decoded
//! without touching the network; anything else goes through the transport,
//! and only successful (2xx) responses are cached.
//!
//! ## Features
//!
//! - **Endpoint descriptions**: describe a resource once with [`Endpoint`] and
//!   let the crate build the URL, headers and query string.
//! - **TTL response cache**: responses are cached by exact URL for a
//!   configurable duration (one hour by default).
//! - **Single error type**: every failure is reported as a [`NetworkError`].
//! - **Pluggable parts**: swap the transport or the cache backend through the
//!   [`Transport`] and [`cache::ResponseCache`] traits.
//! - **Reachability**: a background monitor that can keep the pipeline from
//!   sending requests while offline.
//!
//! ## Modules
//!
//! - `cache`: response cache trait and in-memory backend.
//! - `config`: YAML configuration for the HTTP client, cache and monitor.
//! - `endpoint`: resource descriptions.
//! - `pipeline`: the cache-backed fetch pipeline.
//! - `reachability`: connectivity monitoring.
//! - `transport`: network round-trip abstraction.
pub mod endpoint;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod reachability;
pub mod request;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod transport;

pub use endpoint::{Endpoint, Parameters};
pub use error::NetworkError;
pub use pipeline::FetchPipeline;
pub use reachability::{ConnectivityProbe, HttpProbe, Reachability};
pub use request::Request;
pub use transport::{
    AbstractTransport, ReqwestTransport, Transport, TransportError, TransportResponse,
};

pub use netcache_cache as cache;
pub use netcache_config as config;
// re-export
pub use async_trait;
pub use bytes;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tracing;
pub use url;
