pub mod cache;
pub mod config;
pub mod http;
pub mod reachability;

pub use cache::CacheParams;
pub use config::{
    ConfigError, Configurable, NetworkConfig, NetworkConfigBuilder,
    NetworkConfigBuilderError,
};
#[cfg(feature = "http")]
pub use http::build_http_client;
pub use http::HttpClientParams;
pub use reachability::ReachabilityParams;
