pub use crate::endpoint::{Endpoint, Parameters};
pub use crate::error::NetworkError;
pub use crate::pipeline::FetchPipeline;
pub use crate::reachability::{ConnectivityProbe, HttpProbe, Reachability};
pub use crate::request::Request;
pub use crate::transport::{
    AbstractTransport, ReqwestTransport, Transport, TransportError, TransportResponse,
};
pub use netcache_cache::{
    AbstractResponseCache, CacheError, InMemoryResponseCache, NoopResponseCache,
    ResponseCache,
};
pub use netcache_config::{Configurable, NetworkConfig, NetworkConfigBuilder};
