use crate::NetworkError;
use reqwest::{
    Method,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use url::Url;

/// A fully resolved HTTP request.
///
/// Query parameters are already part of `url`; the exact URL string doubles
/// as the cache key. Fields are read-only once the request is built.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parses `url`, failing with [`NetworkError::InvalidUrl`].
    pub fn parse(method: Method, url: &str) -> Result<Self, NetworkError> {
        let url = Url::parse(url).map_err(|e| {
            tracing::warn!(url, error = %e, "Rejected request URL");
            NetworkError::InvalidUrl
        })?;
        Ok(Self::new(method, url))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds every header from `headers`, replacing values for repeated names.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The literal URL string, no normalization.
    pub fn cache_key(&self) -> &str {
        self.url.as_str()
    }
}
