//! Declarative description of a server resource.
//!
//! An endpoint carries the base URL, path, method, headers and query
//! parameters needed to build a [`Request`].
//!
//! ```no_run
//! use netcache::{Endpoint, Parameters};
//!
//! struct Forecast {
//!     latitude: f64,
//!     longitude: f64,
//! }
//!
//! impl Endpoint for Forecast {
//!     fn base_url(&self) -> &str {
//!         "https://api.open-meteo.com"
//!     }
//!
//!     fn path(&self) -> &str {
//!         "/v1/forecast"
//!     }
//!
//!     fn parameters(&self) -> Option<Parameters> {
//!         Some(vec![
//!             ("latitude".into(), self.latitude.to_string()),
//!             ("longitude".into(), self.longitude.to_string()),
//!         ])
//!     }
//! }
//! ```
use crate::{NetworkError, Request};
use reqwest::{
    Method,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use url::Url;

/// Ordered query parameters. Order is kept on the wire and therefore in the
/// cache key.
pub type Parameters = Vec<(String, String)>;

pub trait Endpoint {
    /// Scheme and authority of the server, optionally with a path prefix.
    fn base_url(&self) -> &str;

    /// Path appended to the base URL.
    fn path(&self) -> &str;

    fn method(&self) -> Method {
        Method::GET
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn parameters(&self) -> Option<Parameters> {
        None
    }

    /// Base URL joined with `path` by exactly one `/`, without parameters.
    fn request_url(&self) -> Result<Url, NetworkError> {
        let mut url = Url::parse(self.base_url()).map_err(|e| {
            tracing::warn!(base_url = self.base_url(), error = %e, "Invalid base URL");
            NetworkError::InvalidUrl
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            tracing::warn!(base_url = self.base_url(), "Base URL is not an HTTP URL");
            return Err(NetworkError::InvalidUrl);
        }

        let path = self.path().trim_start_matches('/');
        if !path.is_empty() {
            let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
            url.set_path(&joined);
        }
        Ok(url)
    }

    /// The request for this endpoint. Parameters are appended after any
    /// query pairs already present in the base URL.
    fn request(&self) -> Result<Request, NetworkError> {
        let mut url = self.request_url()?;
        if let Some(parameters) = self.parameters().filter(|p| !p.is_empty()) {
            url.query_pairs_mut().extend_pairs(parameters);
        }
        Ok(Request::new(self.method(), url).with_headers(self.headers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    struct TestEndpoint {
        base_url: &'static str,
        path: &'static str,
        parameters: Option<Parameters>,
    }

    impl Endpoint for TestEndpoint {
        fn base_url(&self) -> &str {
            self.base_url
        }

        fn path(&self) -> &str {
            self.path
        }

        fn parameters(&self) -> Option<Parameters> {
            self.parameters.clone()
        }
    }

    fn endpoint(base_url: &'static str, path: &'static str) -> TestEndpoint {
        TestEndpoint {
            base_url,
            path,
            parameters: None,
        }
    }

    fn params(pairs: &[(&str, &str)]) -> Option<Parameters> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_request_url_joins_path() {
        let cases = [
            ("https://api.example.com", "/data", "https://api.example.com/data"),
            ("https://api.example.com/", "data", "https://api.example.com/data"),
            ("https://api.example.com/v1", "data", "https://api.example.com/v1/data"),
            ("https://api.example.com/v1/", "/data", "https://api.example.com/v1/data"),
            ("https://api.example.com/v1", "", "https://api.example.com/v1"),
        ];

        for (base, path, expected) in cases {
            let url = endpoint(base, path).request_url().unwrap();
            assert_eq!(url.as_str(), expected, "base={base} path={path}");
        }
    }

    #[test]
    fn test_default_request() {
        let request = endpoint("https://api.example.com", "/data").request().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "https://api.example.com/data");
        assert_eq!(request.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_parameters_keep_order_and_encode() {
        let mut endpoint = endpoint("https://api.example.com", "/search");
        endpoint.parameters = params(&[("page", "1"), ("q", "rust & tokio")]);

        let request = endpoint.request().unwrap();
        assert_eq!(
            request.cache_key(),
            "https://api.example.com/search?page=1&q=rust+%26+tokio"
        );
    }

    #[test]
    fn test_parameters_append_to_existing_query() {
        let mut endpoint = endpoint("https://api.example.com/v1?key=abc", "forecast");
        endpoint.parameters = params(&[("days", "3")]);

        let request = endpoint.request().unwrap();
        assert_eq!(
            request.cache_key(),
            "https://api.example.com/v1/forecast?key=abc&days=3"
        );
    }

    #[test]
    fn test_parameter_order_changes_cache_key() {
        let mut first = endpoint("https://api.example.com", "/data");
        first.parameters = params(&[("a", "1"), ("b", "2")]);
        let mut second = endpoint("https://api.example.com", "/data");
        second.parameters = params(&[("b", "2"), ("a", "1")]);

        assert_ne!(
            first.request().unwrap().cache_key(),
            second.request().unwrap().cache_key()
        );
    }

    #[test]
    fn test_empty_parameters_leave_url_untouched() {
        let mut endpoint = endpoint("https://api.example.com", "/data");
        endpoint.parameters = Some(vec![]);

        let request = endpoint.request().unwrap();
        assert_eq!(request.cache_key(), "https://api.example.com/data");
    }

    #[test]
    fn test_invalid_base_url() {
        for base in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
            assert_eq!(
                endpoint(base, "/data").request().unwrap_err(),
                NetworkError::InvalidUrl,
                "base={base}"
            );
        }
    }

    #[test]
    fn test_custom_method_and_headers() {
        struct Upload;

        impl Endpoint for Upload {
            fn base_url(&self) -> &str {
                "https://api.example.com"
            }

            fn path(&self) -> &str {
                "/upload"
            }

            fn method(&self) -> Method {
                Method::POST
            }

            fn headers(&self) -> HeaderMap {
                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
                headers
            }
        }

        let request = Upload.request().unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer t");
        assert!(request.headers().get(ACCEPT).is_none());
    }
}
