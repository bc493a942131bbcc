//! Network round-trip behind the fetch pipeline.
//!
//! The pipeline only needs bytes and a status code back. [`ReqwestTransport`]
//! is the default; tests and alternative stacks plug in their own
//! [`Transport`].
use crate::Request;
use async_trait::async_trait;
use bytes::Bytes;
use netcache_config::{HttpClientParams, build_http_client};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Raw outcome of a round-trip.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code, absent when the transport could not read one
    pub status: Option<u16>,
    pub body: Bytes,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("The request timed out: {0}")]
    Timeout(String),

    #[error("Could not connect to the server: {0}")]
    Connect(String),

    #[error("Response is not an HTTP response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &Request,
    ) -> Result<TransportResponse, TransportError>;
}

pub type AbstractTransport = Arc<dyn Transport + Send + Sync>;

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_params(params: &HttpClientParams) -> Result<Self, TransportError> {
        Ok(Self::new(build_http_client(params)?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    async fn execute(
        &self,
        request: &Request,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, size = body.len(), "Received response");

        Ok(TransportResponse {
            status: Some(status),
            body,
        })
    }
}
