use thiserror::Error;

const STATUS_CODE_DETAIL: &str = "Request failed with status code: ";

/// Every failure the fetch pipeline can report.
///
/// The set is closed: transport, codec and cache errors are mapped into one
/// of these kinds before they reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid response")]
    InvalidResponse,

    #[error("Decoding failed")]
    DecodingFailed,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("No network connection")]
    NoNetworkConnection,
}

impl NetworkError {
    /// `RequestFailed` for a response whose status is missing or not 2xx.
    /// A missing status is reported as `-1`.
    pub fn unexpected_status(status: Option<u16>) -> Self {
        let code = status.map_or(-1, i32::from);
        Self::RequestFailed(format!("{STATUS_CODE_DETAIL}{code}"))
    }

    /// Status code carried by a status-gated `RequestFailed`, if any.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            Self::RequestFailed(detail) => {
                detail.strip_prefix(STATUS_CODE_DETAIL)?.parse().ok()
            }
            _ => None,
        }
    }
}
