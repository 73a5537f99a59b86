use thiserror::Error;

/// HTTP client and transport errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request URL could not be built from the base URL and path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A resource id that cannot be addressed as one path segment.
    #[error("invalid resource id: {0:?}")]
    InvalidId(String),

    /// A header name or value was rejected.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}
