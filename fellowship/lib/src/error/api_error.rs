use thiserror::Error;

/// A non-success HTTP response returned by the API.
///
/// `message` is the raw response body, used verbatim (empty when the
/// server sent no body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API Error {status_code}: {message}")]
pub struct ApiError {
    /// HTTP status code
    pub status_code: u16,
    /// Response body as text
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}
