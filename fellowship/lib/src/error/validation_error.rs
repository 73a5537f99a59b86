use thiserror::Error;

/// Errors raised while parsing a success response.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The body of a 2xx response was not a valid page envelope.
    #[error("failed to parse JSON response: {0}")]
    JsonParse(#[from] serde_json::Error),
}
