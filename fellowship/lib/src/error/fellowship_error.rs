use thiserror::Error;

use super::{ApiError, ClientError, ConfigError, FilterError, ValidationError};

/// Top-level error type for all client operations.
#[derive(Debug, Error)]
pub enum FellowshipError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The caller's cancellation token fired before the response completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl FellowshipError {
    /// Returns `true` if the call ended because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code for API errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status_code),
            _ => None,
        }
    }
}
