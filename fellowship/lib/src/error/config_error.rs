use thiserror::Error;

/// Client configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} must be set to a non-empty API key")]
    MissingApiKey { var: &'static str },

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
