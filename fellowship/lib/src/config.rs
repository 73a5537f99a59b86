//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::client::ResourceFetcher;
use crate::error::{ConfigError, FellowshipError};

/// Base URL of the public API.
pub const DEFAULT_BASE_URL: &str = "https://the-one-api.dev/v2/";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ONE_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "ONE_API_BASE_URL";

/// Connection settings shared by every resource client.
#[derive(Clone, PartialEq, Eq)]
pub struct FellowshipConfig {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl FellowshipConfig {
    /// Configuration for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `ONE_API_KEY` (required): bearer token
    /// - `ONE_API_BASE_URL` (optional): alternative API root
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the key is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey { var: API_KEY_ENV })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }

        info!(base_url = %config.base_url, "Fellowship client configured from environment");
        Ok(config)
    }

    /// Set a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a transport-level request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the fetcher shared by the resource clients.
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL does not parse, the key is not a
    /// valid header value, or the HTTP client cannot be constructed.
    pub fn fetcher(&self) -> Result<ResourceFetcher, FellowshipError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;

        let mut builder = ResourceFetcher::builder(base_url).bearer_token(&self.api_key)?;
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl fmt::Debug for FellowshipConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FellowshipConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
