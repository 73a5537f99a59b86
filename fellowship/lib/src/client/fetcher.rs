//! Single-page resource fetches with tracing instrumentation.
//!
//! This module provides the [`ResourceFetcher`], which turns a resource
//! path and a [`PageRequest`] into one authenticated GET request and maps
//! the outcome to an [`ApiResponse`] or a [`FellowshipError`].

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn, Span};
use url::Url;

use crate::error::{ApiError, ClientError, FellowshipError, ValidationError};
use crate::model::Model;
use crate::query::PageRequest;
use crate::response::ApiResponse;

/// Builder for configuring a [`ResourceFetcher`].
#[derive(Debug)]
pub struct ResourceFetcherBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl ResourceFetcherBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets a transport-level timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sends `Authorization: Bearer <api_key>` with every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the key contains characters not allowed in a
    /// header value.
    pub fn bearer_token(mut self, api_key: &str) -> Result<Self, FellowshipError> {
        let mut value = HeaderValue::try_from(format!("Bearer {api_key}"))
            .map_err(|e| ClientError::InvalidHeader(format!("authorization: {e}")))?;
        value.set_sensitive(true);
        self.default_headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, FellowshipError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ClientError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ClientError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`ResourceFetcher`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ResourceFetcher, FellowshipError> {
        let mut builder = reqwest::Client::builder().default_headers(self.default_headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Request)?;

        Ok(ResourceFetcher {
            client,
            base_url: with_trailing_slash(self.base_url),
            cancel: None,
        })
    }
}

/// Issues authenticated GET requests against one API base URL.
///
/// Cloning is cheap and clones share the underlying connection pool. The
/// base URL and headers are fixed at construction.
///
/// ## Examples
///
/// ```rust,ignore
/// use fellowship::{PageRequest, ResourceFetcher};
/// use fellowship::model::Movie;
/// use url::Url;
///
/// let fetcher = ResourceFetcher::new(Url::parse("https://the-one-api.dev/v2/")?, "api-key")?;
/// let page = fetcher.fetch::<Movie>("movie", &PageRequest::new().limit(5)).await?;
/// println!("{} of {} movies", page.docs.len(), page.total);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    client: reqwest::Client,
    base_url: Url,
    cancel: Option<CancellationToken>,
}

impl ResourceFetcher {
    /// Creates a new builder for configuring a fetcher.
    pub fn builder(base_url: Url) -> ResourceFetcherBuilder {
        ResourceFetcherBuilder::new(base_url)
    }

    /// Creates a fetcher that authenticates with a bearer token.
    ///
    /// ## Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: Url, api_key: &str) -> Result<Self, FellowshipError> {
        Self::builder(base_url).bearer_token(api_key)?.build()
    }

    /// Returns the base URL for this fetcher.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a fetcher whose calls end with [`FellowshipError::Cancelled`]
    /// once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Fetches one page of `T` from `path` (relative to the base URL).
    ///
    /// ## Errors
    ///
    /// - [`FellowshipError::Api`] for any non-2xx status, carrying the raw body
    /// - [`FellowshipError::Validation`] if a 2xx body is not a page envelope
    /// - [`FellowshipError::Client`] for transport failures
    /// - [`FellowshipError::Cancelled`] if the cancellation token fires first
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            http.method = "GET",
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn fetch<T: Model>(
        &self,
        path: &str,
        request: &PageRequest<T>,
    ) -> Result<ApiResponse<T>, FellowshipError> {
        let path_and_query = request.path_and_query(path);
        let url = self
            .base_url
            .join(&path_and_query)
            .map_err(|e| ClientError::InvalidUrl(format!("{path_and_query}: {e}")))?;

        Span::current().record("http.url", url.as_str());
        debug!(url = %url, "Making HTTP request");

        let Some(token) = &self.cancel else {
            return self.exchange(url).await;
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Request cancelled before completion");
                Err(FellowshipError::Cancelled)
            }
            result = self.exchange(url) => result,
        }
    }

    async fn exchange<T: Model>(&self, url: Url) -> Result<ApiResponse<T>, FellowshipError> {
        let start = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            ClientError::Request(e)
        })?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);
        debug!(
            duration_ms = millis(start.elapsed()),
            http.status_code = status_code,
            "HTTP request completed"
        );

        if !status.is_success() {
            let message = response.text().await.map_err(ClientError::Request)?;

            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            error!(http.status_code = status_code, %message, "API request failed");

            return Err(ApiError::new(status_code, message).into());
        }

        Span::current().record("otel.status_code", "OK");

        let body = response.bytes().await.map_err(ClientError::Request)?;
        let page = ApiResponse::<T>::from_json(&body).map_err(|e| {
            error!(error = %e, "Failed to deserialize response");
            ValidationError::JsonParse(e)
        })?;

        debug!(item_count = page.docs.len(), "Successfully deserialized items");
        Ok(page)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Relative paths only join below the base when it ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
