use tokio_util::sync::CancellationToken;

use super::{MoviesClient, QuotesClient};
use crate::config::FellowshipConfig;
use crate::error::FellowshipError;

/// Entry point bundling every resource client.
///
/// Both clients share one HTTP connection pool.
///
/// ## Examples
///
/// ```rust,no_run
/// use fellowship::{FellowshipClient, Filter, FilterOperator, PageRequest};
/// use fellowship::model::{Movie, MovieField};
///
/// # async fn example() -> Result<(), fellowship::FellowshipError> {
/// let client = FellowshipClient::new("YOUR_API_KEY")?;
///
/// let long_movies = client
///     .movies()
///     .get_all(&PageRequest::new().filter(Filter::<Movie>::new(
///         MovieField::RuntimeInMinutes,
///         FilterOperator::GreaterThanOrEqual,
///         Some("160"),
///     )?))
///     .await?;
/// println!("Found {} long movies", long_movies.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FellowshipClient {
    movies: MoviesClient,
    quotes: QuotesClient,
}

impl FellowshipClient {
    /// Client for the public API authenticated with `api_key`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FellowshipError> {
        Self::from_config(&FellowshipConfig::new(api_key))
    }

    /// Client built from an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &FellowshipConfig) -> Result<Self, FellowshipError> {
        let fetcher = config.fetcher()?;
        Ok(Self {
            movies: MoviesClient::new(fetcher.clone()),
            quotes: QuotesClient::new(fetcher),
        })
    }

    /// Client configured from `ONE_API_KEY` / `ONE_API_BASE_URL`.
    ///
    /// ## Errors
    ///
    /// Returns an error if `ONE_API_KEY` is not set.
    pub fn from_env() -> Result<Self, FellowshipError> {
        Self::from_config(&FellowshipConfig::from_env()?)
    }

    pub fn movies(&self) -> &MoviesClient {
        &self.movies
    }

    pub fn quotes(&self) -> &QuotesClient {
        &self.quotes
    }

    /// Returns a client whose calls are aborted when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            movies: self.movies.with_cancellation(token.clone()),
            quotes: self.quotes.with_cancellation(token),
        }
    }
}
