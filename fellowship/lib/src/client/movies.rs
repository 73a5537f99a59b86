use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::ResourceFetcher;
use crate::error::FellowshipError;
use crate::model::{Movie, Quote};
use crate::query::{resource_segment, PageRequest};
use crate::response::ApiResponse;

const MOVIE_PATH: &str = "movie";

/// Client for the `/movie` resource.
#[derive(Debug, Clone)]
pub struct MoviesClient {
    fetcher: ResourceFetcher,
}

impl MoviesClient {
    pub fn new(fetcher: ResourceFetcher) -> Self {
        debug!(base_url = %fetcher.base_url(), "MoviesClient initialized");
        Self { fetcher }
    }

    /// Returns a client whose calls are aborted when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            fetcher: self.fetcher.with_cancellation(token),
        }
    }

    /// Lists movies matching `request`, discarding pagination metadata.
    #[instrument(skip(self, request), fields(limit = ?request.limit_value(), page = ?request.page_value()))]
    pub async fn get_all(&self, request: &PageRequest<Movie>) -> Result<Vec<Movie>, FellowshipError> {
        info!("Getting all movies");
        let movies = self.fetcher.fetch(MOVIE_PATH, request).await?.into_docs();
        info!(count = movies.len(), "Retrieved movies");
        Ok(movies)
    }

    /// Like [`get_all`](Self::get_all), but keeps the page envelope.
    pub async fn get_all_page(&self, request: &PageRequest<Movie>) -> Result<ApiResponse<Movie>, FellowshipError> {
        self.fetcher.fetch(MOVIE_PATH, request).await
    }

    /// Looks up one movie. An empty result is `Ok(None)`, not an error.
    ///
    /// Ids that cannot form one path segment (empty, `.`, `..`) fail with
    /// [`ClientError::InvalidId`](crate::error::ClientError::InvalidId)
    /// before any request is sent.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Movie>, FellowshipError> {
        info!("Getting movie by ID");
        let path = format!("{MOVIE_PATH}/{}", resource_segment(id)?);
        let movie = self.fetcher.fetch::<Movie>(&path, &PageRequest::new()).await?.into_first();

        match &movie {
            Some(found) => debug!(name = %found.name, "Found movie"),
            None => warn!("Movie not found"),
        }
        Ok(movie)
    }

    /// Lists the quotes from one movie. Filters on `request` are applied.
    #[instrument(skip(self, request), fields(limit = ?request.limit_value(), page = ?request.page_value()))]
    pub async fn get_quotes(
        &self,
        movie_id: &str,
        request: &PageRequest<Quote>,
    ) -> Result<Vec<Quote>, FellowshipError> {
        info!("Getting quotes for movie");
        let path = format!("{MOVIE_PATH}/{}/quote", resource_segment(movie_id)?);
        let quotes = self.fetcher.fetch(&path, request).await?.into_docs();
        info!(count = quotes.len(), "Retrieved quotes for movie");
        Ok(quotes)
    }
}
