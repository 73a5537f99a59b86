use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::ResourceFetcher;
use crate::error::FellowshipError;
use crate::model::Quote;
use crate::query::{resource_segment, PageRequest};
use crate::response::ApiResponse;

const QUOTE_PATH: &str = "quote";

/// Client for the `/quote` resource.
#[derive(Debug, Clone)]
pub struct QuotesClient {
    fetcher: ResourceFetcher,
}

impl QuotesClient {
    pub fn new(fetcher: ResourceFetcher) -> Self {
        debug!(base_url = %fetcher.base_url(), "QuotesClient initialized");
        Self { fetcher }
    }

    /// Returns a client whose calls are aborted when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            fetcher: self.fetcher.with_cancellation(token),
        }
    }

    #[instrument(skip(self, request), fields(limit = ?request.limit_value(), page = ?request.page_value()))]
    pub async fn get_all(&self, request: &PageRequest<Quote>) -> Result<Vec<Quote>, FellowshipError> {
        info!("Getting all quotes");
        let quotes = self.fetcher.fetch(QUOTE_PATH, request).await?.into_docs();
        info!(count = quotes.len(), "Retrieved quotes");
        Ok(quotes)
    }

    pub async fn get_all_page(&self, request: &PageRequest<Quote>) -> Result<ApiResponse<Quote>, FellowshipError> {
        self.fetcher.fetch(QUOTE_PATH, request).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Quote>, FellowshipError> {
        info!("Getting quote by ID");
        let path = format!("{QUOTE_PATH}/{}", resource_segment(id)?);
        let quote = self.fetcher.fetch::<Quote>(&path, &PageRequest::new()).await?.into_first();

        match &quote {
            Some(found) => debug!(dialog = %found.dialog, "Found quote"),
            None => warn!("Quote not found"),
        }
        Ok(quote)
    }
}
