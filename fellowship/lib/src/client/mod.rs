//! HTTP clients for The One API.
//!
//! [`ResourceFetcher`] performs the request/response round trip;
//! [`MoviesClient`] and [`QuotesClient`] bind it to resource paths, and
//! [`FellowshipClient`] bundles both over one connection pool.

mod fellowship;
mod fetcher;
mod movies;
mod quotes;

pub use fellowship::FellowshipClient;
pub use fetcher::{ResourceFetcher, ResourceFetcherBuilder};
pub use movies::MoviesClient;
pub use quotes::QuotesClient;
