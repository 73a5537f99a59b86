//! Fellowship - a typed client for [The One API](https://the-one-api.dev).
//!
//! Requests are built from typed pieces: a [`Filter`] names a declared
//! model field, a [`FilterOperator`] and a value, and is validated when it
//! is constructed. A [`PageRequest`] adds pagination, and the resource
//! clients turn it into one authenticated GET.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use fellowship::{FellowshipClient, Filter, FilterOperator, PageRequest};
//! use fellowship::model::{Quote, QuoteField};
//!
//! # async fn example() -> Result<(), fellowship::FellowshipError> {
//! let client = FellowshipClient::from_env()?;
//!
//! let request = PageRequest::new()
//!     .limit(2)
//!     .page(2)
//!     .filter(Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("/ring/i"))?);
//!
//! for quote in client.quotes().get_all(&request).await? {
//!     println!("{}", quote.dialog);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and spans (request URL, status,
//! duration, item counts) but never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod query;
pub mod response;

pub use client::{FellowshipClient, MoviesClient, QuotesClient, ResourceFetcher};
pub use config::FellowshipConfig;
pub use error::{ApiError, FellowshipError, FilterError};
pub use filter::{Filter, FilterOperator};
pub use query::PageRequest;
pub use response::ApiResponse;

pub use tokio_util::sync::CancellationToken;
