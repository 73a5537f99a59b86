//! Layered error types for the Fellowship client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`FellowshipError`] - Top-level error type for all client operations
//! - [`FilterError`] - Filter construction errors (programmer errors)
//! - [`ApiError`] - Non-success HTTP responses from the API
//! - [`ClientError`] - HTTP client and network errors
//! - [`ValidationError`] - Response parsing errors
//! - [`ConfigError`] - Client configuration errors

mod api_error;
mod client_error;
mod config_error;
mod fellowship_error;
mod filter_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use fellowship_error::FellowshipError;
pub use filter_error::FilterError;
pub use validation_error::ValidationError;
