//! # hrchat_core
//!
//! Client-side session and API access layer for the HR assistant chat.
//!
//! - [`session`] owns the JWT session token and everything derived from it
//!   (identity, authorization level, expiry).
//! - [`api`] is the single point of outbound HTTP traffic: timeout, retry with
//!   linear backoff, bearer-header injection and centralized 401 handling.
//! - [`host`] describes the environment the client runs in (page location,
//!   navigation).

pub mod api;
pub mod config;
pub mod host;
pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiError, ApiResponse, ApiResult, FailureKind, RequestOptions};
pub use config::ClientConfig;
pub use session::Session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
