//! Backend access.
//!
//! [`Backend`] is the raw REST surface, [`ApiClient`] is what the views use:
//! it owns the session token cache and closes the expired-token gap by
//! refetching once when an answer submission is rejected.

mod backend;
mod client;
mod error;
mod http;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::Backend;
pub use client::ApiClient;
pub use error::ApiError;
pub use http::HttpBackend;
pub use session::{SessionTokenCache, SESSION_TOKEN_KEY};
