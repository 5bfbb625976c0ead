//! Errors from backend calls.
//!
//! Only one kind of failure matters to the views (the call did not succeed),
//! but the variants keep enough detail for logs and for spotting an expired
//! session token.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status.
    #[error("{path} returned HTTP {status}")]
    Status { status: StatusCode, path: String },

    /// No response within the configured timeout.
    #[error("{path} timed out")]
    Timeout { path: String },

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("malformed response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    /// Build an error from a reqwest failure on `path`.
    pub fn from_reqwest(path: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                path: path.to_string(),
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                status,
                path: path.to_string(),
            }
        } else {
            Self::Transport(err)
        }
    }

    /// True for 401/403, which mean the cached session token is stale.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}
