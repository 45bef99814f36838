//! Error types for request execution.
//!
//! [`ApiError`] separates the ways a verb call can fail:
//!
//! - [`ApiError::Transport`]: the HTTP round trip did not complete
//!   (connection refused, timeout, reset). Retried within the budget.
//! - [`ApiError::Decode`]: a 2xx response carried a body that is not valid
//!   JSON for the target. Never retried; the response is kept.
//! - [`ApiError::Encode`]: the request payload could not be serialized.
//! - [`ApiError::InvalidHeader`]: an extra header was rejected.
//!
//! An HTTP error status (4xx/5xx) is **not** an error: it arrives as an
//! `Ok(ApiResponse)` whose status the caller inspects.
//!
//! # Example
//!
//! ```rust,ignore
//! use chained_rest::{Api, ApiError};
//!
//! match api.res("users").id(1).get_into(None, &mut user).await {
//!     Ok(response) if response.is_success() => println!("got {user:?}"),
//!     Ok(response) => println!("server said {}", response.status()),
//!     Err(ApiError::Decode { response, .. }) => println!("bad body: {}", response.text()),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_response::ApiResponse;

/// Unified error type for verb calls on a [`Resource`](crate::Resource).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP round trip failed. When retries are configured this is the
    /// error of the last attempt.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the target.
    #[error("Failed to decode response body (status {}): {source}", .response.status())]
    Decode {
        /// The JSON error.
        #[source]
        source: serde_json::Error,
        /// The response whose body failed to decode.
        response: Box<ApiResponse>,
    },

    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

impl ApiError {
    /// Returns `true` if the round trip itself failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the response attached to a decode error.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}
