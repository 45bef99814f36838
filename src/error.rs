//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid base URL or credential is rejected when the client is built,
//! not when the first request is sent.
//!
//! # Example
//!
//! ```rust
//! use chained_rest::{Api, ConfigError};
//!
//! let result = Api::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring an [`Api`](crate::Api).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("Invalid base URL '{url}': {reason}. Expected an absolute URL such as 'https://api.example.com'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// Basic auth was configured with an empty username.
    #[error("Basic auth username cannot be empty.")]
    EmptyUsername,

    /// The underlying HTTP client could not be created.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild {
        /// The reason reported by the HTTP stack.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_message_includes_url() {
        let error = ConfigError::InvalidBaseUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("relative URL without a base"));
    }

    #[test]
    fn test_empty_username_message() {
        assert_eq!(
            ConfigError::EmptyUsername.to_string(),
            "Basic auth username cannot be empty."
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyUsername;
        let _: &dyn std::error::Error = &error;
    }
}
