//! Client configuration.
//!
//! This module provides the read-only configuration shared by every
//! [`Resource`](crate::Resource) derived from an [`Api`](crate::Api):
//!
//! - [`ApiConfig`]: base URL, credentials, path suffix and retry settings
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: a validated absolute base URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use chained_rest::{ApiConfig, BasicAuth};
//!
//! let config = ApiConfig::builder("https://api.example.com")
//!     .basic_auth(BasicAuth::new("username", "password").unwrap())
//!     .path_suffix(".json")
//!     .retries(2)
//!     .retry_delay(Duration::from_millis(50))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retries(), 2);
//! assert_eq!(config.max_attempts(), 3);
//! ```

mod newtypes;

use std::time::Duration;

pub use newtypes::BaseUrl;

use crate::auth::BasicAuth;
use crate::error::ConfigError;

/// Default wait between two attempts of the same request.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Configuration for an [`Api`](crate::Api) client.
///
/// Created once and then shared read-only (behind an `Arc`) by every
/// resource derived from the client.
///
/// # Retry budget
///
/// `retries` counts re-attempts after the first try: a request is sent at
/// most `retries + 1` times. Zero disables retries.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    basic_auth: Option<BasicAuth>,
    path_suffix: Option<String>,
    retries: u32,
    retry_delay: Duration,
    timeout: Option<Duration>,
    retry_deadline: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for the given base URL.
    ///
    /// The URL is validated when [`ApiConfigBuilder::build`] is called.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ApiConfigBuilder {
        ApiConfigBuilder::new(base_url)
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the basic auth credentials, if configured.
    #[must_use]
    pub const fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// Returns the path suffix appended to the final path segment, if any.
    #[must_use]
    pub fn path_suffix(&self) -> Option<&str> {
        self.path_suffix.as_deref()
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the maximum number of times a request is sent.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Returns the delay between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the per-attempt timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the cumulative deadline across all attempts, if configured.
    #[must_use]
    pub const fn retry_deadline(&self) -> Option<Duration> {
        self.retry_deadline
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// # Defaults
///
/// - `basic_auth`: `None`
/// - `path_suffix`: `None`
/// - `retries`: `0`
/// - `retry_delay`: [`DEFAULT_RETRY_DELAY`]
/// - `timeout`: `None` (no per-attempt timeout)
/// - `retry_deadline`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug)]
pub struct ApiConfigBuilder {
    base_url: String,
    basic_auth: Option<BasicAuth>,
    path_suffix: Option<String>,
    retries: u32,
    retry_delay: Duration,
    timeout: Option<Duration>,
    retry_deadline: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            basic_auth: None,
            path_suffix: None,
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
            retry_deadline: None,
            user_agent_prefix: None,
        }
    }

    /// Sets basic auth credentials sent with every request.
    #[must_use]
    pub fn basic_auth(mut self, auth: BasicAuth) -> Self {
        self.basic_auth = Some(auth);
        self
    }

    /// Sets a suffix (e.g. `.json`) appended to the final path segment.
    ///
    /// An empty suffix is the same as no suffix.
    #[must_use]
    pub fn path_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.path_suffix = if suffix.is_empty() { None } else { Some(suffix) };
        self
    }

    /// Sets how many times a request is re-sent after a transport failure.
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the fixed delay between attempts.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the timeout of a single attempt.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bounds the total time spent across all attempts of one request.
    ///
    /// A running attempt times out when the deadline is reached, and no
    /// further attempt is started once it would be exceeded; the last
    /// transport error is returned.
    #[must_use]
    pub const fn retry_deadline(mut self, deadline: Duration) -> Self {
        self.retry_deadline = Some(deadline);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`], validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is invalid.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = BaseUrl::new(&self.base_url)?;

        Ok(ApiConfig {
            base_url,
            basic_auth: self.basic_auth,
            path_suffix: self.path_suffix,
            retries: self.retries,
            retry_delay: self.retry_delay,
            timeout: self.timeout,
            retry_deadline: self.retry_deadline,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ApiConfig::builder("https://test-url.com").build().unwrap();

        assert_eq!(config.base_url().as_str(), "https://test-url.com");
        assert!(config.basic_auth().is_none());
        assert!(config.path_suffix().is_none());
        assert_eq!(config.retries(), 0);
        assert_eq!(config.max_attempts(), 1);
        assert_eq!(config.retry_delay(), DEFAULT_RETRY_DELAY);
        assert!(config.timeout().is_none());
        assert!(config.retry_deadline().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ApiConfig::builder("not a url").build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ApiConfig::builder("https://test-url.com")
            .basic_auth(BasicAuth::new("username", "password").unwrap())
            .path_suffix(".json")
            .retries(2)
            .retry_delay(Duration::from_millis(10))
            .timeout(Duration::from_secs(5))
            .retry_deadline(Duration::from_secs(20))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let auth = config.basic_auth().unwrap();
        assert_eq!(auth.username(), "username");
        assert_eq!(auth.password(), "password");
        assert_eq!(config.path_suffix(), Some(".json"));
        assert_eq!(config.retries(), 2);
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.retry_delay(), Duration::from_millis(10));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.retry_deadline(), Some(Duration::from_secs(20)));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_empty_path_suffix_is_ignored() {
        let config = ApiConfig::builder("https://test-url.com")
            .path_suffix("")
            .build()
            .unwrap();
        assert!(config.path_suffix().is_none());
    }

    #[test]
    fn test_max_attempts_saturates() {
        let config = ApiConfig::builder("https://test-url.com")
            .retries(u32::MAX)
            .build()
            .unwrap();
        assert_eq!(config.max_attempts(), u32::MAX);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiConfig>();
    }
}
