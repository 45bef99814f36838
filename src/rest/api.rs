//! The client entry point.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::BasicAuth;
use crate::clients::HttpClient;
use crate::config::{ApiConfig, ApiConfigBuilder};
use crate::error::ConfigError;
use crate::rest::path::ResourceId;
use crate::rest::resource::Resource;

/// A REST API client rooted at a base URL.
///
/// `Api` is cheap to clone: clones share one read-only configuration and one
/// connection pool. Every [`Resource`] derived from it holds such a clone.
///
/// # Example
///
/// ```rust,ignore
/// use chained_rest::{Api, BasicAuth};
///
/// let api = Api::builder("https://api.github.com")
///     .basic_auth(BasicAuth::new("username", "token")?)
///     .retries(2)
///     .build()?;
///
/// let mut user = serde_json::Value::Null;
/// let response = api.res("users").id("bndr").get_into(None, &mut user).await?;
/// if response.is_success() {
///     println!("{}", user["login"]);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Api {
    client: Arc<HttpClient>,
}

// Verify Api is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Api>();
};

impl Api {
    /// Creates a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(ApiConfig::builder(base_url).build()?)
    }

    /// Creates a builder for a client rooted at `base_url`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use chained_rest::Api;
    ///
    /// let api = Api::builder("https://api.example.com")
    ///     .path_suffix(".json")
    ///     .retries(2)
    ///     .timeout(Duration::from_secs(5))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(api.config().max_attempts(), 3);
    /// ```
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ApiBuilder {
        ApiBuilder {
            config: ApiConfig::builder(base_url),
            http_client: None,
        }
    }

    /// Creates a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP stack cannot be
    /// initialized.
    pub fn from_config(config: ApiConfig) -> Result<Self, ConfigError> {
        tracing::debug!(base_url = %config.base_url(), retries = config.retries(), "Creating API client");
        Ok(Self {
            client: Arc::new(HttpClient::new(config)?),
        })
    }

    /// Creates a client that sends requests through a caller-built
    /// `reqwest::Client` (custom proxies, certificates, pools).
    ///
    /// The per-attempt timeout from `config` still applies.
    #[must_use]
    pub fn with_http_client(config: ApiConfig, client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(HttpClient::with_client(config, client)),
        }
    }

    /// Returns the shared configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        self.client.config()
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the root resource; requests go to the base URL itself.
    #[must_use]
    pub fn root(&self) -> Resource {
        Resource::root(self.clone())
    }

    /// Returns the resource for a top-level collection.
    #[must_use]
    pub fn res(&self, name: &str) -> Resource {
        self.root().res(name)
    }

    /// Returns the resource for a top-level identifier.
    #[must_use]
    pub fn id(&self, id: impl Into<ResourceId>) -> Resource {
        self.root().id(id)
    }
}

/// Builder for [`Api`] clients.
///
/// Takes the options of [`ApiConfigBuilder`] plus an optional caller-built
/// `reqwest::Client`.
#[derive(Debug)]
pub struct ApiBuilder {
    config: ApiConfigBuilder,
    http_client: Option<reqwest::Client>,
}

impl ApiBuilder {
    /// Sets basic auth credentials sent with every request.
    #[must_use]
    pub fn basic_auth(mut self, auth: BasicAuth) -> Self {
        self.config = self.config.basic_auth(auth);
        self
    }

    /// Sets a suffix (e.g. `.json`) appended to the final path segment.
    #[must_use]
    pub fn path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config = self.config.path_suffix(suffix);
        self
    }

    /// Sets how many times a request is re-sent after a transport failure.
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.config = self.config.retries(retries);
        self
    }

    /// Sets the fixed delay between attempts.
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.retry_delay(delay);
        self
    }

    /// Sets the timeout of a single attempt.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Bounds the total time spent across all attempts of one request.
    #[must_use]
    pub fn retry_deadline(mut self, deadline: Duration) -> Self {
        self.config = self.config.retry_deadline(deadline);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.user_agent_prefix(prefix);
        self
    }

    /// Sends requests through a caller-built `reqwest::Client`.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is invalid,
    /// or [`ConfigError::HttpClientBuild`] if no client was supplied and the
    /// default one cannot be initialized.
    pub fn build(self) -> Result<Api, ConfigError> {
        let config = self.config.build()?;
        match self.http_client {
            Some(client) => Ok(Api::with_http_client(config, client)),
            None => Api::from_config(config),
        }
    }
}
