//! HTTP client with transport-level retries.
//!
//! This module provides the [`HttpClient`] type that sends resolved
//! [`HttpRequest`]s, injecting default headers and credentials, and
//! re-sending a request when the round trip fails.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::clients::errors::ApiError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::ApiResponse;
use crate::clients::retry::{self, RetryPolicy};
use crate::config::ApiConfig;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client shared by every resource of an [`Api`](crate::Api).
///
/// The client handles:
/// - Default headers including `User-Agent` and `Accept`, which extra
///   headers of the request replace
/// - Basic auth injection when credentials are configured and the request
///   carries no `Authorization` header of its own
/// - Per-attempt timeout, capped by what is left of the retry deadline
/// - Sequential retries on transport failure, bounded by the retry budget
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; it holds only read-only state.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    config: ApiConfig,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client with its own rustls-backed `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::HttpClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self::with_client(config, client))
    }

    /// Creates a client that sends requests through a caller-built
    /// `reqwest::Client`.
    #[must_use]
    pub fn with_client(config: ApiConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}chained-rest v{CRATE_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            config,
            default_headers,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request, retrying on transport failure.
    ///
    /// The request is sent at most `retries + 1` times, one attempt after
    /// the other. Any HTTP status ends the loop; the returned response
    /// reports how many retries were spent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] with the error of the last attempt
    /// once the budget (or the cumulative deadline) is exhausted, and
    /// [`ApiError::InvalidHeader`] if an extra header is not valid HTTP.
    pub async fn request(&self, request: &HttpRequest) -> Result<ApiResponse, ApiError> {
        let headers = self.request_headers(request)?;
        let policy = RetryPolicy::from_config(&self.config);
        let started = Instant::now();
        let mut retries: u32 = 0;

        loop {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt = retries + 1,
                "Sending request"
            );

            let timeout = policy.attempt_timeout(started.elapsed());
            let error = match self.attempt(request, &headers, timeout).await {
                Ok(mut response) => {
                    response.set_total_retries(retries);
                    tracing::debug!(
                        status = response.status(),
                        retries,
                        "Received response"
                    );
                    return Ok(response);
                }
                Err(e) => e,
            };

            if !retry::is_transport_failure(&error) {
                return Err(ApiError::Transport(error));
            }

            let Some(delay) = policy.delay_before_retry(retries, started.elapsed()) else {
                if policy.retries > 0 {
                    tracing::warn!(
                        url = %request.url,
                        attempts = retries + 1,
                        "Retries exhausted: {error}"
                    );
                }
                return Err(ApiError::Transport(error));
            };

            retries += 1;
            tracing::warn!(
                url = %request.url,
                retry = retries,
                of = policy.retries,
                "Transport failure, retrying in {delay:?}: {error}"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Merges the headers of one request.
    ///
    /// Extra headers replace defaults of the same name (case-insensitive);
    /// configured credentials are added only when no `Authorization` header
    /// is set.
    fn request_headers(&self, request: &HttpRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        let defaults = self.default_headers.iter();
        let content_type = request
            .body
            .as_ref()
            .map(|_| ("content-type", "application/json"));
        let defaults = defaults
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .chain(content_type);

        let extra = request
            .extra_headers
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));

        for (key, value) in defaults.chain(extra) {
            let name = HeaderName::from_bytes(key.as_bytes());
            let value = HeaderValue::from_str(value);
            let (Ok(name), Ok(value)) = (name, value) else {
                return Err(ApiError::InvalidHeader {
                    name: key.to_string(),
                });
            };
            headers.insert(name, value);
        }

        if let Some(auth) = self.config.basic_auth() {
            auth.authorize(&mut headers);
        }

        Ok(headers)
    }

    /// Performs a single round trip, reading the whole body.
    async fn attempt(
        &self,
        request: &HttpRequest,
        headers: &HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<ApiResponse, reqwest::Error> {
        let mut req_builder = self
            .client
            .request(request.method.to_reqwest(), request.url.clone())
            .headers(headers.clone());

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        if let Some(timeout) = timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let headers = ApiResponse::parse_headers(res.headers());
        let body = res.bytes().await?;

        Ok(ApiResponse::new(status, headers, body.to_vec()))
    }
}
