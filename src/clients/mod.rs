//! HTTP transport layer.
//!
//! This module turns resolved requests into responses:
//!
//! - [`HttpClient`]: sends requests with default headers, credentials and
//!   transport retries
//! - [`HttpRequest`] / [`HttpMethod`]: a resolved request
//! - [`ApiResponse`]: a response with its raw body and the decoding policy
//! - [`RetryPolicy`]: the bounded retry budget
//! - [`ApiError`]: errors of a verb call
//!
//! # Retry Behavior
//!
//! The retry budget counts re-attempts: with `retries(2)` a request is sent
//! at most three times. Only transport failures (connection refused,
//! timeout, reset) are retried, with a fixed delay between attempts. Any
//! HTTP status, including 5xx, ends the request. When every attempt fails
//! the error of the last attempt is returned.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;

pub use errors::ApiError;
pub use http_client::{HttpClient, CRATE_VERSION};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::{ApiResponse, TOTAL_RETRIES_HEADER};
pub use retry::{is_transport_failure, RetryPolicy};
