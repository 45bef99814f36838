//! HTTP response type and the response decoding policy.
//!
//! [`ApiResponse`] keeps the raw body bytes so they stay readable no matter
//! whether the body was decoded. [`ApiResponse::decode_into`] applies the
//! decoding policy:
//!
//! | Response                     | Target               | Result        |
//! |------------------------------|----------------------|---------------|
//! | status >= 400                | untouched            | `Ok`          |
//! | 204 or empty body            | untouched            | `Ok`          |
//! | other, valid JSON            | replaced             | `Ok`          |
//! | other, invalid JSON          | untouched            | `Err(Decode)` |

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::ApiError;

/// Response header carrying the number of retries spent on a request.
pub const TOTAL_RETRIES_HEADER: &str = "x-total-retries";

/// An HTTP response returned by a verb call.
///
/// Any status code, including 4xx and 5xx, produces an `ApiResponse`.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: Vec<u8>,
    total_retries: u32,
}

impl ApiResponse {
    /// Creates a response from its parts.
    ///
    /// Header names are expected in lowercase.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            total_retries: 0,
        }
    }

    /// Records how many retries were needed and mirrors the count into the
    /// `X-Total-Retries` header.
    pub(crate) fn set_total_retries(&mut self, retries: u32) {
        self.total_retries = retries;
        self.headers
            .insert(TOTAL_RETRIES_HEADER.to_string(), vec![retries.to_string()]);
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns `true` for 4xx and 5xx status codes.
    #[must_use]
    pub const fn is_error_status(&self) -> bool {
        self.status >= 400
    }

    /// Returns all response headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the first value of a header (case-insensitive lookup).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consumes the response and returns the body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Returns how many retries were spent before this response arrived.
    #[must_use]
    pub const fn total_retries(&self) -> u32 {
        self.total_retries
    }

    /// Returns `true` if the body should be decoded into a target.
    ///
    /// Error statuses, 204 No Content and empty bodies are never decoded.
    #[must_use]
    pub fn should_decode(&self) -> bool {
        !self.is_error_status()
            && self.status != 204
            && !self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decodes the body into `target` if [`should_decode`](Self::should_decode)
    /// allows it, and hands the response back.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] carrying this response if the body is not
    /// valid JSON for `T`. The target is left untouched in that case.
    pub fn decode_into<T: DeserializeOwned>(self, target: &mut T) -> Result<Self, ApiError> {
        if !self.should_decode() {
            tracing::debug!(status = self.status, "Skipping response body decoding");
            return Ok(self);
        }

        let decoded: Result<T, _> = serde_json::from_slice(&self.body);
        match decoded {
            Ok(decoded) => {
                *target = decoded;
                Ok(self)
            }
            Err(source) => Err(ApiError::Decode {
                source,
                response: Box::new(self),
            }),
        }
    }

    /// Collects reqwest headers into a map of lowercase names to values.
    pub(crate) fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
