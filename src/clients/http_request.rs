//! HTTP request types.
//!
//! A [`Resource`](crate::Resource) turns each verb call into an
//! [`HttpRequest`], which the [`HttpClient`](crate::clients::HttpClient)
//! then sends (and re-sends on transport failure).

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;
use serde::Serialize;

use crate::clients::errors::ApiError;

/// HTTP methods supported by resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
    /// HTTP HEAD method; the response never has a body to decode.
    Head,
    /// HTTP OPTIONS method.
    Options,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready to be sent.
///
/// The body is serialized once up front so every retry sends the same bytes.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL, including query string.
    pub url: Url,
    /// Serialized JSON body, if any.
    pub body: Option<Vec<u8>>,
    /// Additional headers to include in the request.
    pub extra_headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a request without a body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            extra_headers: BTreeMap::new(),
        }
    }

    /// Serializes `payload` as the JSON body of this request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the payload cannot be serialized.
    pub fn json_body<P: Serialize + ?Sized>(mut self, payload: &P) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        self.body = Some(body);
        Ok(self)
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }
}
