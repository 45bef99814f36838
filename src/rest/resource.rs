//! Chainable REST resources.
//!
//! A [`Resource`] is an immutable node in a URL path tree. Chaining
//! ([`res`](Resource::res), [`id`](Resource::id)) returns a new node that
//! shares the client of its parent; the parent is never modified, so one
//! node can safely fan out into many requests or be used from several
//! tasks at once.
//!
//! Verb methods come in two flavours:
//!
//! - `get`, `post`, `put`, `patch`, `delete`, `head`, `options` return the
//!   [`ApiResponse`] without decoding;
//! - `get_into`, `post_into`, `put_into`, `patch_into`, `delete_into` also
//!   decode the body into a caller-supplied target, following the policy of
//!   [`ApiResponse::decode_into`].

use std::collections::BTreeMap;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{ApiError, ApiResponse, HttpMethod, HttpRequest};
use crate::rest::api::Api;
use crate::rest::path::{build_url, join_segment, Query, ResourceId};

/// A node in a REST URL path tree.
///
/// # Example
///
/// ```rust
/// use chained_rest::Api;
///
/// let api = Api::new("https://api.example.com").unwrap();
/// let items = api.res("users").id(123).res("items");
///
/// assert_eq!(items.url(), "users/123/items");
/// assert_eq!(items.id(111).url(), "users/123/items/111");
/// // The parent is unchanged
/// assert_eq!(items.url(), "users/123/items");
/// ```
#[derive(Clone, Debug)]
pub struct Resource {
    api: Api,
    path: String,
    query: Query,
    headers: BTreeMap<String, String>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

impl Resource {
    pub(crate) fn root(api: Api) -> Self {
        Self {
            api,
            path: String::new(),
            query: Query::new(),
            headers: BTreeMap::new(),
        }
    }

    fn child(&self, segment: &str) -> Self {
        Self {
            api: self.api.clone(),
            path: join_segment(&self.path, segment),
            query: self.query.clone(),
            headers: self.headers.clone(),
        }
    }

    /// Returns a child resource for a collection name.
    #[must_use]
    pub fn res(&self, name: &str) -> Self {
        self.child(name)
    }

    /// Returns a child resource for one identifier.
    #[must_use]
    pub fn id(&self, id: impl Into<ResourceId>) -> Self {
        self.child(&id.into().to_string())
    }

    /// Returns a copy of this resource with a preset query parameter.
    ///
    /// Preset parameters are inherited by children and merged with the
    /// parameters of each verb call; call-time values win.
    #[must_use]
    pub fn with_query(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.insert(key.into(), value.into());
        next
    }

    /// Returns a copy of this resource that sends an extra header.
    ///
    /// Headers are inherited by children.
    #[must_use]
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.headers.insert(name.into(), value.into());
        next
    }

    /// Returns the accumulated path relative to the base URL.
    ///
    /// The root resource has an empty path.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.path
    }

    /// Returns the preset query parameters.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the extra headers of this resource.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the client this resource belongs to.
    #[must_use]
    pub const fn api(&self) -> &Api {
        &self.api
    }

    /// Resolves the absolute URL a request would be sent to.
    #[must_use]
    pub fn request_url(&self, query: Option<&Query>) -> Url {
        let config = self.api.config();
        let mut merged = self.query.clone();
        if let Some(query) = query {
            merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        build_url(config.base_url(), &self.path, config.path_suffix(), &merged)
    }

    fn request(&self, method: HttpMethod, query: Option<&Query>) -> HttpRequest {
        HttpRequest::new(method, self.request_url(query)).extra_headers(self.headers.clone())
    }

    async fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        self.api.http_client().request(&request).await
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if every attempt failed. An HTTP error
    /// status is returned as `Ok`.
    pub async fn get(&self, query: Option<&Query>) -> Result<ApiResponse, ApiError> {
        self.send(self.request(HttpMethod::Get, query)).await
    }

    /// Sends a GET request and decodes the body into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if every attempt failed, or
    /// [`ApiError::Decode`] if a 2xx body is not valid JSON for `T`.
    pub async fn get_into<T: DeserializeOwned>(
        &self,
        query: Option<&Query>,
        target: &mut T,
    ) -> Result<ApiResponse, ApiError> {
        self.get(query).await?.decode_into(target)
    }

    /// Sends a POST request with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the payload cannot be serialized, or
    /// [`ApiError::Transport`] if every attempt failed.
    pub async fn post<P: Serialize + ?Sized>(&self, payload: &P) -> Result<ApiResponse, ApiError> {
        let request = self.request(HttpMethod::Post, None).json_body(payload)?;
        self.send(request).await
    }

    /// Sends a POST request and decodes the body into `target`.
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post); additionally [`ApiError::Decode`].
    pub async fn post_into<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        payload: &P,
        target: &mut T,
    ) -> Result<ApiResponse, ApiError> {
        self.post(payload).await?.decode_into(target)
    }

    /// Sends a PUT request with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the payload cannot be serialized, or
    /// [`ApiError::Transport`] if every attempt failed.
    pub async fn put<P: Serialize + ?Sized>(&self, payload: &P) -> Result<ApiResponse, ApiError> {
        let request = self.request(HttpMethod::Put, None).json_body(payload)?;
        self.send(request).await
    }

    /// Sends a PUT request and decodes the body into `target`.
    ///
    /// # Errors
    ///
    /// See [`put`](Self::put); additionally [`ApiError::Decode`].
    pub async fn put_into<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        payload: &P,
        target: &mut T,
    ) -> Result<ApiResponse, ApiError> {
        self.put(payload).await?.decode_into(target)
    }

    /// Sends a PATCH request with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the payload cannot be serialized, or
    /// [`ApiError::Transport`] if every attempt failed.
    pub async fn patch<P: Serialize + ?Sized>(&self, payload: &P) -> Result<ApiResponse, ApiError> {
        let request = self.request(HttpMethod::Patch, None).json_body(payload)?;
        self.send(request).await
    }

    /// Sends a PATCH request and decodes the body into `target`.
    ///
    /// # Errors
    ///
    /// See [`patch`](Self::patch); additionally [`ApiError::Decode`].
    pub async fn patch_into<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        payload: &P,
        target: &mut T,
    ) -> Result<ApiResponse, ApiError> {
        self.patch(payload).await?.decode_into(target)
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if every attempt failed.
    pub async fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.request(HttpMethod::Delete, None)).await
    }

    /// Sends a DELETE request and decodes the body into `target`.
    ///
    /// # Errors
    ///
    /// See [`delete`](Self::delete); additionally [`ApiError::Decode`].
    pub async fn delete_into<T: DeserializeOwned>(
        &self,
        target: &mut T,
    ) -> Result<ApiResponse, ApiError> {
        self.delete().await?.decode_into(target)
    }

    /// Sends a HEAD request. The response body is always empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if every attempt failed.
    pub async fn head(&self, query: Option<&Query>) -> Result<ApiResponse, ApiError> {
        self.send(self.request(HttpMethod::Head, query)).await
    }

    /// Sends an OPTIONS request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if every attempt failed.
    pub async fn options(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.request(HttpMethod::Options, None)).await
    }
}
