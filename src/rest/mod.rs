//! Chainable REST resources.
//!
//! - [`Api`] / [`ApiBuilder`]: the client, rooted at a base URL
//! - [`Resource`]: an immutable node of the URL path tree with the HTTP verbs
//! - [`ResourceId`]: numeric or string identifiers
//! - Path composition helpers: [`join_segment`], [`resolve_path`],
//!   [`encode_query`], [`build_url`]
//!
//! # Example
//!
//! ```rust,ignore
//! use chained_rest::Api;
//!
//! let api = Api::new("https://api.example.com")?;
//!
//! // GET https://api.example.com/users/123/items/111
//! let response = api.res("users").id(123).res("items").id(111).get(None).await?;
//!
//! // POST https://api.example.com/users
//! let response = api.res("users").post(&serde_json::json!({"name": "bndr"})).await?;
//! ```

mod api;
mod path;
mod resource;

pub use api::{Api, ApiBuilder};
pub use path::{build_url, encode_query, join_segment, resolve_path, Query, ResourceId};
pub use resource::Resource;
