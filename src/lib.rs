//! # chained-rest
//!
//! A convenience layer for REST-style APIs: build resource URLs by chaining
//! path segments and identifiers, attach query parameters and basic auth,
//! issue HTTP verbs and decode JSON responses into your own types.
//!
//! ## Overview
//!
//! This crate provides:
//! - A chainable, immutable [`Resource`] builder (`api.res("users").id(123)`)
//! - Client configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Static basic-auth injection via [`BasicAuth`]
//! - A response decoding policy that leaves targets untouched on error
//!   statuses and empty bodies
//! - Bounded, sequential retries on transport failures
//!
//! ## Quick Start
//!
//! ```rust
//! use chained_rest::Api;
//!
//! let api = Api::new("https://api.example.com").unwrap();
//! let item = api.res("users").id(123).res("items").id(111);
//! assert_eq!(item.url(), "users/123/items/111");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use chained_rest::{Api, ApiConfig, BasicAuth, Query};
//!
//! let config = ApiConfig::builder("https://api.example.com")
//!     .basic_auth(BasicAuth::new("username", "password")?)
//!     .path_suffix(".json")
//!     .retries(2)
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! let api = Api::from_config(config)?;
//!
//! // GET https://api.example.com/item/42.json?param=test
//! let mut query = Query::new();
//! query.insert("param".to_string(), "test".to_string());
//! let mut item = serde_json::Value::Null;
//! let response = api.res("item").id(42).get_into(Some(&query), &mut item).await?;
//!
//! if response.is_error_status() {
//!     // The target was not touched; the raw body is still available
//!     eprintln!("{}: {}", response.status(), response.text());
//! }
//! ```
//!
//! ## Errors versus status codes
//!
//! A verb call returns `Err` only when the request could not be completed
//! ([`ApiError::Transport`]), its payload could not be encoded, or a 2xx
//! body could not be decoded. A 4xx or 5xx response is a completed round
//! trip and arrives as `Ok(ApiResponse)`.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and shared by `Arc`
//! - **Fail-fast validation**: base URLs and credentials are checked at build time
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::BasicAuth;
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl};
pub use error::ConfigError;

pub use clients::{ApiError, ApiResponse, HttpClient, HttpMethod};
pub use rest::{Api, ApiBuilder, Query, Resource, ResourceId};
