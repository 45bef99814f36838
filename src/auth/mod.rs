//! Request authentication.
//!
//! Only static credential injection is supported: when an [`Api`](crate::Api)
//! is configured with [`BasicAuth`], every outgoing request carries an
//! `Authorization: Basic ...` header. Without credentials no auth header is
//! added.
//!
//! # Example
//!
//! ```rust
//! use chained_rest::BasicAuth;
//!
//! let auth = BasicAuth::new("username", "password").unwrap();
//! assert_eq!(auth.header_value(), "Basic dXNlcm5hbWU6cGFzc3dvcmQ=");
//! ```

mod basic;

pub use basic::BasicAuth;
