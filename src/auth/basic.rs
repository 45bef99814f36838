//! HTTP basic authentication credentials.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::ConfigError;

/// Username/password pair sent with every request as HTTP basic auth.
///
/// The password is masked in `Debug` output so credentials do not leak into
/// logs.
///
/// # Example
///
/// ```rust
/// use chained_rest::BasicAuth;
///
/// let auth = BasicAuth::new("username", "password").unwrap();
/// assert_eq!(auth.username(), "username");
/// assert_eq!(format!("{auth:?}"), r#"BasicAuth { username: "username", password: "*****" }"#);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates new credentials.
    ///
    /// An empty password is allowed; an empty username is not.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if `username` is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self {
            username,
            password: password.into(),
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the `Authorization` header value for these credentials.
    #[must_use]
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }

    /// Adds the `Authorization` header to outgoing request headers.
    ///
    /// An `Authorization` header already present in `headers` is kept.
    pub(crate) fn authorize(&self, headers: &mut HeaderMap) {
        // Base64 output is always a valid header value
        if let Ok(mut value) = HeaderValue::from_str(&self.header_value()) {
            value.set_sensitive(true);
            headers.entry(AUTHORIZATION).or_insert(value);
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}
