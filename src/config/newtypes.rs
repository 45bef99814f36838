//! Validated newtype wrappers for configuration values.

use std::fmt;

use reqwest::Url;

use crate::error::ConfigError;

/// A validated, absolute base URL for an API.
///
/// The URL may carry a path (`https://example.com/path/to/api`); resource
/// paths are appended below it. A trailing `/` on the path is ignored.
/// The string form is kept exactly as given (minus surrounding whitespace).
///
/// # Example
///
/// ```rust
/// use chained_rest::BaseUrl;
///
/// let url = BaseUrl::new("https://example.com/path/to/api/").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/path/to/api/");
/// assert_eq!(url.path_prefix(), "/path/to/api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    raw: String,
    url: Url,
}

impl BaseUrl {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// cannot carry a path (e.g. `mailto:` URLs).
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref().trim();
        let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            url: parsed,
        })
    }

    /// Returns the path of the base URL without a trailing `/`.
    ///
    /// For `https://example.com` this is the empty string.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        self.url.path().trim_end_matches('/')
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.url
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
