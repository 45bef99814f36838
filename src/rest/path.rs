//! Path composition for chained resources.
//!
//! A chain of resource names and identifiers accumulates into a relative
//! path (`users/123/items/111`). At request time that path is placed under
//! the base URL's own path, the optional suffix is appended to the final
//! segment, and the query string is serialized with keys in ascending order.
//!
//! # Example
//!
//! ```rust
//! use chained_rest::rest::{build_url, join_segment, Query};
//! use chained_rest::BaseUrl;
//!
//! let path = join_segment(&join_segment("", "item"), "42");
//! assert_eq!(path, "item/42");
//!
//! let base = BaseUrl::new("https://example.com/api").unwrap();
//! let mut query = Query::new();
//! query.insert("param".to_string(), "test".to_string());
//!
//! let url = build_url(&base, &path, Some(".json"), &query);
//! assert_eq!(url.as_str(), "https://example.com/api/item/42.json?param=test");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;

use crate::config::BaseUrl;

/// Query parameters, kept sorted by key for byte-stable encoding.
pub type Query = BTreeMap<String, String>;

/// Identifier of a single resource in a path.
///
/// Numeric identifiers render in decimal over the full 64-bit range; string
/// identifiers render verbatim, without quoting.
///
/// # Example
///
/// ```rust
/// use chained_rest::rest::ResourceId;
///
/// assert_eq!(ResourceId::from(i64::MAX).to_string(), "9223372036854775807");
/// assert_eq!(ResourceId::from("bndr").to_string(), "bndr");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// A signed integer identifier.
    Int(i64),
    /// An unsigned integer identifier.
    Uint(u64),
    /// A string identifier.
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Uint(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ResourceId {
            fn from(id: $ty) -> Self {
                Self::Int(i64::from(id))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ResourceId {
            fn from(id: $ty) -> Self {
                Self::Uint(u64::from(id))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for ResourceId {
    fn from(id: usize) -> Self {
        Self::Uint(u64::try_from(id).unwrap_or(u64::MAX))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        Self::Str(id.clone())
    }
}

/// Appends one segment to an accumulated path.
///
/// Slashes around the segment are trimmed and an empty segment leaves the
/// path unchanged, so segments are always separated by exactly one `/`.
#[must_use]
pub fn join_segment(path: &str, segment: &str) -> String {
    let segment = segment.trim_matches('/');
    if segment.is_empty() {
        return path.to_string();
    }
    if path.is_empty() {
        return segment.to_string();
    }
    format!("{path}/{segment}")
}

/// Places a relative resource path under a base path prefix.
///
/// The suffix goes onto the final segment only. An empty resource path
/// resolves to the prefix verbatim, trailing slash included, and takes no
/// suffix.
#[must_use]
pub fn resolve_path(prefix: &str, path: &str, suffix: Option<&str>) -> String {
    if path.is_empty() {
        return prefix.to_string();
    }
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{path}{}", suffix.unwrap_or_default())
}

/// Form-encodes query parameters in ascending key order.
///
/// `{"key2": "value2", "key1": "value1"}` encodes as
/// `key1=value1&key2=value2`.
#[must_use]
pub fn encode_query(query: &Query) -> String {
    // A map of strings always serializes; an empty string is the fallback
    serde_urlencoded::to_string(query).unwrap_or_default()
}

/// Builds the absolute request URL.
///
/// Query parameters already present on the base URL are merged with
/// `query`; values from `query` win on duplicate keys.
#[must_use]
pub fn build_url(base: &BaseUrl, path: &str, suffix: Option<&str>, query: &Query) -> Url {
    let mut url = base.as_url().clone();
    url.set_path(&resolve_path(base.as_url().path(), path, suffix));

    let mut merged: Query = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));

    if merged.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&encode_query(&merged)));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Query {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_join_segment_separates_with_single_slash() {
        assert_eq!(join_segment("", "users"), "users");
        assert_eq!(join_segment("users", "123"), "users/123");
        assert_eq!(join_segment("users", "/123/"), "users/123");
        assert_eq!(join_segment("users", ""), "users");
        assert_eq!(join_segment("users", "/"), "users");
    }

    #[test]
    fn test_multilevel_chain_preserves_order() {
        let path = ["users", "123", "items", "111"]
            .iter()
            .fold(String::new(), |path, segment| join_segment(&path, segment));
        assert_eq!(path, "users/123/items/111");
    }

    #[test]
    fn test_numeric_ids_render_full_range() {
        assert_eq!(ResourceId::from(i64::MAX).to_string(), "9223372036854775807");
        assert_eq!(ResourceId::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(ResourceId::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(ResourceId::from(32_i32).to_string(), "32");
        assert_eq!(ResourceId::from(7_usize).to_string(), "7");
        assert_eq!(
            ResourceId::from(usize::MAX).to_string(),
            usize::MAX.to_string()
        );
    }

    #[test]
    fn test_string_ids_render_without_quotes() {
        assert_eq!(ResourceId::from("id123").to_string(), "id123");
        assert_eq!(ResourceId::from(String::from("bndr")).to_string(), "bndr");
    }

    #[test]
    fn test_resolve_path_appends_suffix_to_final_segment_only() {
        assert_eq!(resolve_path("", "item/32", Some(".json")), "/item/32.json");
        assert_eq!(resolve_path("/api", "item/32", None), "/api/item/32");
    }

    #[test]
    fn test_resolve_empty_path_is_prefix_alone() {
        assert_eq!(resolve_path("", "", Some(".json")), "");
        assert_eq!(resolve_path("/path/to/api/", "", None), "/path/to/api/");
        assert_eq!(resolve_path("/path/to/api", "", Some(".json")), "/path/to/api");
    }

    #[test]
    fn test_encode_query_sorts_keys() {
        let q = query(&[("key2", "value2"), ("key1", "value1")]);
        assert_eq!(encode_query(&q), "key1=value1&key2=value2");
    }

    #[test]
    fn test_encode_query_form_encodes_values() {
        let q = query(&[("q", "a b&c")]);
        assert_eq!(encode_query(&q), "q=a+b%26c");
    }

    #[test]
    fn test_build_url_with_empty_chain_is_base_url() {
        let base = BaseUrl::new("https://test-url.com").unwrap();
        let url = build_url(&base, "", Some(".json"), &Query::new());
        assert_eq!(url.as_str(), "https://test-url.com/");
    }

    #[test]
    fn test_build_url_with_empty_chain_keeps_trailing_slash() {
        let base = BaseUrl::new("http://127.0.0.1:8080/api/").unwrap();
        let url = build_url(&base, "", None, &Query::new());
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/");

        let url = build_url(&base, "users", None, &Query::new());
        assert_eq!(url.path(), "/api/users");
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let base = BaseUrl::new("http://127.0.0.1:8080/path/to/api").unwrap();
        let url = build_url(&base, "resname/id123", None, &Query::new());
        assert_eq!(url.path(), "/path/to/api/resname/id123");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_build_url_suffix_survives_query() {
        let base = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        let url = build_url(&base, "item/42", Some(".json"), &query(&[("param", "test")]));
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/item/42.json?param=test");
    }

    #[test]
    fn test_build_url_merges_base_query() {
        let base = BaseUrl::new("https://example.com/?api_key=abc&page=1").unwrap();
        let url = build_url(&base, "users", None, &query(&[("page", "2")]));
        assert_eq!(url.query(), Some("api_key=abc&page=2"));
    }
}
