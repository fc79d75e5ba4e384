//! Convenience functions over URL strings.
//!
//! Each function parses its input with [`Url::parse`] and reads one thing
//! out of it, for callers that only hold text and want a single answer.

use std::collections::HashMap;

use crate::error::UrlError;
use crate::url::parsed::Url;
use crate::url::psl::get_subdomain;

/// Every component of a URL, split out at once.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlParts {
    /// Lowercase scheme (https, http, ftp)
    pub scheme: String,
    /// Full hostname (api.example.com)
    pub host: String,
    /// Explicit port, kept even when it is the scheme's default
    pub port: Option<u16>,
    /// Raw path (/api/v1/users); empty when the URL has none
    pub path: String,
    /// Query string without the '?' (foo=bar&baz=qux)
    pub query: Option<String>,
    /// Anchor/fragment without the '#' (section1)
    pub anchor: Option<String>,
    /// Registrable domain (example.com, example.co.uk)
    pub domain: String,
    /// Public suffix (com, co.uk), if the hostname has a listed one
    pub tld: Option<String>,
    /// Labels left of the registrable domain (api, www)
    pub subdomain: Option<String>,
}

/// Parse a URL into all its components at once.
///
/// # Examples
///
/// ```
/// use urlkit::split_url;
///
/// let parts = split_url("https://api.github.com/repos?page=1#readme").unwrap();
/// assert_eq!(parts.scheme, "https");
/// assert_eq!(parts.domain, "github.com");
/// assert_eq!(parts.tld, Some("com".to_string()));
/// assert_eq!(parts.subdomain, Some("api".to_string()));
/// assert_eq!(parts.anchor, Some("readme".to_string()));
/// ```
pub fn split_url(url: &str) -> Result<UrlParts, UrlError> {
    let parsed = Url::parse(url)?;

    Ok(UrlParts {
        scheme: parsed.scheme().to_string(),
        host: parsed.hostname().to_string(),
        port: parsed.port(),
        path: parsed.path().to_string(),
        query: parsed.query().map(str::to_string),
        anchor: parsed.fragment().map(str::to_string),
        domain: parsed.domain(),
        tld: parsed.domain_suffix().map(|suffix| suffix.domain().to_string()),
        subdomain: get_subdomain(parsed.hostname()),
    })
}

/// Decoded, non-empty path segments.
///
/// # Examples
///
/// ```
/// use urlkit::get_path_segments;
///
/// let segments = get_path_segments("https://example.com/api/v1/users").unwrap();
/// assert_eq!(segments, vec!["api", "v1", "users"]);
/// ```
pub fn get_path_segments(url: &str) -> Result<Vec<String>, UrlError> {
    let parsed = Url::parse(url)?;
    Ok(parsed
        .path_segments()
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect())
}

/// The last path segment, when it looks like a file name: it has an
/// extension or is the only segment. A trailing `/` means no file.
///
/// # Examples
///
/// ```
/// use urlkit::get_filename;
///
/// let filename = get_filename("https://example.com/docs/file.pdf").unwrap();
/// assert_eq!(filename, Some("file.pdf".to_string()));
///
/// let no_file = get_filename("https://example.com/api/users/").unwrap();
/// assert_eq!(no_file, None);
/// ```
pub fn get_filename(url: &str) -> Result<Option<String>, UrlError> {
    let parsed = Url::parse(url)?;
    if parsed.path().ends_with('/') {
        return Ok(None);
    }
    let segments: Vec<String> = parsed
        .path_segments()
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.last() {
        Some(last) if last.contains('.') || segments.len() == 1 => Ok(Some(last.clone())),
        _ => Ok(None),
    }
}

/// Query parameters as a map. Keys and values are decoded; a key without
/// `=` maps to an empty value and a repeated key keeps its last value.
///
/// # Examples
///
/// ```
/// use urlkit::parse_query;
///
/// let params = parse_query("https://example.com?foo=bar&page=1").unwrap();
/// assert_eq!(params.get("foo"), Some(&"bar".to_string()));
/// assert_eq!(params.get("page"), Some(&"1".to_string()));
/// ```
pub fn parse_query(url: &str) -> Result<HashMap<String, String>, UrlError> {
    let parsed = Url::parse(url)?;
    Ok(parsed
        .query_params()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// The first value of query parameter `key`.
///
/// # Examples
///
/// ```
/// use urlkit::get_query_value;
///
/// let value = get_query_value("https://example.com?page=2&sort=name", "page").unwrap();
/// assert_eq!(value, Some("2".to_string()));
///
/// let missing = get_query_value("https://example.com?page=2", "missing").unwrap();
/// assert_eq!(missing, None);
/// ```
pub fn get_query_value(url: &str, key: &str) -> Result<Option<String>, UrlError> {
    let parsed = Url::parse(url)?;
    Ok(parsed
        .query_params()
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.unwrap_or_default()))
}

/// The fragment without the `#`.
///
/// # Examples
///
/// ```
/// use urlkit::get_anchor;
///
/// let anchor = get_anchor("https://docs.rs/serde#examples").unwrap();
/// assert_eq!(anchor, Some("examples".to_string()));
/// ```
pub fn get_anchor(url: &str) -> Result<Option<String>, UrlError> {
    let parsed = Url::parse(url)?;
    Ok(parsed.fragment().map(str::to_string))
}

/// The URL without its fragment.
///
/// # Examples
///
/// ```
/// use urlkit::strip_anchor;
///
/// let clean = strip_anchor("https://example.com/page#section").unwrap();
/// assert_eq!(clean, "https://example.com/page");
/// ```
pub fn strip_anchor(url: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(url)?;
    Ok(parsed.without_fragment().to_string())
}

/// Whether `url` parses with the `https` scheme.
///
/// ```
/// use urlkit::is_https;
///
/// assert!(is_https("HTTPS://example.com"));
/// assert!(!is_https("http://example.com"));
/// assert!(!is_https("https:/broken"));
/// ```
pub fn is_https(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.scheme() == "https")
}

/// Whether `url` parses and has a query, even an empty one.
pub fn has_query(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.query().is_some())
}

/// Whether `url` parses and has a fragment, even an empty one.
pub fn has_anchor(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.fragment().is_some())
}
