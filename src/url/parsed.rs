//! Parsed absolute URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::percent::{self, Charset, QueryParam};
use crate::error::UrlError;
use crate::types::Host;
use crate::url::normalizer::{normalize_host, normalize_scheme};
use crate::url::psl::{get_domain, get_domain_suffix, DomainSuffix};
use crate::url::uri::{parse_port, split, split_authority, Uri};

/// An absolute URL with an authority: `scheme://[userinfo@]host[:port]path[?query][#fragment]`.
///
/// Parsing lowercases the scheme and hostname and converts internationalized
/// hostnames to ASCII; everything else is kept as written, so formatting a
/// parsed URL and parsing it again yields the same value.
///
/// # Examples
///
/// ```
/// use urlkit::Url;
///
/// let url = Url::parse("HTTP://News.Sina.com.cn:8080/a/b?x=1#top").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.hostname(), "news.sina.com.cn");
/// assert_eq!(url.port(), Some(8080));
/// assert_eq!(url.domain(), "sina.com.cn");
/// assert_eq!(url.to_string(), "http://news.sina.com.cn:8080/a/b?x=1#top");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    host: Host,
    user_info: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Url {
    /// Parse an absolute URL.
    pub fn parse(input: &str) -> Result<Url, UrlError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(UrlError::malformed_url(input, "empty input"));
        }
        if let Some(bad) = text.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(UrlError::malformed_url(input, format!("illegal character {:?}", bad)));
        }

        let parts = split(text);
        let scheme = parts
            .scheme
            .ok_or_else(|| UrlError::malformed_url(input, "missing scheme"))?;
        let scheme = normalize_scheme(scheme)
            .map_err(|_| UrlError::malformed_url(input, format!("invalid scheme {:?}", scheme)))?;
        let authority = parts
            .authority
            .ok_or_else(|| UrlError::malformed_url(input, "missing authority"))?;

        let raw = split_authority(authority).map_err(|reason| UrlError::malformed_url(input, reason))?;
        if raw.host.is_empty() {
            return Err(UrlError::malformed_url(input, "missing host"));
        }
        let hostname = normalize_host(raw.host).map_err(|err| UrlError::malformed_url(input, err.to_string()))?;
        let port = match raw.port {
            Some(port) => Some(
                parse_port(port).map_err(|_| UrlError::malformed_url(input, format!("invalid port {:?}", port)))?,
            ),
            None => None,
        };

        Ok(Url {
            host: Host::with_scheme(&scheme, &hostname, port)?,
            user_info: raw.user_info.map(str::to_string),
            path: parts.path.to_string(),
            query: parts.query.map(str::to_string),
            fragment: parts.fragment.map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        self.host.scheme()
    }

    /// Raw user-info, e.g. `user:password`.
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// The `(scheme, hostname, port)` this URL points at.
    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn hostname(&self) -> &str {
        self.host.hostname()
    }

    /// The explicit port, if any.
    pub fn port(&self) -> Option<u16> {
        self.host.port()
    }

    /// The explicit port, or the scheme's default port.
    pub fn port_or_default(&self) -> Option<u16> {
        self.host.port_or_default()
    }

    /// Whether the URL connects to its scheme's default port.
    pub fn is_default_port(&self) -> bool {
        match self.port() {
            None => true,
            Some(port) => crate::url::ports::default_port(self.scheme()) == Some(port),
        }
    }

    /// `[userinfo@]host[:port]`.
    pub fn authority(&self) -> String {
        match &self.user_info {
            Some(user_info) => format!("{}@{}", user_info, self.host.to_host_string()),
            None => self.host.to_host_string(),
        }
    }

    /// Raw path; empty for `http://host`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Raw fragment without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The registrable domain of the hostname.
    pub fn domain(&self) -> String {
        get_domain(self.hostname())
    }

    /// The public suffix of the hostname.
    pub fn domain_suffix(&self) -> Option<DomainSuffix> {
        get_domain_suffix(self.hostname())
    }

    /// Decoded query parameters in order.
    pub fn query_params(&self) -> Vec<QueryParam> {
        self.query
            .as_deref()
            .map(|query| percent::parse(query, Charset::Utf8))
            .unwrap_or_default()
    }

    /// Decoded path segments.
    pub fn path_segments(&self) -> Vec<String> {
        percent::parse_path_segments(&self.path, Charset::Utf8)
    }

    /// A copy of this URL without its fragment.
    pub fn without_fragment(&self) -> Url {
        Url {
            fragment: None,
            ..self.clone()
        }
    }

    /// Check this URL against RFC 3986 syntax.
    pub fn to_uri(&self) -> Result<Uri, UrlError> {
        Uri::parse(&self.to_string())
    }

    /// Convert to a `url::Url` for use with HTTP clients.
    pub fn to_url(&self) -> Result<url::Url, UrlError> {
        Ok(url::Url::parse(&self.to_string())?)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme(), self.authority(), self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl TryFrom<&Uri> for Url {
    type Error = UrlError;

    fn try_from(uri: &Uri) -> Result<Self, Self::Error> {
        Url::parse(uri.as_str())
    }
}

impl TryFrom<&url::Url> for Url {
    type Error = UrlError;

    fn try_from(url: &url::Url) -> Result<Self, Self::Error> {
        Url::parse(url.as_str())
    }
}

impl TryFrom<url::Url> for Url {
    type Error = UrlError;

    fn try_from(url: url::Url) -> Result<Self, Self::Error> {
        Url::try_from(&url)
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Url::parse(&text).map_err(serde::de::Error::custom)
    }
}
