//! Syntactically checked RFC 3986 URI references.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UrlError;
use crate::url::normalizer::is_valid_scheme;

/// Splits a reference into scheme, authority, path, query and fragment
/// (RFC 3986, appendix B). Matches every input.
///
/// * scheme    = $2
/// * authority = $4
/// * path      = $5
/// * query     = $7
/// * fragment  = $9
fn appendix_b() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?$")
            .expect("RFC 3986 appendix B regex")
    })
}

/// Raw components of a URI reference, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

pub(crate) fn split(input: &str) -> RawParts<'_> {
    match appendix_b().captures(input) {
        Some(caps) => RawParts {
            scheme: caps.get(2).map(|m| m.as_str()),
            authority: caps.get(4).map(|m| m.as_str()),
            path: caps.get(5).map_or("", |m| m.as_str()),
            query: caps.get(7).map(|m| m.as_str()),
            fragment: caps.get(9).map(|m| m.as_str()),
        },
        None => RawParts {
            scheme: None,
            authority: None,
            path: input,
            query: None,
            fragment: None,
        },
    }
}

/// `[userinfo@]host[:port]` split apart. The host keeps IPv6 brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawAuthority<'a> {
    pub user_info: Option<&'a str>,
    pub host: &'a str,
    pub port: Option<&'a str>,
}

pub(crate) fn split_authority(authority: &str) -> Result<RawAuthority<'_>, String> {
    let (user_info, host_port) = match authority.rfind('@') {
        Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
        None => (None, authority),
    };

    let (host, port) = if host_port.starts_with('[') {
        let end = host_port
            .find(']')
            .ok_or_else(|| "unterminated IPv6 literal".to_string())?;
        let (host, rest) = host_port.split_at(end + 1);
        match rest {
            "" => (host, None),
            _ => match rest.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => return Err(format!("unexpected {:?} after IPv6 literal", rest)),
            },
        }
    } else {
        match host_port.rfind(':') {
            Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
            None => (host_port, None),
        }
    };

    Ok(RawAuthority {
        user_info,
        host,
        port: port.filter(|p| !p.is_empty()),
    })
}

pub(crate) fn parse_port(port: &str) -> Result<u16, UrlError> {
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlError::InvalidPort(port.to_string()));
    }
    port.parse::<u16>()
        .map_err(|_| UrlError::InvalidPort(port.to_string()))
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~'
                | ':' | '/' | '?' | '#' | '[' | ']' | '@'
                | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
                | '%'
        )
}

fn check_characters(input: &str) -> Result<(), UrlError> {
    let bytes = input.as_bytes();
    for (index, c) in input.char_indices() {
        if !is_uri_char(c) {
            return Err(UrlError::malformed_uri(
                input,
                format!("illegal character {:?} at index {}", c, index),
            ));
        }
        if c == '%' {
            let valid = bytes.len() > index + 2
                && bytes[index + 1].is_ascii_hexdigit()
                && bytes[index + 2].is_ascii_hexdigit();
            if !valid {
                return Err(UrlError::malformed_uri(
                    input,
                    format!("malformed escape at index {}", index),
                ));
            }
        }
    }
    Ok(())
}

/// A URI reference that passed RFC 3986 syntax checks, kept exactly as
/// written. Components are returned raw (still percent-encoded).
///
/// # Examples
///
/// ```
/// use urlkit::Uri;
///
/// let uri = Uri::parse("mailto:someone@example.com").unwrap();
/// assert!(uri.is_opaque());
/// assert_eq!(uri.path(), "someone@example.com");
///
/// let uri = Uri::parse("http://user@[::1]:8080/a?b#c").unwrap();
/// assert_eq!(uri.host(), Some("::1"));
/// assert_eq!(uri.port(), Some(8080));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri {
    serialization: String,
    scheme: Option<String>,
    authority: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Uri {
    /// Parse and check a URI reference.
    pub fn parse(input: &str) -> Result<Uri, UrlError> {
        check_characters(input)?;
        let parts = split(input);

        if let Some(scheme) = parts.scheme {
            if !is_valid_scheme(scheme) {
                return Err(UrlError::malformed_uri(input, format!("invalid scheme {:?}", scheme)));
            }
        } else if let Some(first) = parts.path.split('/').next() {
            if first.contains(':') && parts.authority.is_none() {
                return Err(UrlError::malformed_uri(input, "colon in first segment of a relative path"));
            }
        }

        let (mut user_info, mut host, mut port) = (None, None, None);
        if let Some(authority) = parts.authority {
            let raw = split_authority(authority).map_err(|reason| UrlError::malformed_uri(input, reason))?;
            if let Some(p) = raw.port {
                port = Some(parse_port(p)?);
            }
            user_info = raw.user_info.map(str::to_string);
            if !raw.host.is_empty() {
                host = Some(
                    raw.host
                        .strip_prefix('[')
                        .and_then(|h| h.strip_suffix(']'))
                        .unwrap_or(raw.host)
                        .to_string(),
                );
            }
        }

        Ok(Uri {
            serialization: input.to_string(),
            scheme: parts.scheme.map(str::to_string),
            authority: parts.authority.map(str::to_string),
            user_info,
            host,
            port,
            path: parts.path.to_string(),
            query: parts.query.map(str::to_string),
            fragment: parts.fragment.map(str::to_string),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.serialization
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The raw authority; `Some("")` for `file:///x`.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// The host without IPv6 brackets, `None` when absent or empty.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether the reference has a scheme.
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// An absolute URI with no authority whose path is not absolute,
    /// e.g. `mailto:a@b`.
    pub fn is_opaque(&self) -> bool {
        self.scheme.is_some() && self.authority.is_none() && !self.path.starts_with('/')
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialization)
    }
}

impl FromStr for Uri {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.serialization
    }
}

impl Serialize for Uri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.serialization)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Uri::parse(&text).map_err(serde::de::Error::custom)
    }
}
