//! Value types shared across the crate: network hosts and URL parts.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UrlError;
use crate::url::parsed::Url;
use crate::url::ports::default_port;
use crate::url::psl::get_domain;
use crate::url::uri::Uri;

/// A `(scheme, hostname, port)` triple identifying a network endpoint.
///
/// Hostnames compare and hash case-insensitively; the scheme and port
/// compare verbatim. A `None` port means "no explicit port".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HostRepr")]
pub struct Host {
    scheme: String,
    hostname: String,
    port: Option<u16>,
}

#[derive(Deserialize)]
struct HostRepr {
    #[serde(default)]
    scheme: Option<String>,
    hostname: String,
    #[serde(default)]
    port: Option<u16>,
}

impl TryFrom<HostRepr> for Host {
    type Error = UrlError;

    fn try_from(repr: HostRepr) -> Result<Self, Self::Error> {
        let scheme = repr.scheme.unwrap_or_else(|| Host::DEFAULT_SCHEME.to_string());
        Host::with_scheme(&scheme, &repr.hostname, repr.port)
    }
}

impl Host {
    /// Scheme used when none is given.
    pub const DEFAULT_SCHEME: &'static str = "http";

    /// A host with the default scheme and no explicit port.
    pub fn new(hostname: &str) -> Result<Host, UrlError> {
        Self::with_port(hostname, None)
    }

    /// A host with the default scheme.
    pub fn with_port(hostname: &str, port: Option<u16>) -> Result<Host, UrlError> {
        Self::with_scheme(Self::DEFAULT_SCHEME, hostname, port)
    }

    /// A host with every field given. Both `scheme` and `hostname` must be
    /// non-blank.
    pub fn with_scheme(scheme: &str, hostname: &str, port: Option<u16>) -> Result<Host, UrlError> {
        if hostname.trim().is_empty() {
            return Err(UrlError::InvalidArgument {
                name: "hostname",
                reason: "must not be empty".to_string(),
            });
        }
        if scheme.trim().is_empty() {
            return Err(UrlError::InvalidArgument {
                name: "scheme",
                reason: "must not be empty".to_string(),
            });
        }
        let hostname = hostname
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(hostname);
        Ok(Host {
            scheme: scheme.to_string(),
            hostname: hostname.to_string(),
            port,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The explicit port, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The explicit port, or the scheme's default port.
    pub fn port_or_default(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme.to_ascii_lowercase()))
    }

    /// `hostname[:port]` without the scheme, as written in an authority.
    /// IPv6 addresses are bracketed.
    pub fn to_host_string(&self) -> String {
        let mut out = String::with_capacity(self.hostname.len() + 8);
        if self.hostname.contains(':') {
            out.push('[');
            out.push_str(&self.hostname);
            out.push(']');
        } else {
            out.push_str(&self.hostname);
        }
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        out
    }

    fn lowercase_hostname(&self) -> String {
        self.hostname.to_ascii_lowercase()
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.port == other.port
            && self.hostname.eq_ignore_ascii_case(&other.hostname)
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.lowercase_hostname().hash(state);
        self.port.hash(state);
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scheme
            .cmp(&other.scheme)
            .then_with(|| self.lowercase_hostname().cmp(&other.lowercase_hostname()))
            .then_with(|| self.port.cmp(&other.port))
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.to_host_string())
    }
}

impl From<&Url> for Host {
    fn from(url: &Url) -> Self {
        url.host().clone()
    }
}

impl TryFrom<&Uri> for Host {
    type Error = UrlError;

    /// Takes scheme, host and port from `uri`; user-info is ignored.
    fn try_from(uri: &Uri) -> Result<Self, Self::Error> {
        let hostname = uri.host().ok_or_else(|| UrlError::InvalidArgument {
            name: "uri",
            reason: format!("{} has no host", uri),
        })?;
        Host::with_scheme(uri.scheme().unwrap_or(Host::DEFAULT_SCHEME), hostname, uri.port())
    }
}

impl TryFrom<&url::Url> for Host {
    type Error = UrlError;

    fn try_from(url: &url::Url) -> Result<Self, Self::Error> {
        let hostname = url.host_str().ok_or_else(|| UrlError::InvalidArgument {
            name: "url",
            reason: format!("{} has no host", url),
        })?;
        Host::with_scheme(url.scheme(), hostname, url.port())
    }
}

/// The sub-components of a URL a pattern can be matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlPart {
    /// The whole URL in its canonical form.
    Url,
    Scheme,
    Hostname,
    /// The registrable domain of the hostname.
    Domain,
    UserInfo,
    Port,
    Path,
    Query,
    Fragment,
}

impl UrlPart {
    /// Every part, in declaration order.
    pub const ALL: [UrlPart; 9] = [
        UrlPart::Url,
        UrlPart::Scheme,
        UrlPart::Hostname,
        UrlPart::Domain,
        UrlPart::UserInfo,
        UrlPart::Port,
        UrlPart::Path,
        UrlPart::Query,
        UrlPart::Fragment,
    ];

    /// Symbolic name, e.g. `USER_INFO`.
    pub fn name(&self) -> &'static str {
        match self {
            UrlPart::Url => "URL",
            UrlPart::Scheme => "SCHEME",
            UrlPart::Hostname => "HOSTNAME",
            UrlPart::Domain => "DOMAIN",
            UrlPart::UserInfo => "USER_INFO",
            UrlPart::Port => "PORT",
            UrlPart::Path => "PATH",
            UrlPart::Query => "QUERY",
            UrlPart::Fragment => "FRAGMENT",
        }
    }

    /// The text of this part of `url`, or `None` when the URL lacks it.
    pub fn extract(&self, url: &Url) -> Option<String> {
        match self {
            UrlPart::Url => Some(url.to_string()),
            UrlPart::Scheme => Some(url.scheme().to_string()),
            UrlPart::Hostname => Some(url.hostname().to_string()),
            UrlPart::Domain => Some(get_domain(url.hostname())),
            UrlPart::UserInfo => url.user_info().map(str::to_string),
            UrlPart::Port => url.port().map(|port| port.to_string()),
            UrlPart::Path => Some(url.path().to_string()),
            UrlPart::Query => url.query().map(str::to_string),
            UrlPart::Fragment => url.fragment().map(str::to_string),
        }
    }
}

impl fmt::Display for UrlPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UrlPart {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        UrlPart::ALL
            .into_iter()
            .find(|part| part.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UrlError::InvalidArgument {
                name: "part",
                reason: format!("unknown URL part {}", s),
            })
    }
}
