//! Public Suffix List lookups: public suffixes and registrable domains.

use std::fmt;
use std::net::IpAddr;

use psl::{List, Psl};

/// A public suffix matched for a hostname, such as `com` or `com.cn`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainSuffix {
    domain: String,
}

impl DomainSuffix {
    /// The suffix itself, e.g. `com.cn`.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The suffix labels from left to right.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.domain.split('.')
    }

    /// Whether the suffix has more than one label.
    pub fn is_multi_label(&self) -> bool {
        self.domain.contains('.')
    }
}

impl fmt::Display for DomainSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domain)
    }
}

fn normalize(hostname: &str) -> Option<String> {
    let host = hostname.trim().trim_end_matches('.');
    if host.is_empty() || is_ip_literal(host) {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

fn is_ip_literal(host: &str) -> bool {
    host.starts_with('[') || host.parse::<IpAddr>().is_ok()
}

/// Find the longest public suffix listed for `hostname`.
///
/// Returns `None` for empty input, IP addresses and hostnames whose last
/// label is not a listed suffix.
///
/// # Examples
///
/// ```
/// use urlkit::get_domain_suffix;
///
/// let suffix = get_domain_suffix("news.sina.com.cn").unwrap();
/// assert_eq!(suffix.domain(), "com.cn");
/// assert!(get_domain_suffix("").is_none());
/// ```
pub fn get_domain_suffix(hostname: &str) -> Option<DomainSuffix> {
    let host = normalize(hostname)?;
    let suffix = List.suffix(host.as_bytes())?;
    if !suffix.is_known() {
        return None;
    }
    let domain = std::str::from_utf8(suffix.as_bytes()).ok()?.to_string();
    Some(DomainSuffix { domain })
}

/// The registrable domain of `hostname`: its public suffix plus one label.
///
/// A hostname that is itself a public suffix, or that has a single label, is
/// returned as is. Unlisted top-level labels are treated as one-label suffixes.
/// The result is lowercase.
///
/// # Examples
///
/// ```
/// use urlkit::get_domain;
///
/// assert_eq!(get_domain("a.b.c.d.sina.com.cn"), "sina.com.cn");
/// assert_eq!(get_domain("cn"), "cn");
/// assert_eq!(get_domain(""), "");
/// ```
pub fn get_domain(hostname: &str) -> String {
    let Some(host) = normalize(hostname) else {
        return hostname.trim().to_string();
    };
    List.domain(host.as_bytes())
        .and_then(|domain| std::str::from_utf8(domain.as_bytes()).ok().map(str::to_string))
        .unwrap_or(host)
}

/// Labels of `hostname` to the left of its registrable domain, if any.
///
/// # Examples
///
/// ```
/// use urlkit::get_subdomain;
///
/// assert_eq!(get_subdomain("api.v2.example.co.uk"), Some("api.v2".to_string()));
/// assert_eq!(get_subdomain("example.com"), None);
/// ```
pub fn get_subdomain(hostname: &str) -> Option<String> {
    let host = normalize(hostname)?;
    let domain = get_domain(&host);
    host.strip_suffix(&domain)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}
