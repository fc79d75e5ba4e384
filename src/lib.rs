//! urlkit - URL values, an RFC 3986 URI builder and URL pattern matching
//!
//! This crate provides the pieces a crawler or proxy needs to handle URLs as
//! typed values instead of strings.
//!
//! # Features
//!
//! - **Percent-encoding**: component-aware encoding and decoding, with a
//!   selectable charset, plus query-string parsing and formatting
//! - **Default ports**: a scheme to port registry loaded once per process
//! - **Public suffixes**: registrable domain and public suffix lookups backed
//!   by the Public Suffix List
//! - **Values**: `Host`, `Url` and `Uri`, all comparable, hashable and
//!   serializable
//! - **Builder**: `UriBuilder` composes opaque and hierarchical URIs and
//!   encodes each component it is given with the builder's charset
//! - **Patterns**: literal, prefix, suffix, glob and regex matching against a
//!   chosen part of a URL
//!
//! # Quick Start
//!
//! ```
//! use urlkit::{default_port, get_domain, Pattern, PatternType, UriBuilder, Url, UrlPart, UrlPattern};
//!
//! // Parse and inspect
//! let url = Url::parse("https://news.sina.com.cn/world/index.html?page=2#top")?;
//! assert_eq!(url.domain(), "sina.com.cn");
//! assert_eq!(url.port_or_default(), Some(443));
//!
//! // Registries
//! assert_eq!(default_port("ftp"), Some(21));
//! assert_eq!(get_domain("a.b.c.d.sina.com.cn"), "sina.com.cn");
//!
//! // Build
//! let mut builder = UriBuilder::new();
//! builder.set_scheme("http").set_host("example.com").set_path("/a b").add_parameter("q", "x y");
//! assert_eq!(builder.build()?.as_str(), "http://example.com/a%20b?q=x+y");
//!
//! // Match
//! let rule = UrlPattern::new(Some(UrlPart::Hostname), Pattern::new(PatternType::Suffix, "com.cn"));
//! assert!(rule.matches(&url)?);
//! # Ok::<(), urlkit::UrlError>(())
//! ```
//!
//! # Error Handling
//!
//! All fallible functions return `Result<T, UrlError>`. Common error cases:
//!
//! - Empty or blank hostnames and schemes
//! - Input that is not an absolute URL or not a valid URI reference
//! - Glob or regex patterns that do not compile, reported on first match
//! - Payloads that do not decode, or decode to null where null is not allowed

// Re-export value types
pub use types::{Host, UrlPart};
pub use crate::url::{Uri, UriBuilder, Url, UrlPattern};

// Re-export engines
pub use crate::core::codec;
pub use crate::core::percent;
pub use crate::core::{glob_to_regex, Charset, Pattern, PatternType, QueryParam};

// Re-export registries
pub use crate::url::{default_port, DefaultPorts, DEFAULT_PORTS_ENV};
pub use crate::url::{get_domain, get_domain_suffix, get_subdomain, DomainSuffix};

// Re-export essential URL utilities
pub use crate::url::{
    get_anchor, get_filename, get_path_segments, get_query_value, has_anchor, has_query, is_https,
    parse_query, split_url, strip_anchor, UrlParts,
};
pub use crate::url::{is_valid_scheme, normalize_host, validate_host};

// Re-export public types
pub use error::UrlError;

// Module declarations
pub mod core;
pub mod error;
pub mod types;
pub mod url;
