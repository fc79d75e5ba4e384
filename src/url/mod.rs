//! URL-shaped values and the registries behind them.
//!
//! This module contains:
//! - RFC 3986 URI splitting and the `Uri` value type
//! - Parsed absolute URLs and the `UriBuilder`
//! - Host normalization and validation
//! - The default-port registry and Public Suffix List lookups
//! - URL patterns and string convenience helpers

pub mod builder;
pub mod normalizer;
pub mod parsed;
pub mod pattern;
pub mod ports;
pub mod psl;
pub mod uri;
pub mod utils;

// Re-export main functionality
pub use builder::UriBuilder;
pub use normalizer::{is_valid_scheme, normalize_host, normalize_scheme, validate_host};
pub use parsed::Url;
pub use pattern::UrlPattern;
pub use ports::{default_port, DefaultPorts, DEFAULT_PORTS_ENV};
pub use psl::{get_domain, get_domain_suffix, get_subdomain, DomainSuffix};
pub use uri::Uri;
pub use utils::{
    get_anchor, get_filename, get_path_segments, get_query_value, has_anchor, has_query, is_https,
    parse_query, split_url, strip_anchor, UrlParts,
};
