//! Scheme and hostname normalization.

use std::net::Ipv6Addr;

use crate::error::UrlError;

/// Validate a scheme (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`) and
/// lowercase it.
pub fn normalize_scheme(scheme: &str) -> Result<String, UrlError> {
    if !is_valid_scheme(scheme) {
        return Err(UrlError::InvalidArgument {
            name: "scheme",
            reason: format!("{:?} is not a valid scheme", scheme),
        });
    }
    Ok(scheme.to_ascii_lowercase())
}

pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Normalize a hostname taken from an authority.
///
/// This function:
/// 1. Strips the brackets of an IPv6 literal and validates the address
/// 2. Applies IDNA conversion to non-ASCII names
/// 3. Converts to lowercase
pub fn normalize_host(host: &str) -> Result<String, UrlError> {
    if let Some(inner) = host.strip_prefix('[') {
        let inner = inner.strip_suffix(']').ok_or_else(|| UrlError::InvalidArgument {
            name: "host",
            reason: format!("unterminated IPv6 literal {}", host),
        })?;
        if inner.parse::<Ipv6Addr>().is_err() && !inner.starts_with(['v', 'V']) {
            return Err(UrlError::InvalidArgument {
                name: "host",
                reason: format!("invalid IPv6 address {}", inner),
            });
        }
        return Ok(inner.to_ascii_lowercase());
    }

    let ascii_host = if host.is_ascii() {
        host.to_ascii_lowercase()
    } else {
        idna::domain_to_ascii(host).map_err(|_| UrlError::InvalidArgument {
            name: "host",
            reason: format!("cannot convert {} to ASCII", host),
        })?
    };

    validate_host(&ascii_host)?;
    Ok(ascii_host)
}

/// Validate a registered name: non-empty, at most 255 bytes, and made of
/// unreserved characters, sub-delimiters and percent escapes.
pub fn validate_host(host: &str) -> Result<(), UrlError> {
    if host.is_empty() {
        return Err(UrlError::InvalidArgument {
            name: "host",
            reason: "empty hostname".to_string(),
        });
    }

    if host.len() > 255 {
        return Err(UrlError::InvalidArgument {
            name: "host",
            reason: "hostname exceeds 255 bytes".to_string(),
        });
    }

    if let Some(bad) = host.chars().find(|&c| !is_reg_name_char(c)) {
        return Err(UrlError::InvalidArgument {
            name: "host",
            reason: format!("illegal character {:?} in hostname", bad),
        });
    }

    Ok(())
}

pub(crate) fn is_reg_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '%' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
        )
}
