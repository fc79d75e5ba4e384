//! Error types for URL parsing, URI building, pattern matching and decoding.

use thiserror::Error;

/// Errors that can occur while parsing, building, matching or decoding URLs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UrlError {
    /// A required argument was missing or empty.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The text is not a well-formed absolute URL.
    #[error("Malformed URL `{input}`: {reason}")]
    MalformedUrl {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The text (or builder state) is not a syntactically valid URI reference.
    #[error("Malformed URI `{input}`: {reason}")]
    MalformedUri {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The port is not a number between 0 and 65535.
    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    /// A glob or regular expression failed to compile.
    #[error("Invalid pattern `{expression}`: {reason}")]
    InvalidPattern {
        /// The expression as written by the caller.
        expression: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A serialized payload does not match the expected encoding.
    #[error("Cannot decode `{field}`: {reason}")]
    Decode {
        /// The field or type being decoded.
        field: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// A null marker was decoded where nulls are not allowed.
    #[error("Null value not allowed for `{field}`")]
    NullNotAllowed {
        /// The field or type being decoded.
        field: String,
    },

    /// URL parsing failed using the url crate.
    #[error("URL parsing error: {0}")]
    UrlParseError(String),
}

impl UrlError {
    pub(crate) fn malformed_url(input: &str, reason: impl Into<String>) -> Self {
        UrlError::MalformedUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_uri(input: &str, reason: impl Into<String>) -> Self {
        UrlError::MalformedUri {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a decoding failure, including the null-policy case.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, UrlError::Decode { .. } | UrlError::NullNotAllowed { .. })
    }
}

impl From<url::ParseError> for UrlError {
    fn from(err: url::ParseError) -> Self {
        UrlError::UrlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            UrlError::InvalidPort("99999".to_string()).to_string(),
            "Invalid port number: 99999"
        );

        assert_eq!(
            UrlError::malformed_url("http//x", "missing scheme").to_string(),
            "Malformed URL `http//x`: missing scheme"
        );

        assert_eq!(
            UrlError::NullNotAllowed { field: "Host".to_string() }.to_string(),
            "Null value not allowed for `Host`"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            UrlError::InvalidPort("x".to_string()),
            UrlError::InvalidPort("x".to_string())
        );
        assert_ne!(
            UrlError::InvalidPort("x".to_string()),
            UrlError::UrlParseError("x".to_string())
        );
    }

    #[test]
    fn test_decode_error_family() {
        assert!(UrlError::NullNotAllowed { field: "Url".to_string() }.is_decode_error());
        assert!(UrlError::Decode {
            field: "Url".to_string(),
            reason: "bad".to_string()
        }
        .is_decode_error());
        assert!(!UrlError::InvalidPort("1".to_string()).is_decode_error());
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let url_error = url::ParseError::EmptyHost;
        let err: UrlError = url_error.into();

        match err {
            UrlError::UrlParseError(_) => (),
            _ => panic!("Expected UrlParseError variant"),
        }
    }
}
