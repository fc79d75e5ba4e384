//! Text and byte encodings of the crate's value types.
//!
//! Values are written as JSON. `null` is the encoding of an absent value;
//! decoding it fails unless the caller allows nulls.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::UrlError;

/// Encoding of an absent value.
pub const NULL: &str = "null";

fn encode_error(field: &str, err: serde_json::Error) -> UrlError {
    UrlError::Decode {
        field: field.to_string(),
        reason: format!("cannot encode: {}", err),
    }
}

/// Encode a value as text.
pub fn encode<T: Serialize>(value: &T) -> Result<String, UrlError> {
    serde_json::to_string(value).map_err(|err| encode_error(std::any::type_name::<T>(), err))
}

/// Encode an optional value as text; `None` becomes [`NULL`].
pub fn encode_option<T: Serialize>(value: Option<&T>) -> Result<String, UrlError> {
    match value {
        Some(value) => encode(value),
        None => Ok(NULL.to_string()),
    }
}

/// Encode a value as bytes.
pub fn encode_bytes<T: Serialize>(value: Option<&T>) -> Result<Vec<u8>, UrlError> {
    serde_json::to_vec(&value).map_err(|err| encode_error(std::any::type_name::<T>(), err))
}

/// Decode text produced by [`encode`] or [`encode_option`].
///
/// `field` names the value in errors. A null payload yields `Ok(None)` when
/// `allow_null` is set and [`UrlError::NullNotAllowed`] otherwise.
///
/// # Examples
///
/// ```
/// use urlkit::{codec, Url, UrlError};
///
/// let url = Url::parse("http://example.com/a").unwrap();
/// let text = codec::encode(&url).unwrap();
/// assert_eq!(codec::decode::<Url>(&text, "url", false).unwrap(), Some(url));
///
/// assert_eq!(codec::decode::<Url>("null", "url", true).unwrap(), None);
/// assert!(matches!(
///     codec::decode::<Url>("null", "url", false),
///     Err(UrlError::NullNotAllowed { .. })
/// ));
/// ```
pub fn decode<T: DeserializeOwned>(text: &str, field: &str, allow_null: bool) -> Result<Option<T>, UrlError> {
    let value: Option<T> = serde_json::from_str(text).map_err(|err| UrlError::Decode {
        field: field.to_string(),
        reason: err.to_string(),
    })?;
    check_null(value, field, allow_null)
}

/// Decode bytes produced by [`encode_bytes`].
pub fn decode_bytes<T: DeserializeOwned>(bytes: &[u8], field: &str, allow_null: bool) -> Result<Option<T>, UrlError> {
    let value: Option<T> = serde_json::from_slice(bytes).map_err(|err| UrlError::Decode {
        field: field.to_string(),
        reason: err.to_string(),
    })?;
    check_null(value, field, allow_null)
}

fn check_null<T>(value: Option<T>, field: &str, allow_null: bool) -> Result<Option<T>, UrlError> {
    if value.is_none() && !allow_null {
        return Err(UrlError::NullNotAllowed {
            field: field.to_string(),
        });
    }
    Ok(value)
}
