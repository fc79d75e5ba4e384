//! Percent-encoding and decoding for the individual URI components.
//!
//! Every byte outside the RFC 3986 unreserved set (`A-Z a-z 0-9 - . _ ~`) is
//! escaped unless the component being written whitelists it. Decoding is
//! lenient: an escape that is not followed by two hex digits is kept verbatim.
//!
//! Query strings are handled as `application/x-www-form-urlencoded` parameter
//! lists where a space is written as `+`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{
    percent_decode, percent_encode, percent_encode_byte, AsciiSet, NON_ALPHANUMERIC,
};

use crate::error::UrlError;

/// A query parameter: a name and an optional value (`name` vs `name=value`).
pub type QueryParam = (String, Option<String>);

/// Everything except the unreserved characters.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `pchar` without `/`: unreserved, sub-delims, `:` and `@`.
const PATH_SEGMENT: &AsciiSet = &UNRESERVED
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

const PATH: &AsciiSet = &PATH_SEGMENT.remove(b'/');

/// Unreserved, sub-delims and `:`.
const USER_INFO: &AsciiSet = &UNRESERVED
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':');

/// Unreserved plus every reserved character (`uric`), used for raw query and
/// fragment text supplied by the caller.
const URIC: &AsciiSet = &USER_INFO
    .remove(b'/')
    .remove(b'?')
    .remove(b'@')
    .remove(b'[')
    .remove(b']');

/// Form encoding keeps the unreserved characters and writes space as `+`.
const FORM: &AsciiSet = &UNRESERVED.remove(b' ');

/// The character set used to turn text into the bytes that get escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8, the default for URIs.
    #[default]
    Utf8,
    /// ISO-8859-1 (Latin-1).
    Iso8859_1,
    /// 7-bit US-ASCII.
    UsAscii,
}

impl Charset {
    /// Canonical name of the charset.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Encode text into bytes. Characters this charset cannot represent
    /// become `?`.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let limit = match self {
            Charset::Utf8 => return Cow::Borrowed(text.as_bytes()),
            Charset::Iso8859_1 => 0xFF,
            Charset::UsAscii => 0x7F,
        };
        if text.is_ascii() {
            return Cow::Borrowed(text.as_bytes());
        }
        Cow::Owned(
            text.chars()
                .map(|c| if (c as u32) <= limit { c as u32 as u8 } else { b'?' })
                .collect(),
        )
    }

    /// Decode bytes into text. Invalid sequences become U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes),
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect::<String>().into(),
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect::<String>()
                .into(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Iso8859_1),
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            _ => Err(UrlError::InvalidArgument {
                name: "charset",
                reason: format!("unsupported charset {}", s),
            }),
        }
    }
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn encode_with(text: &str, charset: Charset, set: &'static AsciiSet) -> String {
    percent_encode(&charset.encode(text), set).to_string()
}

/// Percent-encode `text`, leaving unreserved characters and the ASCII
/// characters in `extra_safe` literal.
pub fn encode(text: &str, charset: Charset, extra_safe: &str) -> String {
    let bytes = charset.encode(text);
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes.iter() {
        if is_unreserved(b) || (b.is_ascii() && extra_safe.as_bytes().contains(&b)) {
            out.push(b as char);
        } else {
            out.push_str(percent_encode_byte(b));
        }
    }
    out
}

/// Encode a single path segment; `/` is escaped.
pub fn encode_path_segment(text: &str, charset: Charset) -> String {
    encode_with(text, charset, PATH_SEGMENT)
}

/// Encode a whole path; `/` stays literal.
pub fn encode_path(text: &str, charset: Charset) -> String {
    encode_with(text, charset, PATH)
}

/// Encode the user-info part of an authority; `:` stays literal.
pub fn encode_user_info(text: &str, charset: Charset) -> String {
    encode_with(text, charset, USER_INFO)
}

/// Encode free-form query or fragment text, keeping reserved characters.
pub fn encode_uric(text: &str, charset: Charset) -> String {
    encode_with(text, charset, URIC)
}

/// Encode a fragment.
pub fn encode_fragment(text: &str, charset: Charset) -> String {
    encode_uric(text, charset)
}

/// Form-encode a parameter name or value. Space becomes `+`.
pub fn encode_form(text: &str, charset: Charset) -> String {
    encode_with(text, charset, FORM).replace(' ', "+")
}

/// Decode `%XX` escapes. Malformed escapes are kept literally and characters
/// outside ASCII are passed through untouched.
pub fn decode(text: &str, charset: Charset) -> String {
    if !text.contains('%') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let split = rest.find(|c: char| !c.is_ascii()).unwrap_or(rest.len());
        let (ascii, tail) = rest.split_at(split);
        if !ascii.is_empty() {
            let bytes: Vec<u8> = percent_decode(ascii.as_bytes()).collect();
            out.push_str(&charset.decode(&bytes));
        }
        let literal = tail.find(|c: char| c.is_ascii()).unwrap_or(tail.len());
        out.push_str(&tail[..literal]);
        rest = &tail[literal..];
    }
    out
}

/// Decode a form-encoded name or value: `+` is a space, then `%XX` escapes.
pub fn decode_form(text: &str, charset: Charset) -> String {
    decode(&text.replace('+', " "), charset)
}

/// Parse a query string into ordered `(name, value)` pairs split on `&`.
///
/// Duplicates and order are preserved. A token without `=` yields a `None`
/// value; empty tokens are skipped. This undoes [`format`] for every list
/// except one holding `("", None)`, which formats to an empty token and is
/// dropped.
pub fn parse(query: &str, charset: Charset) -> Vec<QueryParam> {
    parse_with_separators(query, charset, &['&'])
}

/// Parse a query string using a custom separator such as `;`.
pub fn parse_with_separator(query: &str, charset: Charset, separator: char) -> Vec<QueryParam> {
    parse_with_separators(query, charset, &[separator])
}

/// Parse a query string, splitting on any of `separators`.
pub fn parse_with_separators(query: &str, charset: Charset, separators: &[char]) -> Vec<QueryParam> {
    query
        .split(|c| separators.contains(&c))
        .filter(|token| !token.is_empty())
        .map(|token| match token.split_once('=') {
            Some((name, value)) => (decode_form(name, charset), Some(decode_form(value, charset))),
            None => (decode_form(token, charset), None),
        })
        .collect()
}

/// Format `(name, value)` pairs as a form-encoded query joined with `&`.
///
/// A pair with an empty name and no value writes nothing between its
/// separators, so [`parse`] does not return it.
pub fn format(params: &[QueryParam], charset: Charset) -> String {
    format_with_separator(params, charset, '&')
}

/// Format `(name, value)` pairs joined with `separator`. A `None` value is
/// written as the bare name.
pub fn format_with_separator(params: &[QueryParam], charset: Charset, separator: char) -> String {
    let mut out = String::new();
    for (name, value) in params {
        if !out.is_empty() {
            out.push(separator);
        }
        out.push_str(&encode_form(name, charset));
        if let Some(value) = value {
            out.push('=');
            out.push_str(&encode_form(value, charset));
        }
    }
    out
}

/// Split a path into decoded segments.
///
/// A leading `/` contributes no segment; every other `/` starts one, so
/// `"/a//b/"` is `["a", "", "b", ""]`.
pub fn parse_path_segments(path: &str, charset: Charset) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    path.split('/').map(|segment| decode(segment, charset)).collect()
}

/// Join segments into a path, prefixing each with `/` and escaping any `/`
/// or space embedded in a segment. Inverse of [`parse_path_segments`].
pub fn format_segments<I, S>(segments: I, charset: Charset) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&encode_path_segment(segment.as_ref(), charset));
    }
    out
}
