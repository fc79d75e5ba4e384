//! Matching a [`Pattern`] against one part of a URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::matcher::Pattern;
use crate::error::UrlError;
use crate::types::UrlPart;
use crate::url::parsed::Url;

/// A pattern applied to one [`UrlPart`], or to the whole URL when no part is
/// set.
///
/// # Examples
///
/// ```
/// use urlkit::{Pattern, PatternType, Url, UrlPart, UrlPattern};
///
/// let rule = UrlPattern::new(Some(UrlPart::Hostname), Pattern::new(PatternType::Suffix, "com.cn"));
/// assert!(rule.matches(&Url::parse("http://news.sina.com.cn/x").unwrap()).unwrap());
/// assert!(!rule.matches(&Url::parse("http://www.google.com/").unwrap()).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlPattern {
    #[serde(default)]
    part: Option<UrlPart>,
    pattern: Pattern,
}

impl UrlPattern {
    pub fn new(part: Option<UrlPart>, pattern: Pattern) -> Self {
        UrlPattern { part, pattern }
    }

    /// A pattern matched against the whole URL.
    pub fn whole_url(pattern: Pattern) -> Self {
        Self::new(None, pattern)
    }

    pub fn part(&self) -> Option<UrlPart> {
        self.part
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pattern
    }

    pub fn set_part(&mut self, part: Option<UrlPart>) -> &mut Self {
        self.part = part;
        self
    }

    pub fn set_pattern(&mut self, pattern: Pattern) -> &mut Self {
        self.pattern = pattern;
        self
    }

    /// Extract the configured part of `url` and match it. A part the URL does
    /// not have never matches.
    pub fn matches(&self, url: &Url) -> Result<bool, UrlError> {
        let value = self.part.unwrap_or(UrlPart::Url).extract(url);
        match value {
            Some(value) => self.pattern.matches(&value),
            None => Ok(false),
        }
    }

    /// Parse `text` as a URL and match it.
    pub fn matches_str(&self, text: &str) -> Result<bool, UrlError> {
        self.matches(&Url::parse(text)?)
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.part.unwrap_or(UrlPart::Url), self.pattern)
    }
}
