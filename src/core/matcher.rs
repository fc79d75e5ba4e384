//! String matching rules: literal, prefix, suffix, glob and regex.
//!
//! A [`Pattern`] holds its rule as a tagged union that is rebuilt whenever
//! the type, expression or case sensitivity changes. Globs and regexes are
//! compiled on first use and the compiled matcher lives inside the rule, so
//! no stale matcher can survive a change.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::UrlError;

/// How a pattern's expression is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternType {
    /// Exact equality.
    #[default]
    Literal,
    /// The candidate starts with the expression.
    Prefix,
    /// The candidate ends with the expression.
    Suffix,
    /// Shell-style wildcards: `*` is any run of characters, `?` exactly one.
    /// The whole candidate must match.
    Glob,
    /// A regular expression searched for anywhere in the candidate; use
    /// `^`/`$` to anchor.
    Regex,
}

impl PatternType {
    pub fn name(&self) -> &'static str {
        match self {
            PatternType::Literal => "LITERAL",
            PatternType::Prefix => "PREFIX",
            PatternType::Suffix => "SUFFIX",
            PatternType::Glob => "GLOB",
            PatternType::Regex => "REGEX",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternType {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LITERAL" => Ok(PatternType::Literal),
            "PREFIX" => Ok(PatternType::Prefix),
            "SUFFIX" => Ok(PatternType::Suffix),
            "GLOB" => Ok(PatternType::Glob),
            "REGEX" => Ok(PatternType::Regex),
            _ => Err(UrlError::InvalidArgument {
                name: "type",
                reason: format!("unknown pattern type {}", s),
            }),
        }
    }
}

/// A glob or regex with its lazily compiled matcher.
#[derive(Debug, Clone)]
struct Compiled {
    expression: String,
    case_sensitive: bool,
    matcher: OnceLock<Result<Regex, UrlError>>,
}

impl Compiled {
    fn new(expression: String, case_sensitive: bool) -> Self {
        Compiled {
            expression,
            case_sensitive,
            matcher: OnceLock::new(),
        }
    }

    fn get(&self, source: impl FnOnce(&str) -> String) -> Result<&Regex, UrlError> {
        self.matcher
            .get_or_init(|| {
                let source = source(&self.expression);
                trace!(expression = %self.expression, regex = %source, "compiling pattern");
                RegexBuilder::new(&source)
                    .case_insensitive(!self.case_sensitive)
                    .build()
                    .map_err(|err| {
                        debug!(expression = %self.expression, error = %err, "pattern does not compile");
                        UrlError::InvalidPattern {
                            expression: self.expression.clone(),
                            reason: err.to_string(),
                        }
                    })
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

#[derive(Debug, Clone)]
enum Rule {
    Literal(String),
    Prefix(String),
    Suffix(String),
    Glob(Compiled),
    Regex(Compiled),
}

impl Rule {
    fn new(kind: PatternType, expression: String, case_sensitive: bool) -> Rule {
        match kind {
            PatternType::Literal => Rule::Literal(expression),
            PatternType::Prefix => Rule::Prefix(expression),
            PatternType::Suffix => Rule::Suffix(expression),
            PatternType::Glob => Rule::Glob(Compiled::new(expression, case_sensitive)),
            PatternType::Regex => Rule::Regex(Compiled::new(expression, case_sensitive)),
        }
    }

    fn kind(&self) -> PatternType {
        match self {
            Rule::Literal(_) => PatternType::Literal,
            Rule::Prefix(_) => PatternType::Prefix,
            Rule::Suffix(_) => PatternType::Suffix,
            Rule::Glob(_) => PatternType::Glob,
            Rule::Regex(_) => PatternType::Regex,
        }
    }

    fn expression(&self) -> &str {
        match self {
            Rule::Literal(e) | Rule::Prefix(e) | Rule::Suffix(e) => e,
            Rule::Glob(c) | Rule::Regex(c) => &c.expression,
        }
    }
}

/// Translate a glob into an anchored regular expression.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push_str("(?s)^");
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// A matching rule: a [`PatternType`] and an expression.
///
/// The default pattern is an empty literal, matching only the empty string.
///
/// # Examples
///
/// ```
/// use urlkit::{Pattern, PatternType};
///
/// let glob = Pattern::new(PatternType::Glob, "www.*");
/// assert!(glob.matches("www.sina.com").unwrap());
/// assert!(!glob.matches("news.sina.com").unwrap());
///
/// let bad = Pattern::new(PatternType::Regex, "(unclosed");
/// assert!(bad.matches("anything").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "PatternRepr", from = "PatternRepr")]
pub struct Pattern {
    rule: Rule,
    case_sensitive: bool,
}

#[derive(Serialize, Deserialize)]
struct PatternRepr {
    #[serde(rename = "type", default)]
    kind: PatternType,
    #[serde(default)]
    expression: String,
    #[serde(default = "case_sensitive_default")]
    case_sensitive: bool,
}

fn case_sensitive_default() -> bool {
    true
}

impl From<Pattern> for PatternRepr {
    fn from(pattern: Pattern) -> Self {
        PatternRepr {
            kind: pattern.pattern_type(),
            expression: pattern.expression().to_string(),
            case_sensitive: pattern.case_sensitive,
        }
    }
}

impl From<PatternRepr> for Pattern {
    fn from(repr: PatternRepr) -> Self {
        let mut pattern = Pattern::new(repr.kind, repr.expression);
        pattern.set_case_sensitive(repr.case_sensitive);
        pattern
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::new(PatternType::Literal, "")
    }
}

impl Pattern {
    /// A case-sensitive pattern. Globs and regexes are not compiled until
    /// the first match.
    pub fn new(kind: PatternType, expression: impl Into<String>) -> Self {
        Pattern {
            rule: Rule::new(kind, expression.into(), true),
            case_sensitive: true,
        }
    }

    pub fn literal(expression: impl Into<String>) -> Self {
        Self::new(PatternType::Literal, expression)
    }

    pub fn prefix(expression: impl Into<String>) -> Self {
        Self::new(PatternType::Prefix, expression)
    }

    pub fn suffix(expression: impl Into<String>) -> Self {
        Self::new(PatternType::Suffix, expression)
    }

    pub fn glob(expression: impl Into<String>) -> Self {
        Self::new(PatternType::Glob, expression)
    }

    pub fn regex(expression: impl Into<String>) -> Self {
        Self::new(PatternType::Regex, expression)
    }

    pub fn pattern_type(&self) -> PatternType {
        self.rule.kind()
    }

    pub fn expression(&self) -> &str {
        self.rule.expression()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn set_type(&mut self, kind: PatternType) -> &mut Self {
        self.rule = Rule::new(kind, self.expression().to_string(), self.case_sensitive);
        self
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.rule = Rule::new(self.pattern_type(), expression.into(), self.case_sensitive);
        self
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) -> &mut Self {
        self.case_sensitive = case_sensitive;
        self.rule = Rule::new(self.pattern_type(), self.expression().to_string(), case_sensitive);
        self
    }

    /// Compile the matcher now instead of on the first match.
    pub fn compile(&self) -> Result<(), UrlError> {
        match &self.rule {
            Rule::Glob(compiled) => compiled.get(glob_to_regex).map(|_| ()),
            Rule::Regex(compiled) => compiled.get(str::to_string).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Whether `candidate` matches. Fails if a glob or regex does not compile.
    pub fn matches(&self, candidate: &str) -> Result<bool, UrlError> {
        let folded = |s: &str| if self.case_sensitive { s.to_string() } else { s.to_lowercase() };
        match &self.rule {
            Rule::Literal(e) => Ok(folded(candidate) == folded(e)),
            Rule::Prefix(e) => Ok(folded(candidate).starts_with(&folded(e))),
            Rule::Suffix(e) => Ok(folded(candidate).ends_with(&folded(e))),
            Rule::Glob(compiled) => Ok(compiled.get(glob_to_regex)?.is_match(candidate)),
            Rule::Regex(compiled) => Ok(compiled.get(str::to_string)?.is_match(candidate)),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern_type() == other.pattern_type()
            && self.expression() == other.expression()
            && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern_type().hash(state);
        self.expression().hash(state);
        self.case_sensitive.hash(state);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pattern_type(), self.expression())
    }
}
