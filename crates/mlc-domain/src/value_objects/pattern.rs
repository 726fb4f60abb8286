//! Key templates and resource-family caching policy
//!
//! A key template is a cache key with `{placeholder}` tokens and `*`
//! wildcard segments, e.g. `tasks:{userId}:*`. The same grammar is used for
//! invalidation patterns, so a resolved template doubles as a pattern.
//!
//! ## Matching
//!
//! | Token | Matches |
//! |-------|---------|
//! | literal | itself, exactly |
//! | `{name}` | any run of characters without the segment delimiter |
//! | `*` | any run of characters without the segment delimiter |
//! | trailing `*` | the whole remaining suffix, delimiters included |
//! | `\c` | the character `c`, even `{`, `}`, `*` or `\` |
//!
//! Matching is anchored: the whole key must match, never a substring.
//! [`KeyPattern::fill`] escapes the values it substitutes, so a scope
//! value such as `*` or `4{2` only ever matches itself.

use crate::constants::{
    KEY_SEGMENT_DELIMITER, KEY_WILDCARD, PATTERN_ESCAPE, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN,
};
use crate::error::{Error, Result};
use crate::value_objects::CacheKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

/// Placeholder values keyed by placeholder name (`userId` -> `42`)
pub type ScopeParams = BTreeMap<String, String>;

/// What to do when a placeholder has no supplied value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParams {
    /// Fail with `Error::MissingParameter`
    Reject,
    /// Substitute `*`, widening the pattern
    Widen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(String),
    Wildcard,
}

/// Compiled key template / invalidation pattern
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    delimiter: char,
    tokens: Vec<Token>,
    matcher: Regex,
}

impl KeyPattern {
    /// Compile a pattern using the default `:` segment delimiter
    pub fn parse(source: &str) -> Result<Self> {
        Self::with_delimiter(source, KEY_SEGMENT_DELIMITER)
    }

    /// Compile a pattern with a custom segment delimiter
    pub fn with_delimiter(source: &str, delimiter: char) -> Result<Self> {
        let tokens = tokenize(source, delimiter)?;
        let matcher = build_matcher(source, &tokens, delimiter)?;
        Ok(Self {
            source: source.to_string(),
            delimiter,
            tokens,
            matcher,
        })
    }

    /// The pattern text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Segment delimiter used for matching
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// True when the pattern is a plain key with no placeholder or wildcard
    pub fn is_exact(&self) -> bool {
        self.tokens.iter().all(|t| matches!(t, Token::Literal(_)))
    }

    /// The single key an exact pattern matches, escapes removed
    pub fn literal_key(&self) -> Option<String> {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Literal(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Placeholder(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Number of literal characters, used to rank competing templates
    pub fn literal_len(&self) -> usize {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Literal(s) => s.chars().count(),
                _ => 0,
            })
            .sum()
    }

    /// Anchored whole-key match
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// Substitute placeholders from `params`, producing pattern text
    ///
    /// Wildcards are kept, so a template with `*` yields a pattern rather
    /// than a concrete key. Literals and supplied values are escaped, so
    /// parsing the result matches them character for character.
    pub fn fill(&self, params: &ScopeParams, missing: MissingParams) -> Result<String> {
        self.substitute(params, missing, true)
    }

    /// Substitute every placeholder, failing on the first missing one
    pub fn resolve(&self, params: &ScopeParams) -> Result<CacheKey> {
        self.substitute(params, MissingParams::Reject, false)
            .map(CacheKey::from)
    }

    fn substitute(
        &self,
        params: &ScopeParams,
        missing: MissingParams,
        escape: bool,
    ) -> Result<String> {
        let push = |out: &mut String, text: &str| {
            if escape {
                push_escaped(out, text);
            } else {
                out.push_str(text);
            }
        };

        let mut out = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token {
                Token::Literal(s) => push(&mut out, s),
                Token::Wildcard => out.push(KEY_WILDCARD),
                Token::Placeholder(name) => match (params.get(name), missing) {
                    (Some(value), _) => push(&mut out, value),
                    (None, MissingParams::Widen) => out.push(KEY_WILDCARD),
                    (None, MissingParams::Reject) => {
                        return Err(Error::missing_parameter(&self.source, name));
                    }
                },
            }
        }
        Ok(out)
    }

    /// Glob for a Redis `SCAN MATCH`
    ///
    /// Redis globs let `*` cross delimiters, so the result is a superset of
    /// [`Self::matches`]; callers re-filter scan results with `matches`.
    pub fn to_scan_glob(&self) -> String {
        let mut glob = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token {
                Token::Literal(s) => {
                    for c in s.chars() {
                        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                            glob.push('\\');
                        }
                        glob.push(c);
                    }
                }
                Token::Placeholder(_) | Token::Wildcard => glob.push('*'),
            }
        }
        glob
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.delimiter == other.delimiter
    }
}

impl Eq for KeyPattern {}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Append `text` so that it tokenizes back to the same literal
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, PLACEHOLDER_OPEN | PLACEHOLDER_CLOSE | KEY_WILDCARD | PATTERN_ESCAPE) {
            out.push(PATTERN_ESCAPE);
        }
        out.push(c);
    }
}

fn tokenize(source: &str, delimiter: char) -> Result<Vec<Token>> {
    if source.is_empty() {
        return Err(Error::invalid_pattern(source, "pattern cannot be empty"));
    }

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match c {
            PLACEHOLDER_OPEN => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == PLACEHOLDER_CLOSE {
                        closed = true;
                        break;
                    }
                    if matches!(n, PLACEHOLDER_OPEN | KEY_WILDCARD | PATTERN_ESCAPE) || n == delimiter {
                        return Err(Error::invalid_pattern(
                            source,
                            format!("unexpected '{n}' inside placeholder"),
                        ));
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(Error::invalid_pattern(source, "unclosed placeholder"));
                }
                if name.is_empty() {
                    return Err(Error::invalid_pattern(source, "empty placeholder name"));
                }
                tokens.push(Token::Placeholder(name));
            }
            PLACEHOLDER_CLOSE => {
                return Err(Error::invalid_pattern(source, "unmatched '}'"));
            }
            KEY_WILDCARD => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Wildcard);
            }
            PATTERN_ESCAPE => match chars.next() {
                Some(escaped) => literal.push(escaped),
                None => return Err(Error::invalid_pattern(source, "dangling escape")),
            },
            other => literal.push(other),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn build_matcher(source: &str, tokens: &[Token], delimiter: char) -> Result<Regex> {
    let segment = format!("[^{}]*", regex::escape(&delimiter.to_string()));
    let last = tokens.len().saturating_sub(1);

    let mut expr = String::from("^");
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(s) => expr.push_str(&regex::escape(s)),
            Token::Placeholder(_) => expr.push_str(&segment),
            Token::Wildcard if i == last => expr.push_str(".*"),
            Token::Wildcard => expr.push_str(&segment),
        }
    }
    expr.push('$');

    Regex::new(&expr).map_err(|e| Error::invalid_pattern(source, e.to_string()))
}

/// Caching policy for one logical resource family
///
/// # Example
///
/// ```
/// use mlc_domain::value_objects::PatternDefinition;
///
/// let tasks = PatternDefinition::new("task_list_page", "tasks:{userId}:*", 600)
///     .invalidated_by("task.update")
///     .invalidated_by("task.delete");
/// assert!(tasks.is_invalidated_by("task.update"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternDefinition {
    /// Unique name of the resource family
    pub name: String,
    /// Key template with `{placeholder}` and `*` tokens
    pub key_template: String,
    /// TTL applied to keys of this family
    pub ttl_secs: u64,
    /// Whether `warm` should pre-populate this family
    #[serde(default)]
    pub warming_enabled: bool,
    /// Mutation events that invalidate this family
    #[serde(default)]
    pub invalidating_events: BTreeSet<String>,
}

impl PatternDefinition {
    /// Create a definition with no warming and no invalidating events
    pub fn new<N: Into<String>, T: Into<String>>(name: N, key_template: T, ttl_secs: u64) -> Self {
        Self {
            name: name.into(),
            key_template: key_template.into(),
            ttl_secs,
            warming_enabled: false,
            invalidating_events: BTreeSet::new(),
        }
    }

    /// Enable or disable warming
    pub fn with_warming(mut self, enabled: bool) -> Self {
        self.warming_enabled = enabled;
        self
    }

    /// Add an invalidating mutation event
    pub fn invalidated_by<S: Into<String>>(mut self, event_name: S) -> Self {
        self.invalidating_events.insert(event_name.into());
        self
    }

    /// TTL as a `Duration`
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Whether `event_name` invalidates this family
    pub fn is_invalidated_by(&self, event_name: &str) -> bool {
        self.invalidating_events.contains(event_name)
    }

    /// Compile the key template
    pub fn compile(&self) -> Result<KeyPattern> {
        KeyPattern::parse(&self.key_template)
    }
}
