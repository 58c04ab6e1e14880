//! Route pattern grammar and compilation.
//!
//! A route pattern is a slash-delimited regular expression such as
//! `/meow/(?<name>[a-z]+)/([a-z]*)`. Both directions of the router work from
//! the same token stream:
//!
//! - the compiler ([`CompiledPattern::compile`]) normalises slashes, makes the
//!   slash in front of an optional group optional, and anchors the result;
//! - the reverse generator ([`crate::reverse`]) walks the tokens again and
//!   substitutes parameter values for the groups.
//!
//! Only *top-level* groups are tokens. Nested groups stay inside the source of
//! their enclosing group, but still count towards regex capture numbering.
//!
//! # Examples
//!
//! ```
//! use polyroute_core::CompiledPattern;
//!
//! let pattern = CompiledPattern::compile("tag/([a-z]+)?", true).unwrap();
//! assert_eq!(pattern.body(), "/tag/?([a-z]+)?/");
//! assert!(pattern.is_match("/tag/"));
//! assert!(pattern.is_match("/tag/rust/"));
//! ```

use crate::params::Parameters;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;

// ============================================================================
// Tokenizer
// ============================================================================

/// One piece of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Regex text outside any group.
    Literal(&'a str),
    /// A top-level parenthesised group.
    Group(GroupToken<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GroupToken<'a> {
    /// Group source from `(` to the matching `)`, without the optional marker.
    pub source: &'a str,
    pub name: Option<&'a str>,
    /// Regex capture slot, `None` for non-capturing groups like `(?:...)`.
    pub capture: Option<usize>,
    /// Followed by a `?` quantifier.
    pub optional: bool,
}

enum GroupKind<'a> {
    Capturing(Option<&'a str>),
    NonCapturing,
}

/// Split a pattern into literal runs and top-level groups.
///
/// Never fails: unbalanced input yields a best-effort token stream and is
/// rejected later when the regex is built.
pub(crate) fn tokenize(pattern: &str) -> Vec<Token<'_>> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut captures = 0usize;
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => i = skip_class(bytes, i),
            b'(' => {
                if literal_start < i {
                    tokens.push(Token::Literal(&pattern[literal_start..i]));
                }
                let (end, capture, name) = scan_group(pattern, i, &mut captures);
                let optional = bytes.get(end) == Some(&b'?');
                tokens.push(Token::Group(GroupToken {
                    source: &pattern[i..end],
                    name,
                    capture,
                    optional,
                }));
                i = if optional { end + 1 } else { end };
                literal_start = i;
            }
            _ => i += 1,
        }
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&pattern[literal_start..]));
    }

    tokens
}

/// Scan the group opening at `start`. Returns the index just past its closing
/// parenthesis, its capture slot and its name.
fn scan_group<'a>(
    pattern: &'a str,
    start: usize,
    captures: &mut usize,
) -> (usize, Option<usize>, Option<&'a str>) {
    let bytes = pattern.as_bytes();
    let (capture, name) = match group_kind(pattern, start) {
        GroupKind::Capturing(name) => {
            *captures += 1;
            (Some(*captures), name)
        }
        GroupKind::NonCapturing => (None, None),
    };

    let mut depth = 1usize;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => {
                i = skip_class(bytes, i);
                continue;
            }
            b'(' => {
                depth += 1;
                if let GroupKind::Capturing(_) = group_kind(pattern, i) {
                    *captures += 1;
                }
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (i + 1, capture, name);
                }
            }
            _ => {}
        }
        i += 1;
    }

    (bytes.len(), capture, name)
}

fn group_kind(pattern: &str, open: usize) -> GroupKind<'_> {
    let rest = &pattern[open + 1..];
    let Some(after) = rest.strip_prefix('?') else {
        return GroupKind::Capturing(None);
    };

    // `(?<=` and `(?<!` are lookbehinds, not names
    let named = after.strip_prefix("P<").or_else(|| {
        after
            .strip_prefix('<')
            .filter(|s| !s.starts_with(|c: char| c == '=' || c == '!'))
    });

    match named.and_then(|s| s.find('>').map(|end| &s[..end])) {
        Some(name) => GroupKind::Capturing(Some(name)),
        None => GroupKind::NonCapturing,
    }
}

/// Skip a bracketed character class starting at `open`, nested classes included.
fn skip_class(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    if bytes.get(i) == Some(&b'^') {
        i += 1;
    }
    // A leading `]` is a literal member of the class
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => i = skip_class(bytes, i),
            b']' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

// ============================================================================
// Normalisation
// ============================================================================

/// Normalise a raw route pattern without anchoring it.
///
/// 1. Leading and trailing `/` are trimmed.
/// 2. An empty pattern becomes `/`; anything else is wrapped as `/pattern/`.
/// 3. A `/` directly in front of an optional capture group becomes `/?`, so an
///    absent parameter does not require a double slash.
///
/// ```
/// use polyroute_core::pattern::normalize;
///
/// assert_eq!(normalize("about"), "/about/");
/// assert_eq!(normalize("//"), "/");
/// assert_eq!(normalize("/([a-z]+)?/reviews/"), "/?([a-z]+)?/reviews/");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let wrapped = format!("/{trimmed}/");
    let mut out = String::with_capacity(wrapped.len() + 4);

    for token in tokenize(&wrapped) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Group(group) => {
                if group.optional && group.capture.is_some() && out.ends_with('/') {
                    out.push('?');
                }
                out.push_str(group.source);
                if group.optional {
                    out.push('?');
                }
            }
        }
    }

    out
}

// ============================================================================
// Compiled pattern
// ============================================================================

/// A top-level capture group of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    /// Position among the top-level capture groups, starting at 0.
    pub position: usize,
    /// Group name for `(?<name>...)` / `(?P<name>...)`.
    pub name: Option<String>,
    /// Group source, e.g. `([a-z]*)`.
    pub pattern: String,
    /// Whether the group is followed by `?`.
    pub optional: bool,
    /// Capture slot in the compiled regex.
    pub capture_index: usize,
}

/// An anchored route regex plus its case-sensitivity flag.
#[derive(Clone)]
pub struct CompiledPattern {
    body: String,
    source: String,
    sensitive: bool,
    regex: Regex,
    groups: Vec<PatternGroup>,
}

impl CompiledPattern {
    /// Compile a raw route pattern.
    ///
    /// Fails only if the user-supplied regex fragments are malformed.
    pub fn compile(raw: &str, sensitive: bool) -> Result<Self> {
        Self::with_prefix("", raw, sensitive)
    }

    /// Compile a raw route pattern behind a literal path prefix such as `/es`.
    pub fn with_prefix(prefix: &str, raw: &str, sensitive: bool) -> Result<Self> {
        let body = format!("{}{}", regex::escape(prefix), normalize(raw));
        let source = if sensitive {
            format!("^(?:{body})$")
        } else {
            format!("(?i)^(?:{body})$")
        };

        let regex = Regex::new(&source).map_err(|source| Error::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;

        let groups = collect_groups(&body);

        Ok(Self {
            body,
            source,
            sensitive,
            regex,
            groups,
        })
    }

    /// Normalised pattern without anchors or flags, e.g. `/tag/?([a-z]+)?/`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full regex source handed to the regex engine.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Top-level capture groups in declaration order.
    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    /// Structural match against a canonical path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and collect one parameter per top-level capture group.
    ///
    /// Named groups are keyed by name, the others by position. A group that
    /// did not participate in the match yields an empty value.
    pub fn captures(&self, path: &str) -> Option<Parameters> {
        let caps = self.regex.captures(path)?;
        let mut params = Parameters::new();

        for group in &self.groups {
            let value = caps
                .get(group.capture_index)
                .map(|m| m.as_str())
                .unwrap_or("");
            match &group.name {
                Some(name) => params.insert(name.as_str(), value),
                None => params.insert(group.position, value),
            };
        }

        Some(params)
    }
}

fn collect_groups(body: &str) -> Vec<PatternGroup> {
    tokenize(body)
        .into_iter()
        .filter_map(|token| match token {
            Token::Group(group) => group.capture.map(|capture| (group, capture)),
            Token::Literal(_) => None,
        })
        .enumerate()
        .map(|(position, (group, capture_index))| PatternGroup {
            position,
            name: group.name.map(str::to_string),
            pattern: group.source.to_string(),
            optional: group.optional,
            capture_index,
        })
        .collect()
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CompiledPattern {}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("sensitive", &self.sensitive)
            .finish()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
