//! Reverse generation: parameters in, canonical path or absolute URL out.
//!
//! The generator walks the same token stream the compiler produced
//! ([`crate::pattern`]), so every path it returns is one the matcher accepts
//! for the same parameters.
//!
//! - Named groups take only the value of the matching named parameter.
//! - Unnamed groups take positional values in ascending position order.
//! - A missing optional group is dropped together with the `/` after it.
//! - A missing required group is reported and the whole path is withheld.
//! - Non-capturing groups are written out when their contents are plain text
//!   and inline flag groups like `(?i)` vanish. Any other non-capturing group
//!   cannot be produced from parameters and is reported like a missing group.

use crate::params::Parameters;
use crate::pattern::{CompiledPattern, Token, tokenize};
use crate::request::Origin;
use crate::table::PatternsByLanguage;
use std::collections::HashMap;
use std::fmt;

/// A required group left without a value.
///
/// Non-capturing groups that match more than one string (`(?:a|b)`) are
/// reported too, with `name` unset and `position` of the next capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParameter {
    /// Position among the pattern's top-level capture groups.
    pub position: usize,
    pub name: Option<String>,
    /// Group source, e.g. `([a-z]*)`.
    pub pattern: String,
}

impl fmt::Display for MissingParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#{} '{}' {}", self.position, name, self.pattern),
            None => write!(f, "#{} {}", self.position, self.pattern),
        }
    }
}

/// Result of a reverse generation.
///
/// `path` is empty whenever `missing` is not; partial paths are never returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    path: String,
    missing: Vec<MissingParameter>,
}

impl Generated {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn missing(&self) -> &[MissingParameter] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn into_result(self) -> Result<String, Vec<MissingParameter>> {
        if self.missing.is_empty() {
            Ok(self.path)
        } else {
            Err(self.missing)
        }
    }

    fn absolute(mut self, origin: &Origin) -> Self {
        if self.is_complete() {
            self.path = format!("{}{}", origin, self.path);
        }
        self
    }
}

/// Builds paths and URLs from compiled patterns.
#[derive(Debug, Clone, Copy)]
pub struct ReverseGenerator<'a> {
    base_path: &'a str,
}

impl<'a> ReverseGenerator<'a> {
    /// `base_path` is prepended verbatim; pass a normalised one.
    pub fn new(base_path: &'a str) -> Self {
        Self { base_path }
    }

    /// Generate with the pattern of `target_language`, or `fallback` when the
    /// route has no variant in that language.
    pub fn uri(
        &self,
        patterns: &PatternsByLanguage,
        target_language: &str,
        fallback: &CompiledPattern,
        params: &Parameters,
    ) -> Generated {
        let pattern = patterns.get(target_language).unwrap_or(fallback);
        self.generate(pattern, params)
    }

    /// Like [`uri`](Self::uri), prefixed with `scheme://host`.
    pub fn url(
        &self,
        patterns: &PatternsByLanguage,
        target_language: &str,
        fallback: &CompiledPattern,
        params: &Parameters,
        origin: &Origin,
    ) -> Generated {
        self.uri(patterns, target_language, fallback, params)
            .absolute(origin)
    }

    /// Substitute `params` into one pattern.
    pub fn generate(&self, pattern: &CompiledPattern, params: &Parameters) -> Generated {
        let named: HashMap<&str, &str> = params.named_values().collect();
        let mut positional = params.positional_values();

        let mut path = String::with_capacity(self.base_path.len() + pattern.body().len());
        path.push_str(self.base_path);

        let mut missing = Vec::new();
        let mut position = 0;
        let mut drop_slash = false;

        for token in tokenize(pattern.body()) {
            match token {
                Token::Literal(text) => {
                    let text = if drop_slash {
                        text.strip_prefix('/').unwrap_or(text)
                    } else {
                        text
                    };
                    drop_slash = false;
                    push_literal(&mut path, text);
                }
                Token::Group(group) if group.capture.is_none() => {
                    drop_slash = false;
                    match fixed_text(group.source) {
                        Some(text) => path.push_str(&text),
                        None => missing.push(MissingParameter {
                            position,
                            name: None,
                            pattern: group.source.to_string(),
                        }),
                    }
                }
                Token::Group(group) => {
                    let value = match group.name {
                        Some(name) => named.get(name).copied(),
                        None => positional.next(),
                    }
                    .filter(|value| !value.is_empty());

                    drop_slash = false;
                    match value {
                        Some(value) => path.push_str(value),
                        None if group.optional => drop_slash = true,
                        None => missing.push(MissingParameter {
                            position,
                            name: group.name.map(str::to_string),
                            pattern: group.source.to_string(),
                        }),
                    }
                    position += 1;
                }
            }
        }

        if !missing.is_empty() {
            tracing::trace!(
                pattern = %pattern.body(),
                missing = missing.len(),
                "Required route parameters not supplied"
            );
            path.clear();
        }

        Generated { path, missing }
    }
}

/// Append regex literal text with anchors, optional markers and escapes removed.
fn push_literal(out: &mut String, text: &str) {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '?' | '^' | '$' => {}
            _ => out.push(c),
        }
    }
}

/// The only text a non-capturing group can match, if it is plain.
///
/// `(?:abc)` and `(?i:abc)` give `abc`, flag groups like `(?i)` give an empty
/// string. Groups with alternation, classes or quantifiers give `None`.
fn fixed_text(source: &str) -> Option<String> {
    let inner = source.strip_prefix("(?")?.strip_suffix(')')?;
    let is_flags = |flags: &str| flags.chars().all(|c| c.is_ascii_alphabetic() || c == '-');

    let body = match inner.split_once(':') {
        Some((flags, body)) if is_flags(flags) => body,
        None if is_flags(inner) => return Some(String::new()),
        _ => return None,
    };

    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) if !escaped.is_ascii_alphanumeric() => text.push(escaped),
                _ => return None,
            },
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' => {
                return None;
            }
            _ => text.push(c),
        }
    }
    Some(text)
}
