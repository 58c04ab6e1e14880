//! Request resolution.
//!
//! Resolution runs in four steps:
//!
//! 1. the configured base path is stripped (a mismatch is a configuration
//!    error, not a miss);
//! 2. a path without exactly one trailing slash yields a [`Redirect`] to its
//!    canonical form;
//! 3. the language is inferred from a two-letter first segment when the
//!    table knows that language, otherwise the default language applies;
//! 4. the language's routes are tried in declaration order and the first
//!    structural match decides the outcome.

use crate::config::RouterConfig;
use crate::controller::ControllerRef;
use crate::definition::RouteDefinition;
use crate::params::Parameters;
use crate::pattern::{CompiledPattern, PatternGroup};
use crate::request::{Origin, RequestContext};
use crate::reverse::{Generated, ReverseGenerator};
use crate::table::{PatternsByLanguage, RouteTable};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

static LANGUAGE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^/([a-z]{2})/").expect("language prefix regex"));

/// Outcome class of a resolution, with HTTP status semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// 200: a route matched and allows the method.
    Ok,
    /// 404: no route matched structurally.
    NotFound,
    /// 405: the first structural match does not allow the method.
    MethodNotAllowed,
}

impl MatchStatus {
    pub fn as_u16(self) -> u16 {
        match self {
            MatchStatus::Ok => 200,
            MatchStatus::NotFound => 404,
            MatchStatus::MethodNotAllowed => 405,
        }
    }

    pub fn is_ok(self) -> bool {
        self == MatchStatus::Ok
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            MatchStatus::Ok => "OK",
            MatchStatus::NotFound => "Not Found",
            MatchStatus::MethodNotAllowed => "Method Not Allowed",
        };
        write!(f, "{} {}", self.as_u16(), reason)
    }
}

/// Redirect to the canonical form of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    /// Base path, canonical path and the original query string.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> u16 {
        301
    }
}

/// What the host should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(MatchResult),
    Redirect(Redirect),
}

impl Resolution {
    pub fn matched(&self) -> Option<&MatchResult> {
        match self {
            Resolution::Matched(result) => Some(result),
            Resolution::Redirect(_) => None,
        }
    }

    pub fn into_matched(self) -> Option<MatchResult> {
        match self {
            Resolution::Matched(result) => Some(result),
            Resolution::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Resolution::Redirect(redirect) => Some(redirect),
            Resolution::Matched(_) => None,
        }
    }
}

/// Result of matching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    status: MatchStatus,
    definition: Option<Arc<RouteDefinition>>,
    parameters: Parameters,
    patterns: PatternsByLanguage,
    language: String,
    base_path: String,
    origin: Origin,
}

impl MatchResult {
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Present for 200 and 405.
    pub fn definition(&self) -> Option<&Arc<RouteDefinition>> {
        self.definition.as_ref()
    }

    pub fn controller(&self) -> Option<&ControllerRef> {
        self.definition.as_deref().map(RouteDefinition::controller)
    }

    pub fn middleware(&self) -> &[String] {
        self.definition
            .as_deref()
            .map(RouteDefinition::middleware)
            .unwrap_or(&[])
    }

    /// Captured parameters; empty unless the status is 200.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Patterns of the matched route name in every language that declares it.
    pub fn patterns_by_language(&self) -> &PatternsByLanguage {
        &self.patterns
    }

    /// Language the request was resolved in.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Pattern of the matched route in `language`.
    pub fn pattern(&self, language: &str) -> Option<&CompiledPattern> {
        self.patterns.get(language).or_else(|| {
            self.definition
                .as_deref()
                .filter(|def| def.language() == language)
                .map(RouteDefinition::pattern)
        })
    }

    /// Capture groups of the matched route in `language`.
    pub fn groups(&self, language: &str) -> Option<&[PatternGroup]> {
        self.pattern(language).map(CompiledPattern::groups)
    }

    /// Path of the matched route in `language` (default: the request's).
    ///
    /// `None` parameters reuse the captured ones. Returns `None` when no
    /// route matched.
    pub fn uri(&self, params: Option<&Parameters>, language: Option<&str>) -> Option<Generated> {
        let definition = self.definition.as_deref()?;
        let params = params.unwrap_or(&self.parameters);
        let language = self.target_language(language);
        Some(ReverseGenerator::new(&self.base_path).uri(
            &self.patterns,
            &language,
            definition.pattern(),
            params,
        ))
    }

    /// Like [`uri`](Self::uri), prefixed with the request's origin.
    pub fn url(&self, params: Option<&Parameters>, language: Option<&str>) -> Option<Generated> {
        let definition = self.definition.as_deref()?;
        let params = params.unwrap_or(&self.parameters);
        let language = self.target_language(language);
        Some(ReverseGenerator::new(&self.base_path).url(
            &self.patterns,
            &language,
            definition.pattern(),
            params,
            &self.origin,
        ))
    }

    fn target_language(&self, language: Option<&str>) -> String {
        language
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.language.clone())
    }
}

/// Matches requests against a route table.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    table: &'a RouteTable,
    config: &'a RouterConfig,
}

impl<'a> Matcher<'a> {
    /// `config` must already be normalised.
    pub fn new(table: &'a RouteTable, config: &'a RouterConfig) -> Self {
        Self { table, config }
    }

    pub fn resolve(&self, request: &RequestContext) -> Result<Resolution> {
        let base_path = self.config.base_path.as_str();
        let path = strip_base_path(request.path_only(), base_path)?;

        if !is_canonical(path) {
            let mut location = format!("{}{}", base_path, canonicalize(path));
            if let Some(query) = request.query().filter(|q| !q.is_empty()) {
                location.push('?');
                location.push_str(query);
            }
            tracing::debug!(path = %request.path, location = %location, "Redirecting to canonical path");
            return Ok(Resolution::Redirect(Redirect { location }));
        }

        let language = detect_language(path, self.table, &self.config.default_language);
        tracing::debug!(
            method = %request.method,
            path = %path,
            language = %language,
            "Resolving request"
        );

        let mut result = MatchResult {
            status: MatchStatus::NotFound,
            definition: None,
            parameters: Parameters::new(),
            patterns: PatternsByLanguage::new(),
            language,
            base_path: base_path.to_string(),
            origin: request.origin.clone(),
        };

        for definition in self.table.routes(&result.language) {
            tracing::trace!(pattern = %definition.pattern(), "Trying route");
            let Some(parameters) = definition.pattern().captures(path) else {
                continue;
            };

            result.definition = Some(Arc::clone(definition));
            if definition.allows(&request.method) {
                result.status = MatchStatus::Ok;
                result.parameters = parameters;
                if let Some(name) = definition.name() {
                    result.patterns = self.table.patterns_for(name);
                    // The matched route stands for its language even if the name was re-registered
                    result
                        .patterns
                        .insert(definition.language().to_string(), definition.pattern().clone());
                }
            } else {
                result.status = MatchStatus::MethodNotAllowed;
            }
            break;
        }

        tracing::debug!(status = result.status.as_u16(), "Request resolved");
        Ok(Resolution::Matched(result))
    }
}

/// Remove `base_path` from `path`; the remainder is empty or starts with `/`.
fn strip_base_path<'p>(path: &'p str, base_path: &str) -> Result<&'p str> {
    if base_path.is_empty() {
        return Ok(path);
    }
    match path.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => Ok(rest),
        _ => Err(Error::BasePathMismatch {
            path: path.to_string(),
            base_path: base_path.to_string(),
        }),
    }
}

/// Ends in exactly one `/`.
fn is_canonical(path: &str) -> bool {
    path.ends_with('/') && !path.ends_with("//")
}

/// Collapse slash runs and force one leading and one trailing slash.
///
/// ```
/// use polyroute_core::matcher::canonicalize;
///
/// assert_eq!(canonicalize("//foo///"), "/foo/");
/// assert_eq!(canonicalize("/foo/"), "/foo/");
/// assert_eq!(canonicalize(""), "/");
/// ```
pub fn canonicalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push_str(segment);
        out.push('/');
    }
    out
}

/// Language of a canonical path: its two-letter first segment when the table
/// knows it, `default_language` otherwise.
pub fn detect_language(path: &str, table: &RouteTable, default_language: &str) -> String {
    LANGUAGE_PREFIX
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|language| table.knows_language(language))
        .unwrap_or_else(|| default_language.to_string())
}
