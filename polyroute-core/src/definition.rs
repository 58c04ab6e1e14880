//! Route declarations and their compiled, immutable form.

use crate::controller::ControllerRef;
use crate::pattern::CompiledPattern;
use crate::{Error, Result};

/// A route as declared by the application, before compilation.
///
/// # Examples
///
/// ```
/// use polyroute_core::RouteBuilder;
///
/// let route = RouteBuilder::new(["GET"], "/meow/(?<name>[a-z]+)/([a-z]*)", "Meow:run")
///     .name("meow")
///     .middleware("Auth:check")
///     .sensitive();
/// ```
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    pub(crate) methods: Vec<String>,
    pub(crate) pattern: String,
    pub(crate) controller: String,
    pub(crate) name: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) middleware: Vec<String>,
    pub(crate) sensitive: bool,
}

impl RouteBuilder {
    pub fn new<I, S>(methods: I, pattern: impl Into<String>, controller: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            methods: methods.into_iter().map(|m| m.as_ref().to_string()).collect(),
            pattern: pattern.into(),
            controller: controller.into(),
            name: None,
            language: None,
            middleware: Vec::new(),
            sensitive: false,
        }
    }

    /// Unique name within the route's language, used for reverse generation.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|n| !n.is_empty());
        self
    }

    /// Language of the route. Omitted means the router's default language.
    pub fn lang(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into()).filter(|l| !l.is_empty());
        self
    }

    /// Append a middleware token. Order is preserved.
    pub fn middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Match the pattern case-sensitively.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Compile into a definition for `language`, behind `prefix` (e.g. `/es`).
    pub(crate) fn build(self, language: String, prefix: &str) -> Result<RouteDefinition> {
        let mut methods: Vec<String> = Vec::with_capacity(self.methods.len());
        for method in &self.methods {
            let method = method.trim().to_lowercase();
            if !method.is_empty() && !methods.contains(&method) {
                methods.push(method);
            }
        }
        if methods.is_empty() {
            return Err(Error::NoMethods(self.pattern));
        }

        let pattern = CompiledPattern::with_prefix(prefix, &self.pattern, self.sensitive)?;

        Ok(RouteDefinition {
            methods,
            pattern,
            raw_pattern: self.pattern,
            controller: ControllerRef::parse(&self.controller),
            name: self.name,
            language,
            middleware: self.middleware,
            sensitive: self.sensitive,
        })
    }
}

/// A compiled route. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    methods: Vec<String>,
    pattern: CompiledPattern,
    raw_pattern: String,
    controller: ControllerRef,
    name: Option<String>,
    language: String,
    middleware: Vec<String>,
    sensitive: bool,
}

impl RouteDefinition {
    /// Lower-cased HTTP methods, never empty.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Case-insensitive method check.
    pub fn allows(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Pattern exactly as declared.
    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    pub fn controller(&self) -> &ControllerRef {
        &self.controller
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn middleware(&self) -> &[String] {
        &self.middleware
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }
}
