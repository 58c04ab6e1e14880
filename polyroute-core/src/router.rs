//! The router: registration plus resolution and reverse generation over one
//! route table.

use crate::config::{RouterConfig, normalize_language};
use crate::definition::{RouteBuilder, RouteDefinition};
use crate::matcher::{Matcher, Resolution};
use crate::params::Parameters;
use crate::request::{Origin, RequestContext};
use crate::reverse::{Generated, ReverseGenerator};
use crate::table::{PatternsByLanguage, RouteTable};
use crate::Result;
use std::sync::Arc;

/// Route registry and resolver.
///
/// Routes are registered up front with [`add`](Self::add); afterwards the
/// router is only read, and can be shared between threads.
///
/// # Examples
///
/// ```
/// use polyroute_core::{MatchStatus, Parameters, RequestContext, RouteBuilder, Router, RouterConfig};
///
/// let mut router = Router::new(RouterConfig::default()).unwrap();
/// router
///     .add(RouteBuilder::new(["GET"], "/meow/(?<name>[a-z]+)/([a-z]*)", "Meow:run").name("meow"))
///     .unwrap();
///
/// let resolution = router.resolve(&RequestContext::new("GET", "/meow/dolly/hi/")).unwrap();
/// let result = resolution.matched().unwrap();
/// assert_eq!(result.status(), MatchStatus::Ok);
/// assert_eq!(result.parameters().named("name"), Some("dolly"));
///
/// let params = Parameters::new().with("name", "dolly").with(1, "hi");
/// let uri = router.uri("meow", None, &params).unwrap();
/// assert_eq!(uri.path(), "/meow/dolly/hi/");
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
    table: RouteTable,
}

impl Router {
    /// Create a router; the configuration is normalised first.
    pub fn new(config: RouterConfig) -> Result<Self> {
        Ok(Self {
            config: config.normalized()?,
            table: RouteTable::new(),
        })
    }

    /// Compile and register a route.
    ///
    /// Routes outside the default language, and every route when
    /// `language_in_path` is set, are compiled behind a `/<lang>` prefix.
    pub fn add(&mut self, route: RouteBuilder) -> Result<Arc<RouteDefinition>> {
        let language = match &route.language {
            Some(language) => normalize_language(language)?,
            None => self.config.default_language.clone(),
        };

        let prefix = if language != self.config.default_language || self.config.language_in_path {
            format!("/{language}")
        } else {
            String::new()
        };

        let definition = route.build(language, &prefix)?;
        tracing::debug!(
            pattern = %definition.pattern(),
            language = %definition.language(),
            name = definition.name().unwrap_or(""),
            "Route registered"
        );
        Ok(self.table.add(definition))
    }

    /// Register several routes, stopping at the first failure.
    pub fn add_all<I>(&mut self, routes: I) -> Result<()>
    where
        I: IntoIterator<Item = RouteBuilder>,
    {
        for route in routes {
            self.add(route)?;
        }
        Ok(())
    }

    pub fn resolve(&self, request: &RequestContext) -> Result<Resolution> {
        Matcher::new(&self.table, &self.config).resolve(request)
    }

    /// `scheme://host` followed by the base path.
    pub fn base_url(&self, origin: &Origin) -> String {
        format!("{}{}", origin, self.config.base_path)
    }

    /// Path of the route `name` in `language` (default language when `None`).
    ///
    /// Returns `None` when no route of that name exists in any language.
    pub fn uri(&self, name: &str, language: Option<&str>, params: &Parameters) -> Option<Generated> {
        let (language, fallback, patterns) = self.lookup(name, language)?;
        Some(self.generator().uri(&patterns, &language, fallback.pattern(), params))
    }

    /// Like [`uri`](Self::uri), prefixed with `origin`.
    pub fn url(
        &self,
        name: &str,
        language: Option<&str>,
        params: &Parameters,
        origin: &Origin,
    ) -> Option<Generated> {
        let (language, fallback, patterns) = self.lookup(name, language)?;
        Some(
            self.generator()
                .url(&patterns, &language, fallback.pattern(), params, origin),
        )
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    fn generator(&self) -> ReverseGenerator<'_> {
        ReverseGenerator::new(&self.config.base_path)
    }

    /// Target language, fallback definition and pattern set of a named route.
    ///
    /// The fallback is the default-language definition, or the first language
    /// that declares the name.
    fn lookup(
        &self,
        name: &str,
        language: Option<&str>,
    ) -> Option<(String, &Arc<RouteDefinition>, PatternsByLanguage)> {
        let language = language
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.config.default_language.clone());

        let fallback = self
            .table
            .named(&self.config.default_language, name)
            .or_else(|| {
                self.table
                    .languages()
                    .find_map(|declared| self.table.named(declared, name))
            })?;

        Some((language, fallback, self.table.patterns_for(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::matcher::MatchStatus;

    fn router(config: RouterConfig) -> Router {
        let mut router = Router::new(config).unwrap();
        router
            .add_all([
                RouteBuilder::new(["get"], "/", "Home:run").name("home"),
                RouteBuilder::new(["get"], "/about", "About:run").name("about"),
                RouteBuilder::new(["get"], "/acerca", "About:run").name("about").lang("es"),
                RouteBuilder::new(["get"], "/", "Home:run").name("home").lang("es"),
            ])
            .unwrap();
        router
    }

    #[test]
    fn test_default_language_has_no_prefix() {
        let router = router(RouterConfig::default());
        let about = router.table().named("en", "about").unwrap();
        assert_eq!(about.pattern().body(), "/about/");
        let acerca = router.table().named("es", "about").unwrap();
        assert_eq!(acerca.pattern().body(), "/es/acerca/");
    }

    #[test]
    fn test_language_in_path_prefixes_default_language() {
        let router = router(RouterConfig::new().language_in_path(true));
        let about = router.table().named("en", "about").unwrap();
        assert_eq!(about.pattern().body(), "/en/about/");
    }

    #[test]
    fn test_language_tag_is_normalised() {
        let mut router = Router::new(RouterConfig::default()).unwrap();
        let def = router
            .add(RouteBuilder::new(["get"], "/x", "X").lang("DE"))
            .unwrap();
        assert_eq!(def.language(), "de");
        assert_eq!(def.pattern().body(), "/de/x/");

        let err = router
            .add(RouteBuilder::new(["get"], "/x", "X").lang("d e"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLanguage(_)));
    }

    #[test]
    fn test_invalid_pattern_fails_registration() {
        let mut router = Router::new(RouterConfig::default()).unwrap();
        let err = router
            .add(RouteBuilder::new(["get"], "/(unclosed", "X"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(router.table().is_empty());
    }

    #[test]
    fn test_resolve_prefixed_language() {
        let router = router(RouterConfig::default());
        let result = router
            .resolve(&RequestContext::new("GET", "/es/acerca/"))
            .unwrap()
            .into_matched()
            .unwrap();
        assert_eq!(result.status(), MatchStatus::Ok);
        assert_eq!(result.language(), "es");
        assert_eq!(result.uri(None, Some("en")).unwrap().path(), "/about/");
    }

    #[test]
    fn test_uri_by_name() {
        let router = router(RouterConfig::new().base_path("/site/"));
        let params = Parameters::new();
        assert_eq!(router.uri("about", None, &params).unwrap().path(), "/site/about/");
        assert_eq!(
            router.uri("about", Some("ES"), &params).unwrap().path(),
            "/site/es/acerca/"
        );
        // Unknown target language falls back to the default-language pattern
        assert_eq!(
            router.uri("about", Some("de"), &params).unwrap().path(),
            "/site/about/"
        );
        assert!(router.uri("missing", None, &params).is_none());
    }

    #[test]
    fn test_url_and_base_url() {
        let router = router(RouterConfig::new().base_path("site"));
        let origin = Origin::new("https", "example.com");
        assert_eq!(router.base_url(&origin), "https://example.com/site");
        assert_eq!(
            router.url("home", Some("es"), &Parameters::new(), &origin).unwrap().path(),
            "https://example.com/site/es/"
        );
    }
}
