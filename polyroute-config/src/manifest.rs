//! Route manifests: router settings plus route declarations in one file.
//!
//! ```toml
//! [router]
//! base_path = "/app"
//! default_language = "en"
//!
//! [[routes]]
//! methods = ["GET"]
//! pattern = "/meow/(?<name>[a-z]+)/([a-z]*)"
//! controller = "Meow:run"
//! name = "meow"
//! sensitive = true
//! middleware = ["Auth:check"]
//! ```

use crate::env::EnvLoader;
use crate::loader::{ConfigLoader, FileFormat};
use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, Result};
use polyroute_core::{RouteBuilder, Router, RouterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declared route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub methods: Vec<String>,
    pub pattern: String,
    pub controller: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<String>,
}

impl RouteEntry {
    pub fn to_builder(&self) -> RouteBuilder {
        let mut builder = RouteBuilder::new(&self.methods, &self.pattern, &self.controller);
        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(lang) = &self.lang {
            builder = builder.lang(lang);
        }
        for middleware in &self.middleware {
            builder = builder.middleware(middleware);
        }
        if self.sensitive {
            builder = builder.sensitive();
        }
        builder
    }

    fn validate_at(&self, index: usize) -> Result<()> {
        let field = |name: &str| format!("routes[{}].{}", index, name);

        if self.methods.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field("methods")
            )));
        }
        for method in &self.methods {
            ConfigValidator::is_http_method(method, &field("methods"))?;
        }
        ConfigValidator::not_empty(&self.pattern, &field("pattern"))?;
        ConfigValidator::not_empty(&self.controller, &field("controller"))?;
        if let Some(name) = &self.name {
            ConfigValidator::not_empty(name, &field("name"))?;
        }
        if let Some(lang) = &self.lang {
            ConfigValidator::is_language(lang, &field("lang"))?;
        }
        for middleware in &self.middleware {
            ConfigValidator::not_empty(middleware, &field("middleware"))?;
        }
        Ok(())
    }
}

/// Router settings and routes, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteManifest {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Parse a manifest without environment overrides.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let manifest = Self::from_value(ConfigLoader::new(format).parse(content)?)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Register every route, in file order.
    ///
    /// A route that fails to compile is reported with its index.
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::new(self.router.clone())?;
        for (index, entry) in self.routes.iter().enumerate() {
            router
                .add(entry.to_builder())
                .map_err(|source| ConfigError::Route { index, source })?;
        }
        Ok(router)
    }
}

impl Validate for RouteManifest {
    fn validate(&self) -> Result<()> {
        self.router.validate()?;
        for (index, entry) in self.routes.iter().enumerate() {
            entry.validate_at(index)?;
        }
        Ok(())
    }
}

/// Loads manifests from disk and applies environment overrides.
pub struct ManifestLoader {
    env: Option<EnvLoader>,
}

impl ManifestLoader {
    /// Loader applying `POLYROUTE_*` overrides
    pub fn new() -> Self {
        Self {
            env: Some(EnvLoader::default()),
        }
    }

    /// Use a different variable prefix
    pub fn with_env_prefix(prefix: impl Into<String>) -> Self {
        Self {
            env: Some(EnvLoader::new(Some(prefix.into()))),
        }
    }

    /// Ignore the environment
    pub fn without_env() -> Self {
        Self { env: None }
    }

    /// Load a `.env` file into the process environment
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
        }
        Ok(())
    }

    /// Read, override and validate a manifest; format from the extension
    pub fn load(&self, path: impl AsRef<Path>) -> Result<RouteManifest> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        let mut manifest = RouteManifest::from_value(value)?;

        if let Some(env) = &self.env {
            env.apply(&mut manifest.router)?;
        }

        manifest.validate()?;
        Ok(manifest)
    }

    /// [`load`](Self::load) followed by [`RouteManifest::build_router`]
    pub fn load_router(&self, path: impl AsRef<Path>) -> Result<Router> {
        self.load(path)?.build_router()
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}
