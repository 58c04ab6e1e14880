// Router settings supplied by the host

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings that shape registration and resolution.
///
/// All fields have defaults, so a partial TOML/JSON section deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix stripped from request paths and prepended to generated ones.
    pub base_path: String,
    /// Language for routes registered without one, and for paths without a
    /// recognised language prefix.
    pub default_language: String,
    /// Whether default-language routes also carry a `/<lang>` prefix.
    pub language_in_path: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            default_language: "en".to_string(),
            language_in_path: false,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn language_in_path(mut self, enabled: bool) -> Self {
        self.language_in_path = enabled;
        self
    }

    /// Canonical form: base path as `/segment` or empty, language lower-cased.
    pub fn normalized(&self) -> Result<Self> {
        Ok(Self {
            base_path: normalize_base_path(&self.base_path)?,
            default_language: normalize_language(&self.default_language)?,
            language_in_path: self.language_in_path,
        })
    }
}

/// `"app/"`, `"/app"` and `"/app/"` all become `"/app"`; `""` and `"/"` become `""`.
pub fn normalize_base_path(base_path: &str) -> Result<String> {
    if base_path
        .chars()
        .any(|c| c == '?' || c == '#' || c.is_whitespace())
    {
        return Err(Error::InvalidBasePath(base_path.to_string()));
    }

    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

/// Lower-case a language tag, rejecting empty or non `[A-Za-z0-9_-]` tags.
pub fn normalize_language(language: &str) -> Result<String> {
    let language = language.trim();
    if language.is_empty()
        || !language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidLanguage(language.to_string()));
    }
    Ok(language.to_lowercase())
}
