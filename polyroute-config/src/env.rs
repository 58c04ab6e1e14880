// Environment variable overrides for router settings

use crate::{ConfigError, Result};
use polyroute_core::RouterConfig;
use std::collections::HashMap;
use std::env;

/// Default prefix for router environment variables
pub const DEFAULT_PREFIX: &str = "POLYROUTE";

/// Environment variable loader
///
/// With the default prefix, `POLYROUTE_BASE_PATH`, `POLYROUTE_DEFAULT_LANGUAGE`
/// and `POLYROUTE_LANGUAGE_IN_PATH` override a manifest's `[router]` section.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load all environment variables under the prefix, keys lower-cased
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let mut config = HashMap::new();

        for (key, value) in env::vars() {
            if let Some(ref prefix) = self.prefix {
                if let Some(rest) = key.strip_prefix(prefix.as_str()) {
                    config.insert(rest.trim_start_matches('_').to_lowercase(), value);
                }
            } else {
                config.insert(key.to_lowercase(), value);
            }
        }

        Ok(config)
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Overwrite fields of `config` that have a variable set
    pub fn apply(&self, config: &mut RouterConfig) -> Result<()> {
        if let Some(base_path) = self.optional_var("BASE_PATH")? {
            config.base_path = base_path;
        }
        if let Some(language) = self.optional_var("DEFAULT_LANGUAGE")? {
            config.default_language = language;
        }
        if let Some(flag) = self.optional_var("LANGUAGE_IN_PATH")? {
            config.language_in_path = parse_bool(&flag).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "{} must be a boolean, got '{}'",
                    self.full_key("LANGUAGE_IN_PATH"),
                    flag
                ))
            })?;
        }
        Ok(())
    }

    fn optional_var(&self, key: &str) -> Result<Option<String>> {
        match self.load_var(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::EnvError(env::VarError::NotPresent)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PREFIX.to_string()))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // std::env::set_var is unsafe since edition 2024; variables are only set in
    // the integration tests, with names no other test reads.

    #[test]
    fn test_env_loader_with_default() {
        let loader = EnvLoader::new(None);
        let value = loader.load_var_or("NONEXISTENT_VAR_12345", "default");

        assert_eq!(value, "default");
    }

    #[test]
    fn test_env_loader_missing_var() {
        let loader = EnvLoader::new(Some("POLYROUTE_UNIT".to_string()));
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
        assert_eq!(loader.optional_var("MISSING_VAR_67890").unwrap(), None);
    }

    #[test]
    fn test_full_key() {
        assert_eq!(EnvLoader::default().full_key("base_path"), "POLYROUTE_BASE_PATH");
        assert_eq!(EnvLoader::new(None).full_key("base_path"), "BASE_PATH");
    }

    #[test]
    fn test_apply_without_variables_keeps_config() {
        let loader = EnvLoader::new(Some("POLYROUTE_UNSET_PREFIX_4242".to_string()));
        let mut config = RouterConfig::new().base_path("/keep");
        loader.apply(&mut config).unwrap();
        assert_eq!(config.base_path, "/keep");
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
