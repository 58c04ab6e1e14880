// Manifest validation

use crate::{ConfigError, Result};
use polyroute_core::RouterConfig;
use polyroute_core::config::{normalize_base_path, normalize_language};

/// HTTP methods a route may declare
pub const HTTP_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
];

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of<T: PartialEq>(value: &T, allowed: &[T], field: &str) -> Result<()> {
        if !allowed.contains(value) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be one of the allowed values",
                field
            )));
        }
        Ok(())
    }

    /// Validate an HTTP method name, case-insensitively
    pub fn is_http_method(value: &str, field: &str) -> Result<()> {
        let upper = value.trim().to_uppercase();
        Self::one_of(&upper.as_str(), HTTP_METHODS, field).map_err(|_| {
            ConfigError::ValidationError(format!(
                "{} has unknown HTTP method '{}'",
                field, value
            ))
        })
    }

    /// Validate a language tag
    pub fn is_language(value: &str, field: &str) -> Result<()> {
        normalize_language(value)
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError(format!("{}: {}", field, e)))
    }

    /// Validate a base path
    pub fn is_base_path(value: &str, field: &str) -> Result<()> {
        normalize_base_path(value)
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError(format!("{}: {}", field, e)))
    }
}

impl Validate for RouterConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_base_path(&self.base_path, "router.base_path")?;
        ConfigValidator::is_language(&self.default_language, "router.default_language")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("value", "field").is_ok());
        assert!(ConfigValidator::not_empty("", "field").is_err());
        assert!(ConfigValidator::not_empty("   ", "field").is_err());
    }

    #[test]
    fn test_one_of_validation() {
        let allowed = vec!["a", "b", "c"];
        assert!(ConfigValidator::one_of(&"a", &allowed, "field").is_ok());
        assert!(ConfigValidator::one_of(&"d", &allowed, "field").is_err());
    }

    #[test]
    fn test_http_method_validation() {
        assert!(ConfigValidator::is_http_method("get", "field").is_ok());
        assert!(ConfigValidator::is_http_method("PATCH", "field").is_ok());
        let err = ConfigValidator::is_http_method("FETCH", "routes[0].methods").unwrap_err();
        assert!(err.to_string().contains("routes[0].methods"));
        assert!(err.to_string().contains("FETCH"));
    }

    #[test]
    fn test_language_and_base_path_validation() {
        assert!(ConfigValidator::is_language("pt-BR", "field").is_ok());
        assert!(ConfigValidator::is_language("", "field").is_err());
        assert!(ConfigValidator::is_base_path("/app/", "field").is_ok());
        assert!(ConfigValidator::is_base_path("/app?x", "field").is_err());
    }

    #[test]
    fn test_router_config_validation() {
        assert!(RouterConfig::default().validate().is_ok());
        let bad = RouterConfig::new().default_language("e n");
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("router.default_language"));
    }
}
