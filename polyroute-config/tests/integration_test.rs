//! Integration tests for polyroute-config

use polyroute_config::*;
use polyroute_core::{MatchStatus, Parameters, RequestContext};
use std::env;
use std::fs;
use tempfile::TempDir;

const TOML_MANIFEST: &str = r#"
[router]
base_path = "/app/"

[[routes]]
methods = ["GET"]
pattern = "/"
controller = "Home:run"
name = "home"

[[routes]]
methods = ["GET"]
pattern = "/"
controller = "Home:run"
name = "home"
lang = "cs"

[[routes]]
methods = ["GET"]
pattern = "/blog/(?<slug>[a-z-]+)"
controller = "Blog:show"
name = "post"
"#;

fn write(dir: &TempDir, file: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_toml_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "routes.toml", TOML_MANIFEST);

    let router = ManifestLoader::without_env().load_router(&path).unwrap();
    assert_eq!(router.config().base_path, "/app");
    assert_eq!(router.table().len(), 3);

    let result = router
        .resolve(&RequestContext::new("GET", "/app/blog/hello-world/"))
        .unwrap()
        .into_matched()
        .unwrap();
    assert_eq!(result.status(), MatchStatus::Ok);
    assert_eq!(result.parameters().named("slug"), Some("hello-world"));

    let home = router.uri("home", Some("cs"), &Parameters::new()).unwrap();
    assert_eq!(home.path(), "/app/cs/");
}

#[test]
fn test_load_json_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "routes.json",
        r#"{
            "router": {"default_language": "de", "language_in_path": true},
            "routes": [
                {"methods": ["get"], "pattern": "/kontakt", "controller": "Contact", "name": "contact"}
            ]
        }"#,
    );

    let router = ManifestLoader::without_env().load_router(&path).unwrap();
    let uri = router.uri("contact", None, &Parameters::new()).unwrap();
    assert_eq!(uri.path(), "/de/kontakt/");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "routes.yaml", "routes: []");

    let err = ManifestLoader::without_env().load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ManifestLoader::without_env()
        .load(dir.path().join("absent.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}

#[test]
fn test_env_overrides_router_section() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "routes.toml", TOML_MANIFEST);

    unsafe {
        env::set_var("PRTEST_OVERRIDE_BASE_PATH", "/shop");
        env::set_var("PRTEST_OVERRIDE_LANGUAGE_IN_PATH", "true");
    }

    let manifest = ManifestLoader::with_env_prefix("PRTEST_OVERRIDE")
        .load(&path)
        .unwrap();
    assert_eq!(manifest.router.base_path, "/shop");
    assert!(manifest.router.language_in_path);
    assert_eq!(manifest.router.default_language, "en");

    let router = manifest.build_router().unwrap();
    let home = router.uri("home", None, &Parameters::new()).unwrap();
    assert_eq!(home.path(), "/shop/en/");

    // Cleanup
    unsafe {
        env::remove_var("PRTEST_OVERRIDE_BASE_PATH");
        env::remove_var("PRTEST_OVERRIDE_LANGUAGE_IN_PATH");
    }
}

#[test]
fn test_env_override_rejects_bad_boolean() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "routes.toml", TOML_MANIFEST);

    unsafe {
        env::set_var("PRTEST_BADBOOL_LANGUAGE_IN_PATH", "sometimes");
    }

    let err = ManifestLoader::with_env_prefix("PRTEST_BADBOOL")
        .load(&path)
        .unwrap_err();
    assert!(err.to_string().contains("PRTEST_BADBOOL_LANGUAGE_IN_PATH"));

    unsafe {
        env::remove_var("PRTEST_BADBOOL_LANGUAGE_IN_PATH");
    }
}

#[test]
fn test_dotenv_file_feeds_overrides() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "routes.toml", TOML_MANIFEST);
    let dotenv = write(&dir, ".env", "PRTEST_DOTENV_DEFAULT_LANGUAGE=cs\n");

    let loader = ManifestLoader::with_env_prefix("PRTEST_DOTENV");
    loader.load_dotenv(Some(dotenv.as_path())).unwrap();
    let manifest = loader.load(&manifest).unwrap();
    assert_eq!(manifest.router.default_language, "cs");

    unsafe {
        env::remove_var("PRTEST_DOTENV_DEFAULT_LANGUAGE");
    }
}

#[test]
fn test_env_loader_with_prefix() {
    let loader = EnvLoader::new(Some("PRTEST_LOADER".to_string()));

    unsafe {
        env::set_var("PRTEST_LOADER_BASE_PATH", "/x");
    }

    assert_eq!(loader.load_var("base_path").unwrap(), "/x");
    assert_eq!(loader.load().unwrap().get("base_path").map(String::as_str), Some("/x"));

    unsafe {
        env::remove_var("PRTEST_LOADER_BASE_PATH");
    }
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::ValidationError("routes[3].pattern cannot be empty".to_string());
    let display = format!("{}", err);
    assert!(display.contains("routes[3].pattern"));
}
