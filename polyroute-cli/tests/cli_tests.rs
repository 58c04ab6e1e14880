//! End-to-end tests for the polyroute binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[router]
base_path = "/app"

[[routes]]
methods = ["GET"]
pattern = "/meow/(?<name>[a-z]+)/([a-z]*)"
controller = "Meow:run"
name = "meow"
sensitive = true

[[routes]]
methods = ["GET"]
pattern = "/about"
controller = "About:show"
name = "about"
middleware = ["Auth:check"]

[[routes]]
methods = ["GET"]
pattern = "/acerca"
controller = "About:show"
name = "about"
lang = "es"

[[routes]]
methods = ["POST"]
pattern = "/about"
controller = "About:update"
"#;

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("routes.toml"), MANIFEST).unwrap();
    dir
}

fn polyroute(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("polyroute").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("POLYROUTE_MANIFEST")
        .env_remove("POLYROUTE_BASE_PATH")
        .env_remove("POLYROUTE_DEFAULT_LANGUAGE")
        .env_remove("POLYROUTE_LANGUAGE_IN_PATH")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_routes_lists_every_language() {
    let dir = setup();
    polyroute(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/meow/(?<name>[a-z]+)/([a-z]*)/"))
        .stdout(predicate::str::contains("/es/acerca/"))
        .stdout(predicate::str::contains("Total routes: 4"));
}

#[test]
fn test_routes_json_filtered_by_language() {
    let dir = setup();
    let output = polyroute(&dir)
        .args(["routes", "--lang", "es", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let routes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let routes = routes.as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["pattern"], "/es/acerca/");
    assert_eq!(routes[0]["controller"], "About:show");
}

#[test]
fn test_match_ok_prints_parameters() {
    let dir = setup();
    polyroute(&dir)
        .args(["match", "GET", "/app/meow/dolly/hi/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("200 OK"))
        .stdout(predicate::str::contains("name = dolly"))
        .stdout(predicate::str::contains("1 = hi"))
        .stdout(predicate::str::contains("Meow:run"));
}

#[test]
fn test_match_json() {
    let dir = setup();
    let output = polyroute(&dir)
        .args(["match", "GET", "/app/about/", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["status"], 200);
    assert_eq!(result["route"], "about");
    assert_eq!(result["middleware"][0], "Auth:check");
    assert_eq!(result["patterns"]["es"], "/es/acerca/");
}

#[test]
fn test_match_method_not_allowed_and_not_found() {
    let dir = setup();
    polyroute(&dir)
        .args(["match", "DELETE", "/app/about/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("405 Method Not Allowed"));

    polyroute(&dir)
        .args(["match", "GET", "/app/nowhere/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("404 Not Found"));
}

#[test]
fn test_match_redirects_non_canonical_path() {
    let dir = setup();
    polyroute(&dir)
        .args(["match", "GET", "/app/about?ref=home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("301"))
        .stdout(predicate::str::contains("/app/about/?ref=home"));
}

#[test]
fn test_match_outside_base_path_fails() {
    let dir = setup();
    polyroute(&dir)
        .args(["match", "GET", "/elsewhere/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base path"));
}

#[test]
fn test_url_generation() {
    let dir = setup();
    polyroute(&dir)
        .args(["url", "meow", "-p", "name=dolly", "-p", "1=hi"])
        .assert()
        .success()
        .stdout("/app/meow/dolly/hi/\n");

    polyroute(&dir)
        .args(["url", "about", "--lang", "es", "--absolute", "--scheme", "https", "--host", "example.com"])
        .assert()
        .success()
        .stdout("https://example.com/app/es/acerca/\n");
}

#[test]
fn test_url_missing_parameter_fails() {
    let dir = setup();
    polyroute(&dir)
        .args(["url", "meow", "-p", "name=dolly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameters"))
        .stderr(predicate::str::contains("#1 ([a-z]*)"));
}

#[test]
fn test_url_unknown_route_fails() {
    let dir = setup();
    polyroute(&dir)
        .args(["url", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No route named 'nope'"));
}

#[test]
fn test_check_reports_summary() {
    let dir = setup();
    polyroute(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 route(s)"))
        .stdout(predicate::str::contains("languages: en, es"));
}

#[test]
fn test_env_override_applies() {
    let dir = setup();
    polyroute(&dir)
        .env("POLYROUTE_BASE_PATH", "/shop")
        .args(["url", "about"])
        .assert()
        .success()
        .stdout("/shop/about/\n");

    polyroute(&dir)
        .env("POLYROUTE_BASE_PATH", "/shop")
        .args(["--no-env", "url", "about"])
        .assert()
        .success()
        .stdout("/app/about/\n");
}

#[test]
fn test_invalid_manifest_names_route() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.json"),
        r#"{"routes": [{"methods": ["GET"], "pattern": "", "controller": "X"}]}"#,
    )
    .unwrap();

    polyroute(&dir)
        .args(["--manifest", "broken.json", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("routes[0].pattern"));
}

#[test]
fn test_missing_manifest_fails() {
    let dir = TempDir::new().unwrap();
    polyroute(&dir)
        .arg("routes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("routes.toml"));
}
