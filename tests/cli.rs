//
//  pagerduty-cli
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

const LEGACY_TOKEN: &str = "y_NbAkKc66ryYTWUXYEu";

/// Runs `pd` with its configuration directory inside `home`.
fn pd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pd").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("APPDATA", home.path())
        .env_remove("PD_TOKEN")
        .env_remove("PD_PROFILE")
        .env_remove("PD_DEBUG")
        .env("PD_NO_PROMPT", "true");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PagerDuty"))
        .stdout(predicate::str::contains("log"))
        .stdout(predicate::str::contains("rest"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pd version "));
}

#[test]
fn test_invalid_token_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .args(["user", "me", "--token", "definitely not a token"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Invalid token"));
}

#[test]
fn test_missing_token() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .args(["priority", "list", "--profile", "nobody-uses-this-profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody-uses-this-profile"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    pd(&home).args(["config", "set", "batch_size", "10"]).assert().success();
    pd(&home)
        .args(["config", "get", "batch_size"])
        .assert()
        .success()
        .stdout("10\n");

    pd(&home)
        .args(["config", "set", "color", "purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("auto, always, never"));
}

#[test]
fn test_unparseable_since() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .args(["log", "--since", "whenever", "--token", LEGACY_TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not understand the date 'whenever'"));
}

#[test]
fn test_log_help_mentions_strict_dates() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .args(["log", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot be understood"));
}

#[test]
fn test_completion() {
    let home = TempDir::new().unwrap();
    pd(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_pd"));
}

#[test]
fn test_rest_fetch_drains_pages() {
    let mut server = Server::new();
    let first = server
        .mock("GET", "/services")
        .match_query(Matcher::Exact("limit=25&total=true".to_string()))
        .match_header("authorization", format!("Token token={}", LEGACY_TOKEN).as_str())
        .with_status(200)
        .with_body(r#"{"services": [{"id": "S1"}], "more": true, "total": 26, "limit": 25}"#)
        .create();
    let second = server
        .mock("GET", "/services")
        .match_query(Matcher::UrlEncoded("offset".to_string(), "25".to_string()))
        .with_status(200)
        .with_body(r#"{"services": [{"id": "S2"}], "more": false, "total": 26}"#)
        .create();

    let home = TempDir::new().unwrap();
    pd(&home).args(["config", "set", "api_url", &server.url()]).assert().success();

    let output = pd(&home)
        .args(["rest", "fetch", "/services", "--token", LEGACY_TOKEN])
        .output()
        .unwrap();
    assert!(output.status.success());

    let services: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(services, serde_json::json!([{"id": "S1"}, {"id": "S2"}]));
    first.assert();
    second.assert();
}

#[test]
fn test_priorities_not_found_is_empty() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/priorities")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error": {"message": "Not Found", "code": 2100}}"#)
        .create();

    let home = TempDir::new().unwrap();
    pd(&home).args(["config", "set", "api_url", &server.url()]).assert().success();

    pd(&home)
        .args(["priority", "list", "--json", "--token", LEGACY_TOKEN])
        .assert()
        .success()
        .stdout("[]\n");
    mock.assert();
}

#[test]
fn test_api_failures_set_exit_codes() {
    let mut server = Server::new();
    server
        .mock("GET", "/users/PNOPE")
        .with_status(404)
        .with_body(r#"{"error": {"message": "Not Found", "code": 2100}}"#)
        .create();
    server
        .mock("GET", "/users/me")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Unauthorized", "code": 2006}}"#)
        .create();
    server
        .mock("GET", "/incidents")
        .with_status(500)
        .create();

    let home = TempDir::new().unwrap();
    pd(&home).args(["config", "set", "api_url", &server.url()]).assert().success();

    pd(&home)
        .args(["rest", "get", "/users/PNOPE", "--token", LEGACY_TOKEN])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("404 Not Found: Not Found"));
    pd(&home)
        .args(["user", "me", "--token", LEGACY_TOKEN])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("401 Unauthorized"));
    pd(&home)
        .args(["rest", "get", "/incidents", "--token", LEGACY_TOKEN])
        .assert()
        .code(1);
}
