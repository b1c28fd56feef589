//! Binary smoke tests: the `appup` executable against a temp config and the
//! in-process release endpoint.

use crate::support::{self, CannedResponse};
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

/// Write a config pointing at `release_url` with `app_root` as the managed
/// installation, and return its path.
fn write_config(dir: &Path, release_url: &str, app_root: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    let contents = format!(
        "release_url = \"{release_url}\"\nrequest_timeout = 5\napp_root = \"{}\"\n",
        app_root.display()
    );
    std::fs::write(&path, contents).unwrap();
    path
}

fn appup(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("appup").unwrap();
    cmd.env("APPUP_CONFIG", config)
        .env("APPUP_NO_PROGRESS", "1")
        .env_remove("APPUP_RELEASE_URL")
        .env_remove("APPUP_LICENSE_KEY");
    cmd
}

#[test]
fn help_lists_both_commands() {
    Command::cargo_bin("appup")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("update"));
}

#[test]
fn check_reports_available_update() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    std::fs::create_dir_all(&app_root).unwrap();
    std::fs::write(app_root.join("composer.json"), r#"{"version": "1.0.0"}"#).unwrap();

    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "v1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip",
        "changelog": "Fixes"
    }))]);
    let config = write_config(temp.path(), &format!("{base_url}/feed.json"), &app_root);

    appup(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update Available!"))
        .stdout(predicate::str::contains("Latest Version: 1.1.0"));
}

#[test]
fn check_json_emits_the_report_contract() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    std::fs::create_dir_all(&app_root).unwrap();
    std::fs::write(app_root.join("composer.json"), r#"{"version": "1.1.0"}"#).unwrap();

    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip"
    }))]);
    let config = write_config(temp.path(), &format!("{base_url}/feed.json"), &app_root);

    let output = appup(&config)
        .args(["check", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["currentVersion"], "1.1.0");
    assert_eq!(report["latestVersion"], "1.1.0");
    assert_eq!(report["hasUpdate"], false);
}

#[test]
fn unreachable_feed_is_informational_not_fatal() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    std::fs::create_dir_all(&app_root).unwrap();

    let base_url = support::serve(vec![CannedResponse::status(404)]);
    let config = write_config(temp.path(), &format!("{base_url}/feed.json"), &app_root);

    appup(&config)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to fetch the latest release data."));
}

#[test]
fn malformed_release_url_is_fatal() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    std::fs::create_dir_all(&app_root).unwrap();
    let config = write_config(temp.path(), "not a url", &app_root);

    appup(&config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid repository URL"));
}

#[test]
fn update_with_no_newer_release_exits_zero() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    std::fs::create_dir_all(&app_root).unwrap();
    std::fs::write(app_root.join("composer.json"), r#"{"version": "1.1.0"}"#).unwrap();

    let base_url = support::serve(vec![CannedResponse::json(json!({
        "version": "1.1.0",
        "download_url": "https://updates.acme.example/1.1.0.zip"
    }))]);
    let config = write_config(temp.path(), &format!("{base_url}/feed.json"), &app_root);

    appup(&config)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("already using the latest version"));
}
