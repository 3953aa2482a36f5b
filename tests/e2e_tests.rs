//! End-to-end tests for the emuwatch CLI
//!
//! These tests verify:
//! - Dry-run mode prints the status card instead of posting it
//! - CLI produces the JSON report schema
//! - Exit codes are correct for various scenarios

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use mockito::{Mock, ServerGuard};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Start a vendor stand-in answering for NoxPlayer and MEmu only
fn vendor_server() -> (ServerGuard, Vec<Mock>) {
    let mut server = mockito::Server::new();
    let mocks = vec![
        server
            .mock("GET", "/nox")
            .with_status(302)
            .with_header(
                "location",
                "https://res06.bignox.com/full/20251210/nox_setup_v7.0.6.2_full_intl.exe",
            )
            .create(),
        server
            .mock("GET", "/memu")
            .with_status(200)
            .with_body("<h2>MEmu 9.3.1 is officially released</h2><p>December 19, 2025</p>")
            .create(),
    ];
    (server, mocks)
}

/// Write a baseline and a config file whose endpoints all point at `server`
fn create_workspace(server: &ServerGuard) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let url = server.url();

    let baseline = dir.path().join("emulator_versions.json");
    fs::write(
        &baseline,
        r#"{"NoxPlayer": {"version": "7.0.6.2"}, "MEmu": {"version": "9.3.0"}}"#,
    )
    .unwrap();

    let config = format!(
        r#"baseline = "{baseline}"
timeout = 2

[endpoints]
nox_download = "{url}/nox"
memu_release_notes = "{url}/memu"
ldplayer_web = "{url}/ldplayer"
ldplayer_api = "{url}/ldapi"
bluestacks_download = "{url}/bluestacks"
bluestacks_release_notes = "{url}/bluestacks-notes"
mumu_appcast = "{url}/appcast"
"#,
        baseline = baseline.display().to_string().replace('\\', "/"),
        url = url,
    );
    let config_path = dir.path().join("emuwatch.toml");
    fs::write(&config_path, config).unwrap();

    (dir, config_path)
}

fn emuwatch() -> Command {
    let mut cmd = cargo_bin_cmd!("emuwatch");
    cmd.env_remove("EMUWATCH_WEBHOOK_URL")
        .env_remove("EMUWATCH_DEEP_LINK_BASE")
        .env_remove("RUST_LOG");
    cmd
}

mod dry_run_tests {
    use super::*;

    /// Dry-run prints the MessageCard JSON and posts nothing
    #[test]
    fn test_dry_run_prints_card() {
        let (mut server, _mocks) = vendor_server();
        let webhook = server.mock("POST", "/webhook").expect(0).create();
        let (_dir, config) = create_workspace(&server);

        let output = emuwatch()
            .arg("--config")
            .arg(&config)
            .args(["--dry-run", "--webhook-url"])
            .arg(format!("{}/webhook", server.url()))
            .output()
            .unwrap();

        assert!(output.status.success());
        let card: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(card["@type"], "MessageCard");
        assert_eq!(card["themeColor"], "FF6600");
        let table = card["sections"][1]["text"].as_str().unwrap();
        assert!(table.contains("| MEmu | 9.3.0 | 9.3.1 | 2025-12-19 | ⬆️ Update |"));
        assert!(table.contains("| NoxPlayer | 7.0.6.2 | 7.0.6.2 | 2025-12-10 | ✅ Same |"));
        assert!(table.contains("❌ Error"));

        webhook.assert();
    }

    /// Dry-run with a deep link base adds the OpenUri action
    #[test]
    fn test_dry_run_with_deep_link() {
        let (server, _mocks) = vendor_server();
        let (_dir, config) = create_workspace(&server);

        emuwatch()
            .arg("--config")
            .arg(&config)
            .args(["-n", "--deep-link-base", "https://tool.example.com/"])
            .assert()
            .success()
            .stdout(predicate::str::contains("OpenUri"))
            .stdout(predicate::str::contains("MEmu_prev=9.3.0&MEmu_latest=9.3.1"));
    }
}

mod json_output_tests {
    use super::*;

    /// The JSON report lists products in display order
    #[test]
    fn test_json_output_schema() {
        let (server, _mocks) = vendor_server();
        let (_dir, config) = create_workspace(&server);

        let output = emuwatch()
            .arg("--config")
            .arg(&config)
            .arg("--json")
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["updates"], 1);
        assert_eq!(json["summary"]["errors"], 3);

        let names: Vec<&str> = json["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["NoxPlayer", "MEmu", "LDPlayer9", "BlueStacks5", "MuMuPlayer"]
        );
    }
}

mod exit_code_tests {
    use super::*;

    /// Vendor failures and a missing baseline still exit 0
    #[test]
    fn test_exit_code_with_failures() {
        let (server, _mocks) = vendor_server();
        let (dir, config) = create_workspace(&server);

        emuwatch()
            .arg("--config")
            .arg(&config)
            .arg("--baseline")
            .arg(dir.path().join("missing.json"))
            .arg("--no-color")
            .assert()
            .success()
            .stdout(predicate::str::contains("🆕 MEmu: 9.3.1 (new)"))
            .stdout(predicate::str::contains("❌ LDPlayer9"));
    }

    /// A webhook that rejects the card does not fail the run
    #[test]
    fn test_exit_code_notification_failure() {
        let (mut server, _mocks) = vendor_server();
        let webhook = server.mock("POST", "/webhook").with_status(500).create();
        let (_dir, config) = create_workspace(&server);

        emuwatch()
            .arg("--config")
            .arg(&config)
            .arg("--webhook-url")
            .arg(format!("{}/webhook", server.url()))
            .assert()
            .success()
            .stdout(predicate::str::contains("Notification failed"));

        webhook.assert();
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        emuwatch()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--baseline"))
            .stdout(predicate::str::contains("--dry-run"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        emuwatch()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("emuwatch "));
    }

    /// Exit code 1: an explicitly passed config file that does not exist
    #[test]
    fn test_exit_code_missing_config() {
        let dir = TempDir::new().unwrap();
        emuwatch()
            .arg("--config")
            .arg(dir.path().join("nope.toml"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to read config file"));
    }

    /// Exit code 2: invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        emuwatch().arg("--concurrency").arg("0").assert().code(2);
    }
}
