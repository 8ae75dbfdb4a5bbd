//! End-to-end tests that drive the compiled `skycast` binary.
//!
//! Each invocation gets a throwaway config directory and a scrubbed
//! environment so a developer's real key never leaks into assertions.

use std::process::Command;

fn skycast() -> Command {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_skycast"));
    cmd.env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path()) // for the macOS config location
        .env_remove("SKYCAST_API_KEY")
        .env_remove("RUST_LOG");

    // Keep the temp dir alive for the duration of the short-lived test.
    std::mem::forget(temp);
    cmd
}

#[test]
fn help_lists_the_subcommands() {
    let output = skycast().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("configure"));
    assert!(stdout.contains("current"));
    assert!(stdout.contains("forecast"));
    assert!(stdout.contains("search"));
    assert!(stdout.contains("--units"));
}

#[test]
fn version_flag_prints_the_package_version() {
    let output = skycast().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn search_without_a_key_points_at_configure() {
    let output = skycast().args(["search", "london"]).output().expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No API key configured"), "stderr was: {stderr}");
    assert!(stderr.contains("skycast configure"));
}

#[test]
fn current_without_a_key_fails_before_any_request() {
    let output = skycast().args(["current", "Bogota"]).output().expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SKYCAST_API_KEY"));
}

#[test]
fn forecast_rejects_non_numeric_days() {
    let output = skycast()
        .args(["forecast", "london", "--days", "many"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"));
}
