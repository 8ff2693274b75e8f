//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "waterline-cli", "--"])
        .args(args)
        .env("WATERLINE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn recommend_sports_lists_catalog() {
    let (stdout, _, code) = run_cli(&["recommend", "sports"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let sports = parsed.as_array().unwrap();
    assert_eq!(sports.len(), 9);
}

#[test]
fn recommend_sleep_caps_at_ten_hours() {
    let (stdout, _, code) = run_cli(&["recommend", "sleep", "--base", "9.5", "--intensity", "hard"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("10h"));
}

#[test]
fn recommend_sleep_rejects_unknown_intensity() {
    let (_, stderr, code) = run_cli(&["recommend", "sleep", "--intensity", "extreme"]);
    assert!(code != 0);
    assert!(stderr.contains("unknown intensity"));
}

#[test]
fn config_list_is_valid_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("water").is_some());
    assert!(parsed.get("sleep").is_some());
}

#[test]
fn schedule_set_and_list_round_trip() {
    // A date far from "today" so the dev calendar stays predictable.
    let date = "2030-01-15";
    let (stdout, _, code) = run_cli(&["schedule", "set", "--liters", "1.0", "--date", date]);
    assert_eq!(code, 0);
    assert!(stdout.contains("scheduled 12 water reminders"));

    let (stdout, _, code) = run_cli(&["schedule", "list", "--date", date]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let events = parsed.as_array().unwrap();
    assert_eq!(events.len(), 12);
    let total: u64 = events
        .iter()
        .map(|e| e["amount_ml"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 1000);

    let (stdout, _, code) = run_cli(&["schedule", "clear", "--date", date]);
    assert_eq!(code, 0);
    assert!(stdout.contains("removed 12 water reminders"));
}
