//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary config directory and
//! verify outputs. None of them reach the network.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with its config rooted at `dir` and return output.
fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_quizzical"))
        .args(args)
        .env("QUIZZICAL_CONFIG_DIR", dir.path())
        .env_remove("QUIZZICAL_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["--help"]);
    assert_eq!(output.0, 0, "Help failed");
    assert!(output.1.contains("play"));
    assert!(output.1.contains("categories"));
    assert!(output.1.contains("config"));
}

#[test]
fn test_config_list_has_defaults() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "list"]);
    assert_eq!(output.0, 0, "Config list failed");

    let parsed: serde_json::Value = serde_json::from_str(&output.1).unwrap();
    assert_eq!(parsed["quiz"]["per_question_ms"], 5000);
    assert_eq!(parsed["quiz"]["min_questions"], 5);
    assert_eq!(parsed["quiz"]["max_questions"], 10);
    assert_eq!(parsed["quiz"]["default_category"], "Mixed");
}

#[test]
fn test_config_get() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "get", "quiz.per_question_ms"]);
    assert_eq!(output.0, 0, "Config get failed");
    assert_eq!(output.1.trim(), "5000");
}

#[test]
fn test_config_set_persists() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "set", "quiz.timed", "false"]);
    assert_eq!(output.0, 0, "Config set failed: {}", output.2);

    let output = run_cli(&dir, &["config", "get", "quiz.timed"]);
    assert_eq!(output.1.trim(), "false");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "set", "quiz.nope", "1"]);
    assert_ne!(output.0, 0);
    assert!(output.2.contains("error:"));
}

#[test]
fn test_config_invalid_value_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "set", "quiz.per_question_ms", "soon"]);
    assert_ne!(output.0, 0);
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "path"]);
    assert_eq!(output.0, 0);
    assert!(output.1.trim().ends_with("config.toml"));
}

#[test]
fn test_play_rejects_amount_below_minimum() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["play", "--amount", "3"]);
    assert_ne!(output.0, 0);
    assert!(output.2.contains("error:"));
}

#[test]
fn test_play_rejects_unknown_difficulty() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["play", "--difficulty", "brutal"]);
    assert_ne!(output.0, 0);
}

#[test]
fn test_config_rejects_oversized_allowance() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["config", "set", "quiz.per_question_ms", "9223372036854775807"]);
    assert_ne!(output.0, 0);

    let output = run_cli(&dir, &["config", "get", "quiz.per_question_ms"]);
    assert_eq!(output.1.trim(), "5000");
}
