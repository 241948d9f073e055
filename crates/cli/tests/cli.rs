//! End-to-end tests for the tasklens binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLAN: &str = r#"{
  "project": "release-plan",
  "description": "Ship the first release",
  "tasks": [
    {"id": 1, "title": "setup", "steps": ["init repo"], "passes": true},
    {"id": 2, "title": "build", "steps": ["compile", "link"], "passes": false, "depends_on": [1]},
    {"id": 3, "title": "publish", "steps": ["upload"], "passes": false, "depends_on": [2],
     "blocked": true, "blocked_reason": "waiting on credentials"}
  ]
}"#;

fn project_dir(task_json: &str) -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix("tasklens_test_")
        .tempdir()
        .unwrap();
    fs::write(dir.path().join("task.json"), task_json).unwrap();
    dir
}

fn tasklens(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tasklens").unwrap();
    cmd.current_dir(dir)
        .env_remove("TASKLENS_FILE")
        .env_remove("TASKLENS_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_default_file_text_report() {
    let dir = project_dir(PLAN);

    tasklens(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: release-plan"))
        .stdout(predicate::str::contains("✅ Schema valid"))
        .stdout(predicate::str::contains("Total: 3 tasks"))
        .stdout(predicate::str::contains("✅ No dependency cycles"))
        .stdout(predicate::str::contains("  Level 3:\n    ○ [3] publish"))
        .stdout(predicate::str::contains("✓ Completed: 1 (33%)"))
        .stdout(predicate::str::contains("Reason: waiting on credentials"));
}

#[test]
fn test_file_from_environment() {
    let dir = project_dir("{}");
    fs::write(dir.path().join("other.json"), PLAN).unwrap();

    tasklens(dir.path())
        .env("TASKLENS_FILE", "other.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: release-plan"));
}

#[test]
fn test_json_report() {
    let dir = project_dir(PLAN);

    let output = tasklens(dir.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["project"], "release-plan");
    assert_eq!(report["dependencies"]["levels"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["progress"]["blocked"], 1);
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    tasklens(dir.path())
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read task.json"));
}

#[test]
fn test_invalid_json_fails() {
    let dir = project_dir("{\"project\": \"p\",");

    tasklens(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("is not valid JSON"));
}

#[test]
fn test_malformed_shape_fails() {
    let dir = project_dir(r#"{"project": "p", "tasks": "none"}"#);

    tasklens(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tasks"));
}

#[test]
fn test_deny_findings_on_cycle() {
    let dir = project_dir(
        r#"{"project": "loop", "tasks": [
            {"id": "a", "title": "a", "steps": ["s"], "passes": false, "depends_on": ["b"]},
            {"id": "b", "title": "b", "steps": ["s"], "passes": false, "depends_on": ["a"]}
        ]}"#,
    );

    tasklens(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency cycle detected: a -> b -> a"));

    tasklens(dir.path()).arg("--deny-findings").assert().code(1);
}

#[test]
fn test_deny_findings_clean_plan() {
    let dir = project_dir(PLAN);

    tasklens(dir.path()).arg("--deny-findings").assert().success();
}

#[test]
fn test_config_file_and_bar_width() {
    let dir = project_dir(
        r#"{"project": "p", "tasks": [{"id": 1, "title": "t", "steps": ["s"], "passes": true}]}"#,
    );
    fs::write(dir.path().join("tasklens.toml"), "[progress]\nbar_width = 8\n").unwrap();

    tasklens(dir.path())
        .args(["--config", "tasklens.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  [████████]\n"));

    tasklens(dir.path())
        .env("TASKLENS_CONFIG", "tasklens.toml")
        .args(["--bar-width", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  [████]\n"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = project_dir(PLAN);
    fs::write(dir.path().join("tasklens.toml"), "[progress]\ncolour = true\n").unwrap();

    tasklens(dir.path())
        .args(["--config", "tasklens.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse analyzer configuration"));
}

#[test]
fn test_missing_config_is_a_usage_error() {
    let dir = project_dir(PLAN);

    tasklens(dir.path())
        .args(["--config", "missing.toml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read configuration missing.toml"));
}

#[test]
fn test_oversized_bar_width_is_rejected() {
    let dir = project_dir(PLAN);

    tasklens(dir.path())
        .args(["--bar-width", "18446744073709551615"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not exceed 1000"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let dir = project_dir(PLAN);

    let output = tasklens(dir.path())
        .args(["--format", "json", "--level", "debug", "--log-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
    assert!(!output.stderr.is_empty());
}
