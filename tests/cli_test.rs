//! CLI smoke tests
//!
//! Each test points the binary at its own data directory via a generated
//! config file, so tests never touch the user's real store.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("choreboard.yml");
    let data_dir = dir.path().join("data");
    std::fs::write(
        &config_path,
        format!("storage:\n  data-dir: {}\n", data_dir.display()),
    )
    .unwrap();
    config_path
}

fn cb(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cb").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
#[serial]
fn init_seeds_builtin_templates() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("builtin templates"));

    cb(&config)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Routine"))
        .stdout(predicate::str::contains("Weekly Cleaning"));
}

#[test]
#[serial]
fn template_use_creates_tasks_with_due_dates() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config).arg("init").assert().success();
    cb(&config).args(["user", "add", "emma"]).assert().success();

    // find the Morning Routine id from the JSON listing
    let output = cb(&config)
        .args(["template", "list", "--format", "json"])
        .output()
        .unwrap();
    let templates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let morning = templates
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Morning Routine")
        .unwrap();
    let id = morning["id"].as_str().unwrap();

    let output = cb(&config)
        .args([
            "--as",
            "emma",
            "template",
            "use",
            id,
            "--start-date",
            "2024-06-01",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["count"], 5);
    let tasks = result["tasks"].as_array().unwrap();
    assert_eq!(tasks[0]["dueDate"], "2024-06-01");
    assert_eq!(tasks[4]["dueDate"], "2024-06-05");
}

#[test]
#[serial]
fn template_use_without_acting_user_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config).arg("init").assert().success();

    let output = cb(&config)
        .args(["template", "list", "--format", "json"])
        .output()
        .unwrap();
    let templates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = templates[0]["id"].as_str().unwrap();

    cb(&config)
        .args(["template", "use", id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no acting user"));
}

#[test]
#[serial]
fn template_use_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config).arg("init").assert().success();
    cb(&config).args(["user", "add", "emma"]).assert().success();

    cb(&config)
        .args(["--as", "emma", "template", "use", "nonexistent-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found"));

    // nothing was created
    cb(&config)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks."));
}

#[test]
#[serial]
fn task_add_and_complete() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config).arg("init").assert().success();
    cb(&config).args(["user", "add", "emma"]).assert().success();

    cb(&config)
        .args([
            "--as", "emma", "task", "add", "Water plants", "--category", "Home", "--points", "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task"));

    let output = cb(&config)
        .args(["task", "list", "--format", "json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = tasks[0]["id"].as_str().unwrap();

    cb(&config)
        .args(["task", "complete", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("+10 points"));
}

#[test]
#[serial]
fn task_edit_changes_only_given_fields() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    cb(&config).arg("init").assert().success();
    cb(&config).args(["user", "add", "emma"]).assert().success();

    cb(&config)
        .args([
            "--as", "emma", "task", "add", "Water plants", "--category", "Home", "--points", "10",
        ])
        .assert()
        .success();

    let output = cb(&config)
        .args(["task", "list", "--format", "json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = tasks[0]["id"].as_str().unwrap();

    cb(&config)
        .args(["task", "edit", id, "--priority", "urgent", "--points", "25", "--due", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task"));

    let output = cb(&config)
        .args(["task", "list", "--format", "json"])
        .output()
        .unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks[0]["title"], "Water plants");
    assert_eq!(tasks[0]["category"], "Home");
    assert_eq!(tasks[0]["priority"], "URGENT");
    assert_eq!(tasks[0]["points"], 25);
    assert_eq!(tasks[0]["dueDate"], "2024-06-01");

    cb(&config)
        .args(["task", "edit", "missing-id", "--points", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found"));
}
