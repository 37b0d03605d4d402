//! Integration tests for the taskboard binary that need no server

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "sections": [
        {"_id": "colA", "title": "To Do", "project": "p1"},
        {"_id": "colB", "title": "Done", "project": "p1"}
    ],
    "tasks": [
        {"_id": "T1", "title": "First", "section": "colA", "project": "p1"},
        {"_id": "T2", "title": "Second", "section": "colA", "project": "p1"}
    ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn taskboard() -> Command {
    Command::cargo_bin("taskboard").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    taskboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("move"));
}

#[test]
fn test_replay_prints_board_json() {
    let temp = TempDir::new().unwrap();
    let snapshot = write(temp.path(), "board.json", SNAPSHOT);
    let gestures = write(
        temp.path(),
        "drops.json",
        r#"[{
            "draggableId": "T1",
            "source": {"droppableId": "colA", "index": 0},
            "destination": {"droppableId": "colB", "index": 0},
            "reason": "DROP"
        }]"#,
    );

    let output = taskboard()
        .args(["--quiet", "replay", "--snapshot"])
        .arg(&snapshot)
        .arg("--gestures")
        .arg(&gestures)
        .output()
        .unwrap();
    assert!(output.status.success());

    let board: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let col_a = &board["columns"]["colA"]["taskItems"];
    let col_b = &board["columns"]["colB"]["taskItems"];
    assert_eq!(col_a.as_array().map(Vec::len), Some(1));
    assert_eq!(col_a[0]["_id"], "T2");
    assert_eq!(col_b[0]["_id"], "T1");
    assert_eq!(col_b[0]["section"], "colB");
}

#[test]
fn test_replay_rejects_stale_gesture() {
    let temp = TempDir::new().unwrap();
    let snapshot = write(temp.path(), "board.json", SNAPSHOT);
    let gestures = write(
        temp.path(),
        "drops.json",
        r#"[{
            "draggableId": "T2",
            "source": {"droppableId": "colA", "index": 0},
            "destination": {"droppableId": "colB", "index": 0}
        }]"#,
    );

    taskboard()
        .args(["--quiet", "replay", "--snapshot"])
        .arg(&snapshot)
        .arg("--gestures")
        .arg(&gestures)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gesture 1"));
}

#[test]
fn test_replay_missing_file() {
    let temp = TempDir::new().unwrap();
    let gestures = write(temp.path(), "drops.json", "[]");

    taskboard()
        .args(["--quiet", "replay", "--snapshot"])
        .arg(temp.path().join("missing.json"))
        .arg("--gestures")
        .arg(&gestures)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read snapshot"));
}

#[test]
fn test_move_rejects_bad_location() {
    taskboard()
        .args(["move", "--project", "p1", "--from", "colA", "--to", "colB:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("COLUMN:INDEX"));
}
