//! CLI integration tests.
//!
//! These tests drive the retrace binary end-to-end through stdin.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run retrace on `file` feeding `script` to stdin.
fn run(dir: &Path, file: &Path, script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_retrace"))
        .arg(file)
        .arg("--no-config")
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_STATE_HOME", dir.join("state"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    child.wait_with_output().expect("Failed to wait for command")
}

#[test]
fn test_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_retrace"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Time-travel line editor"));
    assert!(stdout.contains("--delay"));
}

#[test]
fn test_missing_file_argument_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_retrace"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_edit_and_save() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let file = temp.path().join("notes.txt");
    std::fs::write(&file, "a\nb\nc\n").expect("Failed to write file");

    let output = run(temp.path(), &file, "r 1\nB\ni 0\nZ\nsave\nq\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved current state to"));

    let saved = std::fs::read_to_string(&file).unwrap();
    assert_eq!(saved, "Z\na\nB\nc\n");
    let backup = std::fs::read_to_string(temp.path().join("notes.txt.bak")).unwrap();
    assert_eq!(backup, "a\nb\nc\n");
}

#[test]
fn test_checkout_then_save_restores_past_state() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let file = temp.path().join("notes.txt");
    std::fs::write(&file, "one\ntwo\n").expect("Failed to write file");

    let output = run(temp.path(), &file, "d 0\ny\nc 0\nt\nsave\nq\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checked out state 0 and created new head at index 1."));
    assert!(stdout.contains("Checkout state 0 as new head"));
    assert!(!stdout.contains("Delete line 0: 'one'"));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "one\ntwo\n");
}

#[test]
fn test_missing_file_is_created() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let file = temp.path().join("fresh.txt");

    let output = run(temp.path(), &file, "i 0\nhello\nsave\nq\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File not found. Creating new empty file."));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello\n");
}

#[test]
fn test_bad_input_keeps_session_alive() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let file = temp.path().join("notes.txt");
    std::fs::write(&file, "x\n").expect("Failed to write file");

    let output = run(temp.path(), &file, "p abc\nr 9\nnew\nwhat\nplay 0\nq\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid index: 'abc'"));
    assert!(stdout.contains("Line number out of range: 9"));
    assert!(stdout.contains("Unknown command 'what'"));
    assert!(stdout.contains("Play finished."));
    assert!(stdout.contains("Bye."));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "x\n");
}
