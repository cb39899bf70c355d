//! Integration tests for the busmaster CLI.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use busmaster_core as _;

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("busmaster")
}

fn create_temp_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn run_completes_on_roundtrip_script() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "roundtrip.txt",
        "write 00000010 DEADBEEF\nverify 00000010 DEADBEEF\n",
    );

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap()])
        .output()
        .expect("failed to run busmaster");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completed"));
    assert!(stdout.contains("2 lines"));
}

#[test]
fn run_reports_mismatch_with_line_and_values() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "mismatch.txt",
        "write 00000010 DEADBEEF\nverify 00000010 CAFEBABE\n",
    );

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap()])
        .output()
        .expect("failed to run busmaster");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script line 2"));
    assert!(stderr.contains("0xDEADBEEF"));
    assert!(stderr.contains("0xCAFEBABE"));
}

#[test]
fn run_hits_cycle_limit_on_unanswered_wait() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "stall.txt", "%WAIT_CHK\n");

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap(), "--max-cycles", "100"])
        .output()
        .expect("failed to run busmaster");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cycle limit"));
}

#[test]
fn ack_waits_unblocks_handshake_directives() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "handshake.txt",
        "%WAIT_GEN\n%WAIT_CHK\nwrite 00000010 00000001\n",
    );

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap(), "--ack-waits"])
        .output()
        .expect("failed to run busmaster");

    assert!(output.status.success());
}

#[test]
fn trace_prints_per_cycle_records() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "event.txt", "%EVENT\n");

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap(), "--trace"])
        .output()
        .expect("failed to run busmaster");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("EventPulsed"));
    assert!(stderr.contains("Finished"));
}

#[test]
fn check_summarizes_without_driving_the_bus() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "lint.txt",
        "%EVENT\nwrite 00000010 DEADBEEF\nverify 00000010 DEADBEEF\n%BOGUS\n",
    );

    let output = Command::new(binary_path())
        .args(["check", script.to_str().unwrap()])
        .output()
        .expect("failed to run busmaster");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 writes"));
    assert!(stdout.contains("1 verifies"));
    assert!(stdout.contains("1 directives"));
    assert!(stdout.contains("1 ignored"));
}

#[test]
fn check_reports_malformed_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "bad.txt", "verfiy 00000010 DEADBEEF\n");

    let output = Command::new(binary_path())
        .args(["check", script.to_str().unwrap()])
        .output()
        .expect("failed to run busmaster");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script line 1"));
    assert!(stderr.contains("invalid command"));
}

#[test]
fn missing_script_file_is_a_usage_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope.txt");

    let output = Command::new(binary_path())
        .args(["run", missing.to_str().unwrap()])
        .output()
        .expect("failed to run busmaster");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn help_prints_usage() {
    let output = Command::new(binary_path())
        .arg("--help")
        .output()
        .expect("failed to run busmaster");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: busmaster"));
}
