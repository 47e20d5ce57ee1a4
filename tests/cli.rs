//! End-to-end tests for the `threadify` binary.

#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_convert_reads_stdin() {
    cargo_bin_cmd!("threadify")
        .args(["convert", "--title", "Launch day"])
        .write_stdin("We ship today.\n\nTell your friends.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread: 4 posts"))
        .stdout(predicate::str::contains("🧵 Launch day"))
        .stdout(predicate::str::contains("We ship today."));
}

#[test]
fn test_convert_json_output() {
    let output = cargo_bin_cmd!("threadify")
        .args(["--format", "json", "convert", "-"])
        .write_stdin("**Bold** claims need [evidence](https://example.com).")
        .output()
        .expect("run threadify");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(value["total_chunks"], 2);
    assert_eq!(value["chunks"][0]["text"], "Bold claims need evidence.");
}

#[test]
fn test_convert_missing_file_fails() {
    cargo_bin_cmd!("threadify")
        .args(["convert", "/nonexistent/threadify/post.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error: file not found"));
}

#[test]
fn test_status_without_init_fails_as_json() {
    let temp = TempDir::new().expect("temp dir");
    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", temp.path().join("missing.db"))
        .args(["--format", "json", "status"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""))
        .stdout(predicate::str::contains("threadify init"));
}

#[test]
fn test_store_workflow() {
    let temp = TempDir::new().expect("temp dir");
    let db = temp.path().join("threadify.db");
    let source = temp.path().join("post.md");
    std::fs::write(&source, "# Why\n\nBecause it works.\n\n- Fast\n- Cheap").expect("write source");
    let outbox = temp.path().join("outbox");

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .arg("init")
        .assert()
        .success();

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .args(["add", "--name", "why", "--title", "Why threads"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("as ID 1"));

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .args(["thread", "why"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🧵 Why threads"));

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .args(["publish", "why", "--out-dir"])
        .arg(&outbox)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 failed"));

    let first = std::fs::read_to_string(outbox.join("doc1_001.txt")).expect("first post");
    assert!(first.starts_with("🧵 Why threads"));
    let second = std::fs::read_to_string(outbox.join("doc1_002.txt")).expect("second post");
    assert!(second.starts_with("in-reply-to: doc1_001.txt\n\n"));

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .args(["rm", "why", "--yes"])
        .assert()
        .success();

    cargo_bin_cmd!("threadify")
        .env("THREADIFY_DB_PATH", &db)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents found."));
}
