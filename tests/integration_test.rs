//! Integration tests for the retail bank CLI.
//!
//! These tests run the actual binary, feed a menu script on stdin and check
//! what it prints.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const REGISTER_AND_OPEN: &str = "6\n111\nAna Souza\n07-09-1990\nRua A, 1\n4\n111\n";

/// Run the binary with the given stdin script and return stdout
fn run_bank(args: &[&str], script: &str) -> String {
    let mut cmd = Command::cargo_bin("retail-bank").unwrap();
    let assert = cmd.args(args).write_stdin(script).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_exit_immediately() {
    let output = run_bank(&[], "0\n");
    assert!(output.contains("MAIN MENU"));
    assert!(output.contains("Session closed."));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    Command::cargo_bin("retail-bank")
        .unwrap()
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts have been opened yet."));
}

#[test]
fn test_full_session() {
    let script = format!(
        "{}1\n1\n100.00\n2\n1\n600.00\n2\n1\n50\n2\n1\n50\n2\n1\n50\n3\n1\n5\n0\n",
        REGISTER_AND_OPEN
    );
    let output = run_bank(&[], &script);

    assert!(output.contains("Customer registered."));
    assert!(output.contains("Branch: 0001 | Account: 1 | Holder: Ana Souza"));
    assert!(output.contains("Current balance: 100.00"));
    assert!(output.contains("Current balance: 50.00"));
    assert!(output.contains("Current balance: 0.00"));
    assert_eq!(output.matches("insufficient balance.").count(), 2);
    assert_eq!(output.matches("Deposit:\t").count(), 1);
    assert_eq!(output.matches("Withdrawal:\t").count(), 2);
    assert!(output.contains("Available balance: 0.00"));
}

#[test]
fn test_statement_timestamp_format() {
    let script = format!("{}1\n1\n10\n3\n1\n0\n", REGISTER_AND_OPEN);
    let output = run_bank(&[], &script);

    let line = output
        .lines()
        .find(|l| l.starts_with("Deposit:\t"))
        .unwrap();
    let stamp = line.rsplit(" | ").next().unwrap();

    // dd/mm/yyyy HH:MM:SS
    assert_eq!(stamp.len(), 19);
    assert_eq!(&stamp[2..3], "/");
    assert_eq!(&stamp[5..6], "/");
    assert_eq!(&stamp[10..11], " ");
    assert_eq!(&stamp[13..14], ":");
}

#[test]
fn test_config_file_limits() {
    let config = config_file(r#"{ "max_withdrawals_per_account": 1, "max_withdrawal_amount": "20" }"#);
    let path = config.path().to_str().unwrap();

    let script = format!(
        "{}1\n1\n100\n2\n1\n25\n2\n1\n20\n2\n1\n5\n0\n",
        REGISTER_AND_OPEN
    );
    let output = run_bank(&[path], &script);

    assert!(output.contains("per-withdrawal limit of 20.00"));
    assert!(output.contains("Current balance: 80.00"));
    assert!(output.contains("withdrawal limit of 1 reached"));
}

#[test]
fn test_missing_config_file_error() {
    let mut cmd = Command::cargo_bin("retail-bank").unwrap();
    cmd.arg("nonexistent.json")
        .write_stdin("0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_config_error() {
    let config = config_file(r#"{ "max_withdrawal_amount": "-1" }"#);

    Command::cargo_bin("retail-bank")
        .unwrap()
        .arg(config.path())
        .write_stdin("0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_malformed_config_error() {
    let config = config_file("not json");

    Command::cargo_bin("retail-bank")
        .unwrap()
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config parsing error"));
}
