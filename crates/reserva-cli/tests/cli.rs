//! Command-line tests for the `reserva` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reserva(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reserva").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    reserva(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_missing_file_fails() {
    let home = TempDir::new().unwrap();
    reserva(&home)
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_invalid_pdf_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"not a pdf at all").unwrap();

    reserva(&home)
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn batch_without_pdfs_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

    reserva(&home)
        .arg("batch")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}

#[test]
fn batch_reports_failed_documents_and_continues() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"garbage").unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"more garbage").unwrap();
    let summary = dir.path().join("summary.csv");

    reserva(&home)
        .arg("batch")
        .arg(dir.path())
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed files:"))
        .stderr(predicate::str::contains("a.pdf"))
        .stderr(predicate::str::contains("b.pdf"));

    let content = std::fs::read_to_string(&summary).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("filename,status"));
    assert!(lines[1].starts_with("a.pdf,error"));
    assert!(lines[2].starts_with("b.pdf,error"));
}

#[test]
fn batch_fail_on_error() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"garbage").unwrap();

    reserva(&home)
        .arg("batch")
        .arg(dir.path())
        .arg("--fail-on-error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 document(s) failed"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    reserva(&home)
        .args(["config", "get", "extraction.hotel_tail_lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6"));

    reserva(&home)
        .args(["config", "set", "extraction.hotel_tail_lines", "9"])
        .assert()
        .success();

    reserva(&home)
        .args(["config", "get", "extraction.hotel_tail_lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9"));
}

#[test]
fn config_set_rejects_invalid_value() {
    let home = TempDir::new().unwrap();

    reserva(&home)
        .args(["config", "set", "extraction.hotel_tail_lines", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn config_init_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.json");

    reserva(&home)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    reserva(&home)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn missing_config_file_is_an_error() {
    let home = TempDir::new().unwrap();
    reserva(&home)
        .args(["--config", "nowhere.json", "batch", "*.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
