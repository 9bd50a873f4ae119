use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ocr-extract"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run ocr-extract")
}

fn run_on(path: &Path) -> Output {
    run(&[path.to_str().expect("utf-8 temp path")])
}

#[test]
fn test_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--language"));
    assert!(stdout.contains("--on-page-error"));
}

#[test]
fn test_missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.png");

    let output = run_on(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File not found"), "stderr: {}", stderr);
    assert!(!dir.path().join("missing.png.txt").exists());
}

#[test]
fn test_text_file_reports_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let output = run_on(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported format"), "stderr: {}", stderr);
    assert!(stderr.contains("notes.txt"));
    assert!(!dir.path().join("notes.txt.txt").exists());
}

#[test]
fn test_invalid_scale_factor_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.png");
    std::fs::write(&path, b"irrelevant").unwrap();

    let output = run(&[path.to_str().unwrap(), "--scale-factor", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Scale factor"), "stderr: {}", stderr);
}

#[test]
fn test_oversized_min_size_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.png");
    std::fs::write(&path, b"irrelevant").unwrap();

    let output = run(&[path.to_str().unwrap(), "--min-size", "4294967291"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Minimum image size"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_page_policy_rejected_by_parser() {
    let output = run(&["scan.pdf", "--on-page-error", "retry"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("retry"), "stderr: {}", stderr);
}
