//! Runs the built binary to check exit codes and messages.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn sortdir_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sortdir"))
}

/// Run the binary with an isolated working directory and HOME, so no
/// configuration from the machine running the tests is picked up.
fn run(sandbox: &Path, args: &[&Path]) -> Output {
    Command::new(sortdir_bin())
        .current_dir(sandbox)
        .env("HOME", sandbox)
        .env_remove("RUST_LOG")
        .arg("--quiet")
        .args(args)
        .output()
        .expect("Failed to run sortdir binary")
}

#[test]
fn test_success_exits_zero() {
    let sandbox = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    fs::write(target.path().join("a.py"), "print()").unwrap();

    let output = run(sandbox.path(), &[target.path()]);

    assert!(
        output.status.success(),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(target.path().join("Code/Python/a.py").is_file());
}

#[test]
fn test_missing_directory_exits_non_zero() {
    let sandbox = TempDir::new().unwrap();
    let missing = sandbox.path().join("does-not-exist");

    let output = run(sandbox.path(), &[missing.as_path()]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid directory"),
        "stderr should explain the failure: {}",
        stderr
    );
}

#[test]
fn test_missing_argument_is_a_usage_error() {
    let output = Command::new(sortdir_bin())
        .output()
        .expect("Failed to run sortdir binary");

    assert!(!output.status.success());
}
