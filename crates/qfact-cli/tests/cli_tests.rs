//! End-to-end tests of the `qfact` binary.

use std::process::{Command, Output};

fn qfact(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qfact"))
        .args(args)
        .env_remove("QFACT_SEED")
        .output()
        .expect("failed to spawn qfact")
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_version() {
    let output = qfact(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("qfact"));
    assert!(stdout.contains("qfact-primitives"));
}

#[test]
fn test_run_small_number() {
    let output = qfact(&["run", "--number", "13", "--no-image", "--seed", "1"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Possible factors of the number 13: [1]"));
    assert!(stdout.contains("counts for Bell circuit"));
    assert!(stdout.contains("Factor distribution for the number 13"));
}

#[test]
fn test_run_missing_image_continues() {
    let output = qfact(&["run", "--number", "12", "--image", "/nonexistent/qfact.png"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not load the image"));
    assert!(stdout.contains("[1, 2, 3, 4, 6]"));
}

// ============================================================================
// Argument errors
// ============================================================================

#[test]
fn test_zero_number_rejected() {
    let output = qfact(&["run", "--number", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_image_flags_conflict() {
    let output = qfact(&["run", "--image", "a.png", "--no-image"]);
    assert!(!output.status.success());
}

#[test]
fn test_unknown_command() {
    let output = qfact(&["factor"]);
    assert!(!output.status.success());
}
