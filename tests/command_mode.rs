//! Integration tests for the command-line front end

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheetcalc"))
        // Tests must be deterministic and not depend on a user's default.rhai.
        .arg("--no-default-functions")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_left_to_right_without_precedence() {
    let (stdout, _, code) = run_command(&["-c", "2 * 3 + 4", "-c", "2 + 3 * 4"]);
    assert_eq!(stdout.trim(), "10\n20");
    assert_eq!(code, 0);
}

#[test]
fn test_cell_reference() {
    let (stdout, _, code) = run_command(&["-s", "A1=2", "-s", "A2==A1 + 2", "-g", "A2"]);
    assert_eq!(stdout.trim(), "4");
    assert_eq!(code, 0);
}

#[test]
fn test_script_escape() {
    let (stdout, _, code) = run_command(&["-c", "=@sum2([1, 2, 3]) "]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);
}

#[test]
fn test_leading_operator_fails() {
    let (stdout, stderr, code) = run_command(&["-c", "+2"]);
    assert!(stdout.is_empty());
    assert!(stderr.contains("expected value but found an operator"));
    assert_eq!(code, 1);
}

#[test]
fn test_circular_reference_fails() {
    let (_, stderr, code) = run_command(&["-s", "A1==B1", "-s", "B1==A1", "-g", "A1"]);
    assert!(stderr.contains("circular reference"));
    assert_eq!(code, 1);
}

#[test]
fn test_table_output() {
    let (stdout, _, code) = run_command(&["-s", "A1=3", "-s", "B1==A1 / 0", "-s", "A2==B1", "-t"]);
    assert_eq!(
        stdout,
        "|   | A | B |\n|---|---|---|\n| 1 | 3 | inf |\n| 2 | inf |  |\n"
    );
    assert_eq!(code, 0);
}

#[test]
fn test_table_marks_errors() {
    let (stdout, _, code) = run_command(&["-s", "A1==*", "-t"]);
    assert!(stdout.contains("#ERR!"));
    assert_eq!(code, 0);
}

#[test]
fn test_functions_file() {
    let dir = std::env::temp_dir().join(format!("sheetcalc-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("custom.rhai");
    std::fs::write(&path, "fn half(x) { x / 2.0 }").unwrap();

    let (stdout, _, code) = run_command(&["-f", path.to_str().unwrap(), "-c", "=@half(9)"]);
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(stdout.trim(), "4.5");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--bogus"]);
    assert!(stderr.contains("Unknown option"));
    assert_eq!(code, 1);
}
