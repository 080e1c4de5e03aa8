//! End-to-end tests for the `junit-gate` binary
//!
//! Runs the built binary in a temp working directory and checks the exit
//! code and the artifact it leaves behind.

mod fixtures;

use fixtures::{copy_into, surefire_report, write_report};
use junit_gate::config::env::KNOWN_VARS;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gate(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_junit-gate"));
    cmd.current_dir(cwd).args(args).env_remove("RUST_LOG");
    for var in KNOWN_VARS {
        cmd.env_remove(var);
    }
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run junit-gate")
}

#[test]
fn test_defaults_fail_on_any_failure() {
    let dir = TempDir::new().unwrap();
    copy_into(&surefire_report(), dir.path(), "target/surefire-reports/TEST-shop.CartTest.xml");

    let output = gate(dir.path(), &[], &[]);

    assert_eq!(output.status.code(), Some(1));
    let artifact = fs::read_to_string(dir.path().join("default_env_file.env")).unwrap();
    assert!(artifact.contains("TOTAL_TESTS=10\n"));
    assert!(artifact.contains("FAILURE_RATE=30.00\n"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Gate FAIL"), "{}", stdout);
}

#[test]
fn test_threshold_from_env_passes() {
    let dir = TempDir::new().unwrap();
    copy_into(&surefire_report(), dir.path(), "TEST-shop.CartTest.xml");

    let output = gate(dir.path(), &["check"], &[("PLUGIN_THRESHOLD", "50")]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_cli_flag_overrides_env() {
    let dir = TempDir::new().unwrap();
    copy_into(&surefire_report(), dir.path(), "TEST-shop.CartTest.xml");

    let output = gate(
        dir.path(),
        &["--threshold", "10", "--output", "gate.env"],
        &[("PLUGIN_THRESHOLD", "50"), ("DRONE_OUTPUT", "ignored.env")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(dir.path().join("gate.env").exists());
    assert!(!dir.path().join("ignored.env").exists());
}

#[test]
fn test_drone_output_path() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), "reports/r.xml", r#"<testsuite tests="3"/>"#);

    let output = gate(
        dir.path(),
        &[],
        &[("DRONE_OUTPUT", "drone.env"), ("PLUGIN_EXPRESSION", "reports/*.xml")],
    );

    assert_eq!(output.status.code(), Some(0));
    let artifact = fs::read_to_string(dir.path().join("drone.env")).unwrap();
    assert!(artifact.starts_with("TOTAL_TESTS=3\n"));
}

#[test]
fn test_no_reports_exit_one() {
    let dir = TempDir::new().unwrap();
    let output = gate(dir.path(), &["--threshold", "100"], &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_threshold_is_config_error() {
    let dir = TempDir::new().unwrap();
    let output = gate(dir.path(), &[], &[("PLUGIN_THRESHOLD", "lots")]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PLUGIN_THRESHOLD"), "{}", stderr);
}

#[test]
fn test_individual_mode_from_env() {
    let dir = TempDir::new().unwrap();
    write_report(
        dir.path(),
        "r.xml",
        r#"<testsuites><testsuite><testcase name="a"/><testcase name="b"/></testsuite></testsuites>"#,
    );

    let output = gate(dir.path(), &[], &[("PLUGIN_COUNT_MODE", "individual")]);

    assert_eq!(output.status.code(), Some(0));
    let artifact = fs::read_to_string(dir.path().join("default_env_file.env")).unwrap();
    assert!(artifact.contains("TOTAL_TESTS=2\n"));
}

#[test]
fn test_config_subcommand_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gate.toml"), "threshold = 5\n[export]\noutput_path = \"x.env\"\n").unwrap();

    let output = gate(dir.path(), &["config", "--config", "gate.toml"], &[]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["schema_id"], "junit-gate/effective_config@1");
    assert_eq!(value["config"]["threshold"], 5.0);
    assert_eq!(value["config"]["export"]["output_path"], "x.env");
    assert_eq!(value["sources"][1]["origin"], "file");
}

#[test]
fn test_current_dir_prefixed_pattern() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), "reports/a.xml", r#"<testsuite tests="4" failures="1"/>"#);

    let output = gate(dir.path(), &["--threshold", "50"], &[("PLUGIN_EXPRESSION", "./**/*.xml")]);

    assert_eq!(output.status.code(), Some(0));
    let artifact = fs::read_to_string(dir.path().join("default_env_file.env")).unwrap();
    assert!(artifact.starts_with("TOTAL_TESTS=4\n"), "{}", artifact);
}
