//! End-to-end tests for the race-average binary
//!
//! Each test runs the compiled binary with a scrubbed environment so that
//! settings from the developer's shell cannot leak in.

use std::io::Write;
use std::process::{Command, Output};

const CONFIG_VARS: &[&str] = &[
    "SERVICE_NAME",
    "LOG_LEVEL",
    "RACE_START",
    "ROUNDING_MODE",
    "RUST_LOG",
];

fn race_average() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_race-average"));
    for var in CONFIG_VARS {
        command.env_remove(var);
    }
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("failed to run race-average binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_prints_rounded_average() {
    let output = run(race_average().args(["12:00 PM, DAY 1", "12:01 PM, DAY 1"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "241");
}

#[test]
fn test_rounding_flag() {
    let output = run(race_average().args([
        "--rounding",
        "half-to-even",
        "12:00 PM, DAY 1",
        "12:01 PM, DAY 1",
    ]));

    assert!(output.status.success());
    assert_eq!(stdout(&output), "240");
}

#[test]
fn test_start_flag_overrides_invalid_env() {
    let output = run(race_average()
        .env("RACE_START", "bogus")
        .args(["--start", "08:00 AM, DAY 1", "12:00 PM, DAY 1"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "240");
}

#[test]
fn test_log_level_flag_overrides_invalid_env() {
    let output = run(race_average()
        .env("LOG_LEVEL", "loud")
        .args(["--log-level", "error", "08:00 AM, DAY 1"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0");
}

#[test]
fn test_invalid_env_without_override_fails() {
    let output = run(race_average()
        .env("RACE_START", "bogus")
        .arg("12:00 PM, DAY 1"));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_config_file_then_flag_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[race]
start = "not a time"
rounding = "half-to-even"
"#
    )
    .unwrap();

    let output = run(race_average()
        .arg("--config")
        .arg(file.path())
        .args(["--start", "12:00 PM, DAY 1", "12:01 PM, DAY 1", "12:00 PM, DAY 1"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    // elapsed [1, 0] -> 0.5 -> half-to-even from the file
    assert_eq!(stdout(&output), "0");
}

#[test]
fn test_summary_json() {
    let output = run(race_average().args([
        "--summary",
        "02:00 PM, DAY 19",
        "02:00 PM, DAY 20",
        "01:58 PM, DAY 20",
    ]));

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["count"], 3);
    assert_eq!(summary["average_minutes"], 27239);
    assert_eq!(summary["fastest_minutes"], 26280);
    assert_eq!(summary["slowest_minutes"], 27720);
    assert_eq!(summary["rounding"], "half-away-from-zero");
}

#[test]
fn test_red_fill_accepts_negative_numbers() {
    let output = run(race_average().args(["--red-fill", "-0.25"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "color:rgb(217, 64, 64)");
}

#[test]
fn test_dry_run_prints_resolved_config() {
    let output = run(race_average().args(["--dry-run", "--rounding", "half-to-even"]));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("rounding = \"half-to-even\""));
    assert!(text.contains("start = \"08:00 AM, DAY 1\""));
}

#[test]
fn test_malformed_time_exits_with_one_error_line() {
    let output = run(race_average().arg("bad"));

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let err = stderr(&output);
    assert_eq!(err.matches("Malformed finish time").count(), 1);
    assert!(err.starts_with("Error: "));
}

#[test]
fn test_too_many_times_exits_with_error() {
    let times = vec!["09:00 AM, DAY 1"; 51];
    let output = run(race_average().args(&times));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid number of finish times: 51"));
}
