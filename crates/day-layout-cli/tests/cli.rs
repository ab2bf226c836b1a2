use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const SMOKE: &str = r#"[
    {"start": 30, "end": 150},
    {"start": 540, "end": 600},
    {"start": 560, "end": 620},
    {"start": 610, "end": 670}
]"#;

fn day_layout() -> Command {
    Command::cargo_bin("day-layout").unwrap()
}

fn run(args: &[&str], stdin: &str) -> Value {
    let output = day_layout()
        .args(args)
        .write_stdin(stdin)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_stdin_smoke_input() {
    let day = run(&[], SMOKE);
    assert_eq!(day["columnCount"], 2);
    assert_eq!(day["events"][0]["width"], 597.0);
    assert_eq!(day["events"][0]["marginLeft"], 0.0);
    assert_eq!(day["events"][2]["marginLeft"], 300.0);
    assert_eq!(day["events"][3]["top"], 610.0);
    assert_eq!(day["events"][3]["height"], 60.0);
}

#[test]
fn test_reads_file_argument() {
    let dir = std::env::temp_dir().join(format!("day-layout-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("events.json");
    fs::write(&path, SMOKE).unwrap();

    day_layout()
        .arg(&path)
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"columnCount\": 2"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_dash_reads_stdin() {
    let day = run(&["-"], r#"[{"start": 0, "end": 60}]"#);
    assert_eq!(day["events"][0]["width"], 597.0);
}

#[test]
fn test_custom_width_and_gutter() {
    let day = run(
        &["--total-width", "800", "--gutter", "4"],
        r#"[{"start": 0, "end": 60}, {"start": 30, "end": 90}]"#,
    );
    assert_eq!(day["events"][0]["width"], 396.0);
    assert_eq!(day["events"][1]["marginLeft"], 400.0);
}

#[test]
fn test_sort_flag_reduces_columns() {
    let input = r#"[
        {"start": 0, "end": 10},
        {"start": 5, "end": 15},
        {"start": 20, "end": 30},
        {"start": 12, "end": 22}
    ]"#;
    assert_eq!(run(&[], input)["columnCount"], 3);
    assert_eq!(run(&["--sort"], input)["columnCount"], 2);
}

#[test]
fn test_component_reflow() {
    let input = r#"[
        {"start": 0, "end": 100},
        {"start": 0, "end": 100},
        {"start": 0, "end": 100},
        {"start": 200, "end": 300},
        {"start": 250, "end": 350}
    ]"#;
    let day = run(&["--reflow", "component"], input);
    assert_eq!(day["events"][3]["width"], 297.0);
    assert_eq!(day["events"][4]["marginLeft"], 300.0);
}

#[test]
fn test_invalid_interval_fails() {
    day_layout()
        .write_stdin(r#"[{"start": 90, "end": 30}]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn test_malformed_json_fails() {
    day_layout()
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn test_missing_file_fails() {
    day_layout()
        .arg("/nonexistent/events.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
