// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Runs the `quadnav` binary against scenario files.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const DETOUR: &str = r#"{
    "size": 10.0,
    "obstacles": [ { "circle": { "center": { "x": 5.0, "y": 5.0 }, "radius": 2.0 } } ],
    "queries": [
        { "start": [0.0, 5.0], "goal": [10.0, 5.0] },
        { "start": [5.0, 5.0], "goal": [10.0, 5.0] }
    ]
}"#;

fn scenario(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write scenario");
    file
}

#[test]
fn route_prints_one_json_line_per_query() {
    let file = scenario(DETOUR);
    let output = Command::cargo_bin("quadnav")
        .unwrap()
        .args(["route", "--algorithm", "theta*"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["algorithm"], "Theta*");
    assert_eq!(lines[0]["found"], true);
    assert!(lines[0]["length"].as_f64().unwrap() > 10.0);
    assert_eq!(lines[1]["found"], false);
    assert_eq!(lines[1]["points"].as_array().unwrap().len(), 0);
}

#[test]
fn tree_prints_the_outline() {
    let file = scenario(DETOUR);
    Command::cargo_bin("quadnav")
        .unwrap()
        .arg("tree")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("depth=0").and(predicate::str::contains("sprites=1")));
}

#[test]
fn missing_file_fails_with_context() {
    Command::cargo_bin("quadnav")
        .unwrap()
        .args(["route", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read scenario"));
}

#[test]
fn config_file_replaces_scenario_config() {
    let file = scenario(DETOUR);
    let config = scenario(r#"{ "algorithm": "A*", "build": { "sampling_quality": 12 } }"#);
    let output = Command::cargo_bin("quadnav")
        .unwrap()
        .arg("route")
        .arg(file.path())
        .arg("--config")
        .arg(config.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["algorithm"], "A*");
    assert_eq!(first["found"], true);
}

#[test]
fn bad_config_file_fails_with_context() {
    let file = scenario(DETOUR);
    Command::cargo_bin("quadnav")
        .unwrap()
        .arg("tree")
        .arg(file.path())
        .args(["--config", "/definitely/not/nav.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read config"));

    let invalid = scenario(r#"{ "build": { "sampling_quality": 0 } }"#);
    Command::cargo_bin("quadnav")
        .unwrap()
        .arg("tree")
        .arg(file.path())
        .arg("--config")
        .arg(invalid.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("read config").and(predicate::str::contains("sampling_quality")));
}
