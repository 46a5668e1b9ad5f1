//! End-to-end tests for the codevitals binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn codevitals() -> Command {
    Command::cargo_bin("codevitals").unwrap()
}

#[test]
fn test_help_lists_commands() {
    codevitals()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("code"))
        .stdout(predicate::str::contains("deps"));
}

#[test]
fn test_code_command_writes_dead_code_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("orphan.ts"), "export function orphan() {}\n").unwrap();

    codevitals()
        .args(["code", dir.path().to_str().unwrap()])
        .assert()
        .success();

    let report_path = dir.path().join("codeVitals-ts-report.json");
    assert!(report_path.exists());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    let dead = report["deadExports"]
        .as_object()
        .expect("deadExports should be a map");
    assert!(dead.values().any(|names| names
        .as_array()
        .unwrap()
        .iter()
        .any(|name| name == "orphan")));
}

#[test]
fn test_code_command_writes_manifest_reports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("deploy.yml"),
        "kind: Pod\nspec:\n  containers:\n    - name: app\n      image: app:latest\n",
    )
    .unwrap();

    codevitals()
        .args(["code", dir.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(dir.path().join("codeVitals-workload-report.json").exists());
    // No generic findings in this manifest, so no generic report
    assert!(!dir.path().join("codeVitals-yaml-report.json").exists());
}

#[test]
fn test_clean_project_leaves_no_reports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ok.ts"), "export function used() {}\nused();\n").unwrap();

    codevitals()
        .args(["code", dir.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(!dir.path().join("codeVitals-ts-report.json").exists());
    assert!(!dir.path().join("codeVitals-yaml-report.json").exists());
    assert!(!dir.path().join("codeVitals-workload-report.json").exists());
}

#[test]
fn test_second_clean_run_removes_stale_report() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("main.ts");
    fs::write(&source, "export function orphan() {}\n").unwrap();

    codevitals()
        .args(["code", dir.path().to_str().unwrap()])
        .assert()
        .success();
    assert!(dir.path().join("codeVitals-ts-report.json").exists());

    // Fix the project; the stale report must disappear
    fs::write(&source, "export function orphan() {}\norphan();\n").unwrap();
    codevitals()
        .args(["code", dir.path().to_str().unwrap()])
        .assert()
        .success();
    assert!(!dir.path().join("codeVitals-ts-report.json").exists());
}

#[test]
fn test_missing_path_fails_with_diagnostic() {
    codevitals()
        .args(["code", "/nonexistent/codevitals-project"])
        .assert()
        .failure();
}
