//! Integration tests for the symbol usage analyzer
//!
//! These run the complete collect-then-decide pipeline against the fixture
//! project and against scratch trees.

use codevitals::analysis::UsageAnalyzer;
use codevitals::config::Config;
use codevitals::report::ReportSink;
use std::fs;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ts")
}

fn dead_names(report: &codevitals::analysis::DeadCodeReport) -> Vec<String> {
    report.dead_exports.values().flatten().cloned().collect()
}

#[test]
fn test_dead_exports_across_files() {
    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(&fixtures_path()).unwrap();

    let dead = dead_names(&report);
    assert!(dead.contains(&"orphanHelper".to_string()));
    assert!(dead.contains(&"OrphanWidget".to_string()));

    // Used across files: declared in helpers.ts, referenced in app.ts
    assert!(!dead.contains(&"formatName".to_string()));
    // Used within its own file
    assert!(!dead.contains(&"main".to_string()));
    assert!(!dead.contains(&"start".to_string()));
}

#[test]
fn test_dynamic_import_literal_rescues_export() {
    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(&fixtures_path()).unwrap();

    // `reporter` is only referenced as import("reporter"); the string
    // literal counts as a usage
    assert!(!dead_names(&report).contains(&"reporter".to_string()));
}

#[test]
fn test_unused_import_is_file_local() {
    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(&fixtures_path()).unwrap();

    let (file, names) = report
        .unused_imports
        .iter()
        .find(|(file, _)| file.ends_with("app.ts"))
        .expect("app.ts should have an unused import");
    assert!(file.ends_with("app.ts"));
    assert_eq!(names, &vec!["unusedThing".to_string()]);
}

#[test]
fn test_project_with_no_references_reports_everything_dead() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("solo.ts"),
        "export function alpha() {}\nexport class Beta {}\n",
    )
    .unwrap();

    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(dir.path()).unwrap();

    let dead = dead_names(&report);
    assert!(dead.contains(&"alpha".to_string()));
    assert!(dead.contains(&"Beta".to_string()));
}

#[test]
fn test_ignored_directories_do_not_contribute() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.ts"), "export function lonely() {}\n").unwrap();

    // A reference hidden inside node_modules must not rescue the export
    let vendored = dir.path().join("node_modules/pkg");
    fs::create_dir_all(&vendored).unwrap();
    fs::write(vendored.join("index.ts"), "lonely();\n").unwrap();

    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(dir.path()).unwrap();
    assert!(dead_names(&report).contains(&"lonely".to_string()));
}

#[test]
fn test_unparseable_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.ts"), "export function keeper() {}\nkeeper();\n").unwrap();
    // Invalid UTF-8 forces a read failure
    fs::write(dir.path().join("bad.ts"), b"\xff\xfe\x00").unwrap();

    let config = Config::default();
    let report = UsageAnalyzer::new(&config).analyze(dir.path()).unwrap();
    assert!(!dead_names(&report).contains(&"keeper".to_string()));
}

#[test]
fn test_report_write_is_idempotent_and_clean_run_deletes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dead.ts"), "export function orphan() {}\n").unwrap();

    let config = Config::default();
    let analyzer = UsageAnalyzer::new(&config);
    let sink = ReportSink::new(dir.path());

    // Two runs with findings produce byte-identical reports
    let report = analyzer.analyze(dir.path()).unwrap();
    assert!(!report.is_empty());
    let path = sink
        .write_or_clean(&config.reports.dead_code, "Dead exports", Some(&report))
        .unwrap()
        .unwrap();
    let first = fs::read(&path).unwrap();

    let report = analyzer.analyze(dir.path()).unwrap();
    sink.write_or_clean(&config.reports.dead_code, "Dead exports", Some(&report))
        .unwrap();
    assert_eq!(first, fs::read(&path).unwrap());

    // Fixing the project deletes the stale report
    fs::write(dir.path().join("dead.ts"), "export function orphan() {}\norphan();\n").unwrap();
    let report = analyzer.analyze(dir.path()).unwrap();
    assert!(report.is_empty());
    sink.write_or_clean::<codevitals::analysis::DeadCodeReport>(
        &config.reports.dead_code,
        "Dead exports",
        None,
    )
    .unwrap();
    assert!(!path.exists());
}
