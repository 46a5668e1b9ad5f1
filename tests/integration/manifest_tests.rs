//! Integration tests for the manifest policy analyzer against the YAML
//! fixtures.

use codevitals::analysis::ManifestAnalyzer;
use codevitals::config::Config;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/yaml")
}

fn findings_for<'a>(
    findings: &'a codevitals::analysis::FindingMap,
    file_name: &str,
) -> &'a Vec<String> {
    findings
        .iter()
        .find(|(file, _)| file.ends_with(file_name))
        .map(|(_, messages)| messages)
        .unwrap_or_else(|| panic!("expected findings for {}", file_name))
}

#[test]
fn test_ci_pipeline_hazards() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_generic(&fixtures_path())
        .unwrap();

    let messages = findings_for(&findings, "ci.yml");
    assert!(messages.iter().any(|m| m == "Using sudo in run commands"));
    assert!(messages.iter().any(|m| m == "Downloading unverified scripts"));
    assert!(messages.iter().any(|m| m == "Unpinned action in uses"));
    assert!(messages
        .iter()
        .any(|m| m == "Hardcoded secret detected at env.password"));
}

#[test]
fn test_privileged_container_named_in_finding() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_generic(&fixtures_path())
        .unwrap();

    let messages = findings_for(&findings, "deployment.yml");
    assert!(messages.iter().any(|m| m == "Container 'web' runs as privileged"));
}

#[test]
fn test_anchor_heuristic() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_generic(&fixtures_path())
        .unwrap();

    let messages = findings_for(&findings, "anchors.yml");
    assert!(messages.iter().any(|m| m.contains("anchors/aliases")));
}

#[test]
fn test_parse_failure_is_recorded_per_file() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_generic(&fixtures_path())
        .unwrap();

    let messages = findings_for(&findings, "invalid.yml");
    assert_eq!(messages, &vec!["Failed to parse YAML".to_string()]);
}

#[test]
fn test_clean_manifest_has_no_entry() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_generic(&fixtures_path())
        .unwrap();

    assert!(!findings.keys().any(|file| file.ends_with("clean.yml")));
}

#[test]
fn test_workload_policy_findings() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_workload(&fixtures_path())
        .unwrap();

    let messages = findings_for(&findings, "deployment.yml");
    assert!(messages
        .iter()
        .any(|m| m == "Workload has fewer than 2 replicas (replicas: 1)"));
    assert!(messages
        .iter()
        .any(|m| m == "Container 'web' uses mutable ':latest' image tag"));
    assert!(messages.iter().any(|m| m == "Container 'web' has no resource limits"));
    assert!(messages.iter().any(|m| m == "Container 'web' has no liveness probe"));
    assert!(messages.iter().any(|m| m == "Container 'web' has no readiness probe"));
}

#[test]
fn test_workload_pass_ignores_non_workload_files() {
    let config = Config::default();
    let findings = ManifestAnalyzer::new(&config)
        .scan_workload(&fixtures_path())
        .unwrap();

    assert!(!findings.keys().any(|file| file.ends_with("ci.yml")));
    assert!(!findings.keys().any(|file| file.ends_with("clean.yml")));
    assert!(!findings.keys().any(|file| file.ends_with("invalid.yml")));
}

#[test]
fn test_generic_scan_is_deterministic() {
    let config = Config::default();
    let analyzer = ManifestAnalyzer::new(&config);

    let first = analyzer.scan_generic(&fixtures_path()).unwrap();
    let second = analyzer.scan_generic(&fixtures_path()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
