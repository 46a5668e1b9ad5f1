use crate::analysis::rules::{
    check_security_context, check_workload_policy, containers, PipelineRules, SecretRules,
    TextRules,
};
use crate::config::Config;
use crate::discovery::FileFinder;
use crate::parser::DocumentParser;
use miette::Result;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Findings grouped per file; only files with findings appear
pub type FindingMap = BTreeMap<String, Vec<String>>;

/// JSON shape shared by the generic and workload report files
#[derive(Debug, Serialize)]
pub struct UnsafePatternsReport {
    #[serde(rename = "unsafePatterns")]
    pub unsafe_patterns: FindingMap,
}

impl UnsafePatternsReport {
    pub fn new(unsafe_patterns: FindingMap) -> Self {
        Self { unsafe_patterns }
    }
}

/// Findings from one sweep over the manifest tree, one map per report file
#[derive(Debug, Default)]
pub struct ManifestScan {
    pub generic: FindingMap,
    pub workload: FindingMap,
}

/// Manifest policy analyzer
///
/// Walks every YAML manifest under the root and applies independent rule
/// families: text-level heuristics, a recursive secret/CI/Kubernetes walk
/// with a dotted path trace, and the workload policy, all fed from a single
/// read and parse of each file. Rules are pure functions composed here; an
/// unexpected document shape means "rule does not match", never an error.
pub struct ManifestAnalyzer<'a> {
    config: &'a Config,
    text_rules: TextRules,
    secret_rules: SecretRules,
    pipeline_rules: PipelineRules,
}

impl<'a> ManifestAnalyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            text_rules: TextRules::new(),
            secret_rules: SecretRules::new(),
            pipeline_rules: PipelineRules::new(),
        }
    }

    /// Both rule passes over every manifest under the root; each file is
    /// read and parsed once, feeding the generic rules and the workload
    /// policy from the same document trees
    pub fn scan(&self, root: &Path) -> Result<ManifestScan> {
        let mut scan = ManifestScan::default();

        for file in FileFinder::new(self.config).find_manifest_files(root) {
            let contents = match std::fs::read_to_string(&file.path) {
                Ok(contents) => contents,
                Err(err) => {
                    warn!("Failed to read {}: {}", file.path.display(), err);
                    continue;
                }
            };

            let (generic, workload) = self.scan_both(&contents);
            if !generic.is_empty() {
                scan.generic.insert(file.path.display().to_string(), generic);
            }
            if !workload.is_empty() {
                scan.workload.insert(file.path.display().to_string(), workload);
            }
        }

        Ok(scan)
    }

    /// Generic rules only: text heuristics, secrets, CI hazards, container
    /// security contexts
    pub fn scan_generic(&self, root: &Path) -> Result<FindingMap> {
        Ok(self.scan(root)?.generic)
    }

    /// Workload-policy findings only
    pub fn scan_workload(&self, root: &Path) -> Result<FindingMap> {
        Ok(self.scan(root)?.workload)
    }

    /// Generic rules for one manifest's text
    pub fn scan_contents(&self, contents: &str) -> Vec<String> {
        self.scan_both(contents).0
    }

    /// Workload-policy rules for one manifest's text; a parse failure is
    /// empty here because the generic findings already record it
    pub fn scan_workload_contents(&self, contents: &str) -> Vec<String> {
        self.scan_both(contents).1
    }

    fn scan_both(&self, contents: &str) -> (Vec<String>, Vec<String>) {
        let mut generic = self.text_rules.scan(contents);

        let documents = match DocumentParser::parse_str(contents) {
            Ok(documents) => documents,
            Err(err) => {
                debug!("YAML parse failure: {}", err);
                // A file that fails to parse is reported with this single
                // finding; findings from earlier rules are discarded
                return (vec!["Failed to parse YAML".to_string()], Vec::new());
            }
        };

        for document in &documents {
            self.walk_document(document, "", &mut generic);
        }
        let workload = documents.iter().flat_map(check_workload_policy).collect();

        (generic, workload)
    }

    /// Recursive walk over a document tree, accumulating a dotted path trace
    /// from the document root (sequence indices appear as numeric segments)
    fn walk_document(&self, value: &Value, path: &str, findings: &mut Vec<String>) {
        match value {
            Value::Mapping(mapping) => {
                for (key, entry) in mapping {
                    let Some(key_name) = key.as_str() else {
                        // Non-string keys carry no rule semantics; keep walking
                        self.walk_document(entry, path, findings);
                        continue;
                    };

                    let current = join_path(path, key_name);

                    if let Some(text) = entry.as_str() {
                        if let Some(finding) = self.secret_rules.check(key_name, text, &current) {
                            findings.push(finding);
                        }
                        if key_name == "run" {
                            findings.extend(self.pipeline_rules.check_run(text));
                        }
                        if key_name == "uses" {
                            if let Some(finding) = self.pipeline_rules.check_uses(text) {
                                findings.push(finding);
                            }
                        }
                    }

                    // `kind` anchors the Kubernetes container checks to the
                    // mapping that holds it
                    if key_name == "kind" {
                        if let Some(kind) =
                            entry.as_str().filter(|kind| matches!(*kind, "Pod" | "Deployment"))
                        {
                            for container in containers(value, kind) {
                                findings.extend(check_security_context(container));
                            }
                        }
                    }

                    self.walk_document(entry, &current, findings);
                }
            }
            Value::Sequence(sequence) => {
                for (index, item) in sequence.iter().enumerate() {
                    let current = join_path(path, &index.to_string());
                    self.walk_document(item, &current, findings);
                }
            }
            Value::Tagged(tagged) => self.walk_document(&tagged.value, path, findings),
            _ => {}
        }
    }
}

fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}
