use regex::Regex;

/// Text-level heuristics applied to a manifest's raw contents
///
/// These match before parsing and will also fire on the marker characters
/// appearing inside unrelated strings or comments; that imprecision is
/// accepted.
pub struct TextRules {
    rm_rf: Regex,
    dynamic_import: Regex,
}

impl TextRules {
    pub fn new() -> Self {
        Self {
            rm_rf: Regex::new(r"rm\s+-rf").expect("valid pattern"),
            dynamic_import: Regex::new(r"import\s*\(.*\+.*\)").expect("valid pattern"),
        }
    }

    pub fn scan(&self, contents: &str) -> Vec<String> {
        let mut findings = Vec::new();

        if contents.contains('&') || contents.contains('*') {
            findings.push(
                "YAML contains anchors/aliases (&, *) which may hide malicious references"
                    .to_string(),
            );
        }

        if self.rm_rf.is_match(contents) {
            findings.push("Unsafe shell command: rm -rf".to_string());
        }

        if self.dynamic_import.is_match(contents) {
            findings.push("Dynamic import detected in node -e".to_string());
        }

        findings
    }
}

impl Default for TextRules {
    fn default() -> Self {
        Self::new()
    }
}
