use regex::Regex;

/// CI pipeline hazards keyed to the conventional `run` and `uses` step fields
pub struct PipelineRules {
    remote_fetch: Regex,
}

impl PipelineRules {
    pub fn new() -> Self {
        Self {
            remote_fetch: Regex::new(r"curl|wget").expect("valid pattern"),
        }
    }

    /// Hazards in a `run` step command
    pub fn check_run(&self, command: &str) -> Vec<String> {
        let mut findings = Vec::new();
        if command.contains("sudo") {
            findings.push("Using sudo in run commands".to_string());
        }
        if command.contains("|| true") {
            findings.push("Ignoring exit code in run command".to_string());
        }
        if self.remote_fetch.is_match(command) {
            findings.push("Downloading unverified scripts".to_string());
        }
        findings
    }

    /// Unpinned external action reference in a `uses` field
    pub fn check_uses(&self, reference: &str) -> Option<String> {
        (reference.ends_with("@main") || reference.ends_with("@master"))
            .then(|| "Unpinned action in uses".to_string())
    }
}

impl Default for PipelineRules {
    fn default() -> Self {
        Self::new()
    }
}
