use regex::Regex;

/// Secret-indicator patterns tested against composed "key: value" text
pub struct SecretRules {
    patterns: Vec<Regex>,
}

impl SecretRules {
    pub fn new() -> Self {
        let patterns = [
            r"(?i)aws_secret_access_key\s*:\s*[A-Za-z0-9/+=]{40}",
            r"(?i)password\s*:\s*.+",
            r"(?i)token\s*:\s*.+",
            r"(?i)credentials?\s*:\s*.+",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid pattern"))
        .collect();

        Self { patterns }
    }

    /// Check one scalar string value against the secret indicators
    pub fn check(&self, key: &str, value: &str, path: &str) -> Option<String> {
        let composed = format!("{}: {}", key, value);
        self.patterns
            .iter()
            .any(|pattern| pattern.is_match(&composed))
            .then(|| format!("Hardcoded secret detected at {}", path))
    }
}

impl Default for SecretRules {
    fn default() -> Self {
        Self::new()
    }
}
