use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a CodeVitals run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory names skipped during the walk
    pub ignore_dirs: Vec<String>,

    /// Extensions treated as source files
    pub source_extensions: Vec<String>,

    /// Extensions treated as YAML manifests
    pub manifest_extensions: Vec<String>,

    /// Report file names, resolved against the scanned root
    pub reports: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Combined dead-export / unused-import report
    pub dead_code: String,

    /// Delegated compiler diagnostics report
    pub diagnostics: String,

    /// Generic manifest findings report
    pub manifest: String,

    /// Workload policy findings report
    pub workload: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            source_extensions: vec!["ts".to_string(), "js".to_string()],
            manifest_extensions: vec!["yml".to_string(), "yaml".to_string()],
            reports: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dead_code: "codeVitals-ts-report.json".to_string(),
            diagnostics: "codeVitals-tsc-report.json".to_string(),
            manifest: "codeVitals-yaml-report.json".to_string(),
            workload: "codeVitals-workload-report.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML, by extension)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Look for a config file in the conventional locations under `root`,
    /// falling back to defaults when none exists
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        for name in ["codevitals.toml", "codevitals.yml", "codevitals.yaml"] {
            let path = root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Check whether a directory name is on the ignore list
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == name)
    }

    /// Check whether an extension names a source file (case-insensitive)
    pub fn is_source_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.source_extensions.iter().any(|e| *e == extension)
    }

    /// Check whether an extension names a manifest file (case-insensitive)
    pub fn is_manifest_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.manifest_extensions.iter().any(|e| *e == extension)
    }
}
