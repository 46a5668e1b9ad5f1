use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// One retained compiler diagnostic, shaped for the JSON report
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnusedLocalRecord {
    pub file: String,
    /// "[line,col] <diagnostic text>", 1-based
    pub message: String,
}

/// Delegated unused-locals check
///
/// Detection is the TypeScript compiler's responsibility; this check only
/// discovers a compiler configuration, invokes `tsc`, and filters and shapes
/// the diagnostics it emits. A missing tsconfig or a missing `tsc` binary is
/// a warning, never an error.
pub fn run_unused_locals(root: &Path) -> Vec<UnusedLocalRecord> {
    let tsconfig = root.join("tsconfig.json");
    if !tsconfig.exists() {
        warn!(
            "No tsconfig.json found in {}; skipping compiler diagnostics",
            root.display()
        );
        return Vec::new();
    }

    let output = match Command::new("tsc")
        .args([
            "--noEmit",
            "--pretty",
            "false",
            "--noUnusedLocals",
            "--noUnusedParameters",
        ])
        .current_dir(root)
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            warn!("Failed to run tsc: {}", err);
            return Vec::new();
        }
    };

    // tsc exits non-zero whenever diagnostics exist; the exit code carries no
    // extra information here
    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!("tsc produced {} bytes of diagnostics", stdout.len());
    parse_diagnostics(&stdout)
}

/// Parse `file(line,col): message` diagnostic lines, keeping only the
/// unused-local and unused-parameter ones
pub fn parse_diagnostics(output: &str) -> Vec<UnusedLocalRecord> {
    let line_pattern =
        Regex::new(r"^(?P<file>.+?)\((?P<line>\d+),(?P<col>\d+)\):\s*(?P<message>.+)$")
            .expect("valid diagnostic pattern");

    output
        .lines()
        .filter_map(|line| {
            let captures = line_pattern.captures(line.trim_end())?;
            let message = captures.name("message")?.as_str();
            if !is_unused_diagnostic(message) {
                return None;
            }
            Some(UnusedLocalRecord {
                file: captures.name("file")?.as_str().to_string(),
                message: format!(
                    "[{},{}] {}",
                    captures.name("line")?.as_str(),
                    captures.name("col")?.as_str(),
                    message
                ),
            })
        })
        .collect()
}

/// The two retained message shapes: unused locals, and unused parameters
pub fn is_unused_diagnostic(message: &str) -> bool {
    if message.contains("declared but its value is never read") {
        return true;
    }
    let lower = message.to_lowercase();
    lower.contains("parameter") && lower.contains("never used")
}
