//! Dependency health checks
//!
//! A thin sequential wrapper around the package manager: `npm audit` for
//! known vulnerabilities and `npm outdated` for stale packages. Both
//! subcommands emit JSON; this module only parses and summarizes it. Every
//! failure (missing npm, non-JSON output) is logged and non-fatal.

use colored::Colorize;
use miette::Result;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

pub fn run_dependency_check(root: &Path) -> Result<()> {
    audit(root);
    outdated(root);
    Ok(())
}

fn npm_json(root: &Path, subcommand: &str) -> Option<Value> {
    // npm exits non-zero when it has findings; the JSON on stdout is still
    // the result
    let output = match Command::new("npm")
        .args([subcommand, "--json"])
        .current_dir(root)
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            warn!("Failed to run npm {}: {}", subcommand, err);
            return None;
        }
    };

    if output.stdout.is_empty() {
        return Some(Value::Object(Default::default()));
    }

    match serde_json::from_slice(&output.stdout) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("npm {} produced unparseable output: {}", subcommand, err);
            None
        }
    }
}

fn audit(root: &Path) {
    info!("Running npm audit...");
    let Some(report) = npm_json(root, "audit") else {
        return;
    };

    let total = report
        .pointer("/metadata/vulnerabilities/total")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    if total == 0 {
        println!("{}", "✓ No vulnerabilities found".green());
    } else {
        warn!("{} vulnerabilities found", total);
        if let Some(by_severity) = report
            .pointer("/metadata/vulnerabilities")
            .and_then(Value::as_object)
        {
            for (severity, count) in by_severity {
                if severity == "total" {
                    continue;
                }
                if let Some(count) = count.as_u64().filter(|count| *count > 0) {
                    println!("  {}: {}", severity, count);
                }
            }
        }
    }
}

fn outdated(root: &Path) {
    info!("Checking outdated packages...");
    let Some(report) = npm_json(root, "outdated") else {
        return;
    };

    let Some(packages) = report.as_object() else {
        warn!("npm outdated produced an unexpected shape");
        return;
    };

    if packages.is_empty() {
        println!("{}", "✓ No outdated packages found".green());
        return;
    }

    warn!("{} outdated packages found", packages.len());
    for (package, versions) in packages {
        let field = |name: &str| {
            versions
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string()
        };
        println!(
            "  {}",
            format!(
                "{}: current={}, wanted={}, latest={}",
                package,
                field("current"),
                field("wanted"),
                field("latest")
            )
            .yellow()
        );
    }
}
