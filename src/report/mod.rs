use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Report sink for the fixed-path JSON reports written under the scanned root
///
/// Every report family follows the same policy: when the run produced
/// findings the report is written (pretty-printed, deterministically
/// ordered), and when it produced none a stale report from a previous run is
/// deleted. Each report file therefore always reflects only the most recent
/// run.
pub struct ReportSink {
    root: PathBuf,
}

impl ReportSink {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Write `payload` to `file_name`, or remove a stale report when the
    /// payload is `None`. Returns the report path when one was written.
    pub fn write_or_clean<T: Serialize>(
        &self,
        file_name: &str,
        concern: &str,
        payload: Option<&T>,
    ) -> Result<Option<PathBuf>> {
        let path = self.root.join(file_name);

        match payload {
            Some(payload) => {
                let json = serde_json::to_string_pretty(payload)
                    .into_diagnostic()
                    .wrap_err("Failed to serialize report")?;
                std::fs::write(&path, json)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to write report: {}", path.display()))?;
                warn!("{} detected! Report: {}", concern, path.display());
                Ok(Some(path))
            }
            None => {
                if path.exists() {
                    debug!("Removing stale report: {}", path.display());
                    std::fs::remove_file(&path)
                        .into_diagnostic()
                        .wrap_err_with(|| {
                            format!("Failed to remove stale report: {}", path.display())
                        })?;
                }
                println!("{}", format!("✓ No {} detected", concern.to_lowercase()).green());
                Ok(None)
            }
        }
    }
}
