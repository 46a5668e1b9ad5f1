mod diagnostics;
mod manifest;
pub mod rules;
mod usage;

pub use diagnostics::{is_unused_diagnostic, parse_diagnostics, run_unused_locals, UnusedLocalRecord};
pub use manifest::{FindingMap, ManifestAnalyzer, ManifestScan, UnsafePatternsReport};
pub use usage::{collect_usage, decide, DeadCodeReport, DeclarationKind, FileUsage, UsageAnalyzer};
