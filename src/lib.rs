//! CodeVitals - static hygiene analysis for JavaScript/TypeScript projects
//!
//! This library provides static analysis capabilities to detect dead exports,
//! unused imports, and unsafe patterns in YAML manifests (CI pipelines,
//! Kubernetes resources, plain configuration).
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .ts/.js source files and .yml/.yaml manifests
//! 2. **Parsing** - Parse source files using tree-sitter, manifests using serde_yaml
//! 3. **Usage Analysis** - Collect declarations, imports, and a flat usage set per file
//! 4. **Policy Analysis** - Apply independent structural and security rules to manifests
//! 5. **Reporting** - Write fixed-path JSON reports under the scanned root
//!
//! The usage tracker is deliberately unscoped: a symbol counts as used if its
//! textual name occurs anywhere in the project as an identifier, regardless of
//! lexical scope or shadowing. This trades soundness for simplicity and will
//! under-report dead code when two unrelated symbols share a name.

pub mod analysis;
pub mod config;
pub mod deps;
pub mod discovery;
pub mod parser;
pub mod report;

pub use analysis::{
    DeadCodeReport, ManifestAnalyzer, UnsafePatternsReport, UnusedLocalRecord, UsageAnalyzer,
};
pub use config::Config;
pub use discovery::{FileCategory, FileFinder, ScannedFile};
pub use parser::{DocumentParser, SourceParser};
pub use report::ReportSink;
