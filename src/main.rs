use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::info;

use codevitals::analysis::{self, ManifestAnalyzer, UnsafePatternsReport, UsageAnalyzer};
use codevitals::config::Config;
use codevitals::deps;
use codevitals::report::ReportSink;

/// CodeVitals - analyze JS/TS project health: dead code, misconfigurations,
/// and dependencies
#[derive(Parser, Debug)]
#[command(name = "codevitals")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check for dead exports, unused imports, and unsafe YAML manifests
    Code {
        /// Path to the project directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check dependency health (npm audit + outdated)
    Deps {
        /// Path to the project directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Code { path, config } => run_code_check(&path, config.as_deref()),
        Command::Deps { path } => {
            info!("Running dependency checks...");
            deps::run_dependency_check(&path)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Run the full static hygiene pass: symbol usage, delegated compiler
/// diagnostics, generic manifest rules, workload policy - in that order
fn run_code_check(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let root = path
        .canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot resolve project root: {}", path.display()))?;

    let config = match config_path {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::from_default_locations(&root)?,
    };

    info!("Running dead code checks in {}", root.display());
    let sink = ReportSink::new(&root);

    let dead_code = UsageAnalyzer::new(&config).analyze(&root)?;
    sink.write_or_clean(
        &config.reports.dead_code,
        "Dead exports or unused imports",
        (!dead_code.is_empty()).then_some(&dead_code),
    )?;

    let diagnostics = analysis::run_unused_locals(&root);
    sink.write_or_clean(
        &config.reports.diagnostics,
        "Unused local diagnostics",
        (!diagnostics.is_empty()).then_some(&diagnostics),
    )?;

    let manifests = ManifestAnalyzer::new(&config).scan(&root)?;

    let generic_report =
        (!manifests.generic.is_empty()).then(|| UnsafePatternsReport::new(manifests.generic));
    sink.write_or_clean(
        &config.reports.manifest,
        "Unsafe YAML patterns",
        generic_report.as_ref(),
    )?;

    let workload_report =
        (!manifests.workload.is_empty()).then(|| UnsafePatternsReport::new(manifests.workload));
    sink.write_or_clean(
        &config.reports.workload,
        "Workload policy violations",
        workload_report.as_ref(),
    )?;

    Ok(())
}
