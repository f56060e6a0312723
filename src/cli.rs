//! Command-line interface for structscan.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::analysis::Registry;
use crate::config::{self, Config, DEFAULT_CONFIG_NAMES, DEFAULT_TEMPLATE};
use crate::report::{self, FileReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static source-structure extraction.
///
/// structscan reads source files and prints their classes, methods, nested
/// classes, module-level functions, imports and top-level variables, with
/// parameter types, return types and docstrings. Python is parsed with a real
/// grammar; TypeScript and JavaScript are scanned with patterns.
#[derive(Parser)]
#[command(name = "structscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the structure of one or more source files
    Analyze(AnalyzeArgs),
    /// Write a default structscan config file
    Init(InitArgs),
    /// List supported languages and file extensions
    Languages,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Source files to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to config YAML file (default: auto-discover, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "structscan.yaml")]
    pub output: PathBuf,
}

/// Files that produced a report, and the number that could not be analyzed.
pub struct AnalyzeOutcome {
    pub reports: Vec<FileReport>,
    pub failed: usize,
}

/// Load the config named on the command line, else a discovered one, else
/// the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(&std::env::current_dir()?),
    };

    let config = match path {
        Some(ref p) => Config::parse_file(p)?,
        None => Config::default(),
    };
    config::validate(&config)?;
    Ok((config, path))
}

/// Read one file and analyze it. Returns `None` when the file cannot be read
/// or no analyzer handles it.
fn analyze_file(registry: &Registry, path: &Path) -> Option<FileReport> {
    if registry.for_path(path).is_none() {
        warn!(path = %path.display(), "unsupported file type");
        return None;
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read file");
            return None;
        }
    };
    let source = String::from_utf8_lossy(&bytes);

    let (language, summary) = registry.analyze(path, &source)?;
    debug!(path = %path.display(), language, %summary, "analyzed");

    Some(FileReport {
        path: path.to_string_lossy().to_string(),
        language: language.to_string(),
        summary,
    })
}

/// Analyze `files` in parallel. Reports come back sorted by path.
pub fn analyze_files(registry: &Registry, files: &[PathBuf]) -> AnalyzeOutcome {
    let results: Vec<Option<FileReport>> = files
        .par_iter()
        .map(|path| analyze_file(registry, path))
        .collect();

    let failed = results.iter().filter(|r| r.is_none()).count();
    let mut reports: Vec<FileReport> = results.into_iter().flatten().collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    AnalyzeOutcome { reports, failed }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (config, config_path) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    match config_path {
        Some(ref p) => debug!(path = %p.display(), "using config"),
        None => debug!(
            "no config file found (looked for {}), using defaults",
            DEFAULT_CONFIG_NAMES.join(", ")
        ),
    }

    let registry = Registry::new(&config);
    let outcome = analyze_files(&registry, &args.files);

    match args.format.as_str() {
        "json" => report::write_json(&outcome.reports)?,
        _ => report::write_pretty(&outcome.reports),
    }

    if outcome.failed > 0 {
        eprintln!(
            "Warning: {} of {} files could not be analyzed",
            outcome.failed,
            args.files.len()
        );
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to adjust import narrowing", args.output.display());
    println!(
        "  2. Run: structscan analyze <FILES> --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    let registry = Registry::default();

    println!("Supported languages:");
    println!();
    for analyzer in registry.analyzers() {
        let extensions: Vec<String> = analyzer
            .file_extensions()
            .iter()
            .map(|e| format!(".{}", e))
            .collect();
        println!("  {:<12} {}", analyzer.language_id(), extensions.join(" "));
    }

    Ok(EXIT_SUCCESS)
}
