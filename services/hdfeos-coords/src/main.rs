//! hdfeos-coords
//!
//! Reads a list of StructMetadata files, computes per-cell longitude and
//! latitude for the selected grid of each, and prints their extents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_processor::CoordinatePipeline;
use hdfeos_parser::LiteralPolicy;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use hdfeos_coords::{
    list_grids, process_files, read_file_list, write_report, CoordsConfig, COMPLETION_MESSAGE,
};

#[derive(Parser, Debug)]
#[command(name = "hdfeos-coords")]
#[command(about = "Compute geographic coordinates for HDF-EOS grid files")]
struct Args {
    /// File listing the metadata files to process, one per line
    #[arg(short, long, env = "HDFEOS_FILE_LIST")]
    file_list: Option<PathBuf>,

    /// Grid to extract from GridStructure (default GRID_1)
    #[arg(short, long)]
    grid: Option<String>,

    /// Which of several same-named grids to use (0-based)
    #[arg(long)]
    occurrence: Option<usize>,

    /// Handling of values outside the literal grammar: reject or ignore
    #[arg(long, value_parser = parse_policy)]
    literal_policy: Option<LiteralPolicy>,

    /// YAML configuration file
    #[arg(short, long, env = "HDFEOS_CONFIG")]
    config: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Only list the grids declared in each file
    #[arg(long)]
    list_grids: bool,

    /// Process files and rows on a single thread
    #[arg(long)]
    sequential: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

fn parse_policy(value: &str) -> std::result::Result<LiteralPolicy, String> {
    LiteralPolicy::from_name(value)
        .ok_or_else(|| format!("unknown literal policy '{}', expected reject or ignore", value))
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout carries only results
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = build_config(&args)?;
    info!(
        file_list = %config.file_list.display(),
        grid = %config.processor.grid_name,
        literal_policy = ?config.processor.literal_policy,
        parallel = config.processor.parallel,
        "Starting hdfeos-coords"
    );

    let files = read_file_list(&config.file_list)?;
    if files.is_empty() {
        warn!(file_list = %config.file_list.display(), "File list is empty");
    }

    let pipeline = CoordinatePipeline::new(config.processor.clone())
        .context("Invalid grid processor configuration")?;

    if args.list_grids {
        for (file, names) in list_grids(&files, &pipeline) {
            match names {
                Ok(names) => println!("{}: {}", file, names.join(", ")),
                Err(e) => {
                    let reason = format!("{e:#}");
                    warn!(file = %file, error = %reason, "Failed to list grids");
                    println!("{}: skipped ({})", file, reason);
                }
            }
        }
        return Ok(());
    }

    let reports = process_files(&files, &pipeline);
    for report in &reports {
        if !report.is_processed() {
            warn!(file = %report.file, error = ?report.error, "File skipped");
        }
        println!("{}", report.summary());
    }

    if let Some(path) = &config.report {
        write_report(path, &reports)?;
        info!(path = %path.display(), files = reports.len(), "Wrote report");
    }

    let processed = reports.iter().filter(|r| r.is_processed()).count();
    info!(
        processed,
        failed = reports.len() - processed,
        "Finished processing file list"
    );
    println!("\n{}", COMPLETION_MESSAGE);

    Ok(())
}

/// Defaults, then YAML, then environment, then flags.
fn build_config(args: &Args) -> Result<CoordsConfig> {
    let mut config = CoordsConfig::load(args.config.as_deref())?;

    if let Some(file_list) = &args.file_list {
        config.file_list = file_list.clone();
    }
    if let Some(report) = &args.report {
        config.report = Some(report.clone());
    }
    if let Some(grid) = &args.grid {
        config.processor.grid_name = grid.clone();
    }
    if let Some(occurrence) = args.occurrence {
        config.processor.grid_occurrence = occurrence;
    }
    if let Some(policy) = args.literal_policy {
        config.processor.literal_policy = policy;
    }
    if args.sequential {
        config.processor.parallel = false;
    }

    config.validate()?;
    Ok(config)
}
