//! File-list processing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_processor::CoordinatePipeline;
use hdfeos_parser::{grid_names, parse_with};
use tracing::{info, warn};

use crate::report::FileReport;

/// Read the list of input files: one path per line, blank lines and `#`
/// comments skipped.
pub fn read_file_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read file list {:?}", path.as_ref()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Read a metadata file. Trailing NUL padding from the HDF attribute is
/// dropped; the rest must be valid UTF-8.
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut bytes =
        fs::read(path.as_ref()).with_context(|| format!("Failed to read {:?}", path.as_ref()))?;
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes.truncate(end);
    String::from_utf8(bytes)
        .with_context(|| format!("Metadata in {:?} is not valid UTF-8", path.as_ref()))
}

/// Run the pipeline over every file, in list order.
///
/// Unreadable files and pipeline failures become failed reports; they never
/// stop the remaining files.
pub fn process_files(files: &[PathBuf], pipeline: &CoordinatePipeline) -> Vec<FileReport> {
    let loaded: Vec<(String, Result<String>)> = files
        .iter()
        .map(|path| (path.display().to_string(), read_metadata(path)))
        .collect();

    let inputs: Vec<(String, String)> = loaded
        .iter()
        .filter_map(|(name, text)| text.as_ref().ok().map(|t| (name.clone(), t.clone())))
        .collect();
    let mut outcomes = pipeline.run_batch(&inputs).into_iter();

    let mut reports = Vec::with_capacity(loaded.len());
    for (name, text) in loaded {
        let report = match text {
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(file = %name, error = %reason, "Skipping unreadable file");
                FileReport::failed(name, reason)
            }
            Ok(_) => match outcomes.next() {
                Some(outcome) => match outcome.result {
                    Ok(output) => {
                        let report = FileReport::processed(outcome.name, &output.geographic);
                        info!(
                            file = %report.file,
                            rows = output.descriptor.y_dim,
                            cols = output.descriptor.x_dim,
                            extent = ?report.extent,
                            "Computed grid coordinates"
                        );
                        report
                    }
                    Err(e) => FileReport::failed(outcome.name, e),
                },
                None => FileReport::failed(name, "no result produced"),
            },
        };
        reports.push(report);
    }

    reports
}

/// Grid names declared in each file, for `--list-grids`.
pub fn list_grids(
    files: &[PathBuf],
    pipeline: &CoordinatePipeline,
) -> Vec<(String, Result<Vec<String>>)> {
    let options = pipeline.config().parse_options();
    files
        .iter()
        .map(|path| {
            let names = read_metadata(path).and_then(|text| {
                let root = parse_with(&text, &options)?;
                Ok(grid_names(&root))
            });
            (path.display().to_string(), names)
        })
        .collect()
}
