//! Per-file results and the JSON report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use grid_processor::{BoundingBox, GeographicGrid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Processed,
    Failed,
}

/// Outcome for one listed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub status: FileStatus,
    /// `[rows, cols]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<[usize; 2]>,
    /// Longitude/latitude range of the valid cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<BoundingBox>,
    /// Number of cells inside the projection domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_cells: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn processed(file: impl Into<String>, grid: &GeographicGrid) -> Self {
        let (rows, cols) = grid.shape();
        Self {
            file: file.into(),
            status: FileStatus::Processed,
            shape: Some([rows, cols]),
            extent: grid.extent(),
            valid_cells: Some(grid.valid_count()),
            error: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            status: FileStatus::Failed,
            shape: None,
            extent: None,
            valid_cells: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_processed(&self) -> bool {
        self.status == FileStatus::Processed
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        match (self.status, &self.extent, self.shape) {
            (FileStatus::Processed, Some(bbox), Some([rows, cols])) => format!(
                "{}: lat [{:.4}, {:.4}] lon [{:.4}, {:.4}] grid {}x{}",
                self.file, bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon, rows, cols
            ),
            (FileStatus::Processed, None, Some([rows, cols])) => format!(
                "{}: no cell inside the projection domain, grid {}x{}",
                self.file, rows, cols
            ),
            _ => format!(
                "{}: skipped ({})",
                self.file,
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Write all file reports as a pretty-printed JSON array.
pub fn write_report<P: AsRef<Path>>(path: P, reports: &[FileReport]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(reports).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_processor::CoordinateField;

    fn grid() -> GeographicGrid {
        GeographicGrid {
            lon: CoordinateField::new(2, 1, vec![-10.0, 5.0]).unwrap(),
            lat: CoordinateField::new(2, 1, vec![42.0, 48.5]).unwrap(),
        }
    }

    #[test]
    fn test_processed_report() {
        let report = FileReport::processed("a.txt", &grid());
        assert!(report.is_processed());
        assert_eq!(report.shape, Some([1, 2]));
        assert_eq!(report.valid_cells, Some(2));
        assert_eq!(
            report.summary(),
            "a.txt: lat [42.0000, 48.5000] lon [-10.0000, 5.0000] grid 1x2"
        );
    }

    #[test]
    fn test_failed_report_json() {
        let report = FileReport::failed("b.txt", "grid 'GRID_1' not found");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "b.txt");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "grid 'GRID_1' not found");
        assert!(json.get("shape").is_none());
        assert_eq!(report.summary(), "b.txt: skipped (grid 'GRID_1' not found)");
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let reports = vec![
            FileReport::processed("a.txt", &grid()),
            FileReport::failed("b.txt", "boom"),
        ];

        write_report(&path, &reports).unwrap();
        let read: Vec<FileReport> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, reports);
    }
}
