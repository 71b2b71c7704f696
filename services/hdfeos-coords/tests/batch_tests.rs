//! Tests for file-list processing and the command-line binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use grid_processor::{CoordinatePipeline, GridProcessorConfig};
use hdfeos_coords::{
    list_grids, process_files, read_file_list, write_report, FileReport, FileStatus,
    COMPLETION_MESSAGE,
};
use test_utils::{assert_approx_eq, fixtures, sinusoidal_metadata, tiles};

/// Write `files` into `dir` plus a `fileList.txt` naming them in order.
fn write_inputs(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    let mut list = String::new();
    for (name, content) in files {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        list.push_str(&format!("{}\n", path.display()));
    }
    let list_path = dir.join("fileList.txt");
    fs::write(&list_path, list).unwrap();
    list_path
}

// ============================================================================
// Library-level processing
// ============================================================================

#[test]
fn test_process_files_continues_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let h17 = sinusoidal_metadata(tiles::H17V04, 24, 24);
    let foo = fixtures::single_grid_metadata(tiles::H17V04, 4, 4, "foo", "6371007.181");
    let list_path = write_inputs(
        dir.path(),
        &[
            ("h17v04.txt", h17.as_str()),
            ("broken.txt", "GROUP=GridStructure\nEND_GROUP=GRID_1\nEND\n"),
            ("foo.txt", foo.as_str()),
        ],
    );
    // A listed file that does not exist
    fs::write(
        &list_path,
        format!(
            "{}\n{}\n\n{}\n{}\n",
            dir.path().join("h17v04.txt").display(),
            dir.path().join("missing.txt").display(),
            dir.path().join("broken.txt").display(),
            dir.path().join("foo.txt").display(),
        ),
    )
    .unwrap();

    let files = read_file_list(&list_path).unwrap();
    assert_eq!(files.len(), 4);

    let reports = process_files(&files, &CoordinatePipeline::default());
    let statuses: Vec<FileStatus> = reports.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        [
            FileStatus::Processed,
            FileStatus::Failed,
            FileStatus::Failed,
            FileStatus::Failed
        ]
    );

    let ok = &reports[0];
    assert_eq!(ok.shape, Some([24, 24]));
    let extent = ok.extent.unwrap();
    assert!(extent.min_lat > 40.0 - 1e-6 && extent.max_lat < 50.0);

    assert!(reports[1].error.as_deref().unwrap().contains("missing.txt"));
    assert!(reports[2].error.as_deref().unwrap().contains("line 2"));
    assert!(reports[3].error.as_deref().unwrap().contains("foo"));
}

#[test]
fn test_sequential_and_parallel_reports_match() {
    let dir = tempfile::tempdir().unwrap();
    let a = sinusoidal_metadata(tiles::H09V05, 16, 12);
    let b = sinusoidal_metadata(tiles::H00V08, 16, 12);
    let list_path = write_inputs(dir.path(), &[("a.txt", a.as_str()), ("b.txt", b.as_str())]);
    let files = read_file_list(&list_path).unwrap();

    let parallel = process_files(&files, &CoordinatePipeline::default());
    let sequential = process_files(
        &files,
        &CoordinatePipeline::new(GridProcessorConfig {
            parallel: false,
            ..Default::default()
        })
        .unwrap(),
    );
    assert_eq!(parallel, sequential);
}

#[test]
fn test_list_grids() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = write_inputs(
        dir.path(),
        &[("mcd19a2.txt", fixtures::MCD19A2_H17V04), ("dup.txt", fixtures::DUPLICATE_GRID_1)],
    );
    let files = read_file_list(&list_path).unwrap();

    let listed = list_grids(&files, &CoordinatePipeline::default());
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].1.as_ref().unwrap(), &["GRID_1", "GRID_2"]);
    assert_eq!(listed[1].1.as_ref().unwrap(), &["GRID_1", "GRID_1"]);
}

#[test]
fn test_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let text = sinusoidal_metadata(tiles::H17V04, 8, 8);
    let list_path = write_inputs(dir.path(), &[("a.txt", text.as_str())]);
    let reports = process_files(
        &read_file_list(&list_path).unwrap(),
        &CoordinatePipeline::default(),
    );

    let report_path = dir.path().join("report.json");
    write_report(&report_path, &reports).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json[0]["status"], "processed");
    assert_eq!(json[0]["shape"], serde_json::json!([8, 8]));
    assert!(json[0]["extent"]["min_lat"].as_f64().unwrap() > 39.0);

    let parsed: Vec<FileReport> = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].file, reports[0].file);
    assert_eq!(parsed[0].shape, reports[0].shape);
    let (read, computed) = (parsed[0].extent.unwrap(), reports[0].extent.unwrap());
    assert_approx_eq!(read.min_lon, computed.min_lon, 1e-9);
    assert_approx_eq!(read.max_lat, computed.max_lat, 1e-9);
}

// ============================================================================
// Binary
// ============================================================================

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hdfeos-coords"));
    cmd.env_remove("RUST_LOG")
        .env_remove("HDFEOS_FILE_LIST")
        .env_remove("HDFEOS_CONFIG")
        .env_remove("HDFEOS_GRID_NAME")
        .env_remove("HDFEOS_GRID_OCCURRENCE")
        .env_remove("HDFEOS_LITERAL_POLICY")
        .env_remove("HDFEOS_PARALLEL");
    cmd
}

#[test]
fn test_binary_processes_list_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let good = sinusoidal_metadata(tiles::H17V04, 10, 10);
    let list_path = write_inputs(
        dir.path(),
        &[("good.txt", good.as_str()), ("bad.txt", "OBJECT=GRID_1\n")],
    );
    let report_path = dir.path().join("out").join("report.json");

    let output = binary()
        .current_dir(dir.path())
        .arg("--file-list")
        .arg(&list_path)
        .arg("--report")
        .arg(&report_path)
        .arg("--log-level")
        .arg("warn")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("good.txt: lat ["), "stdout: {}", stdout);
    assert!(stdout.contains("bad.txt: skipped"), "stdout: {}", stdout);
    assert!(stdout.trim_end().ends_with(COMPLETION_MESSAGE));

    let reports: Vec<FileReport> =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].is_processed());
    assert!(!reports[1].is_processed());
}

#[test]
fn test_binary_reads_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let list_path = write_inputs(dir.path(), &[("dup.txt", fixtures::DUPLICATE_GRID_1)]);
    let config_path = dir.path().join("coords.yaml");
    fs::write(
        &config_path,
        format!(
            "file_list: {}\ngrid_occurrence: 1\nparallel: false\n",
            list_path.display()
        ),
    )
    .unwrap();

    let output = binary()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("grid 8x20"), "stdout: {}", stdout);
}

#[test]
fn test_binary_defaults_to_file_list_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let text = sinusoidal_metadata(tiles::H09V05, 6, 6);
    write_inputs(dir.path(), &[("tile.txt", text.as_str())]);

    let output = binary().current_dir(dir.path()).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("grid 6x6"));
}

#[test]
fn test_binary_fails_without_file_list() {
    let dir = tempfile::tempdir().unwrap();

    let output = binary().current_dir(dir.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains(COMPLETION_MESSAGE));
}

#[test]
fn test_binary_rejects_unknown_policy() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), &[]);

    let output = binary()
        .current_dir(dir.path())
        .args(["--literal-policy", "eval"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
