//! hdfeos-coords
//!
//! Computes the longitude/latitude of every grid cell for a list of HDF-EOS
//! StructMetadata files and reports the geographic extent of each.

pub mod config;
pub mod report;
pub mod runner;

pub use config::{load_config_file, CoordsConfig, DEFAULT_FILE_LIST};
pub use report::{write_report, FileReport, FileStatus};
pub use runner::{list_grids, process_files, read_file_list, read_metadata};

/// Final line printed after every file has been attempted.
pub const COMPLETION_MESSAGE: &str = "All valid files have been processed.";
