//! Coordinate grids for HDF-EOS gridded products.
//!
//! This crate turns the grid geometry declared in a StructMetadata block
//! into per-cell coordinates:
//!
//! - **Native grid**: projected x/y (meters) of every cell, row 0 north
//! - **Geographic grid**: longitude/latitude (degrees) of every cell
//! - **Batch runs**: many files processed in parallel, results in input order
//!
//! # Architecture
//!
//! ```text
//! StructMetadata.0 text
//!      │
//!      ▼
//! hdfeos_parser::parse_with ──► Group tree
//!      │
//!      ├─► extract_grid_occurrence ──► GridDescriptor
//!      │
//!      ├─► build_native_grid ──► NativeGrid (x, y)
//!      │
//!      └─► reproject_grid (rayon, per row) ──► GeographicGrid (lon, lat)
//! ```
//!
//! # Example
//!
//! ```
//! use grid_processor::{CoordinatePipeline, GridProcessorConfig};
//!
//! let metadata = "GROUP=GridStructure
//! GROUP=GRID_1
//! XDim=3
//! YDim=2
//! UpperLeftPointMtrs=(-1111950.519667,5559752.598333)
//! LowerRightMtrs=(0.000000,4447802.078667)
//! Projection=GCTP_SNSOID
//! ProjParams=(6371007.181000,0,0,0,0,0,0,0,0,0,0,0,0)
//! END_GROUP=GRID_1
//! END_GROUP=GridStructure
//! END";
//!
//! let pipeline = CoordinatePipeline::new(GridProcessorConfig::default()).unwrap();
//! let grid = pipeline.run(metadata).unwrap();
//! assert_eq!(grid.shape(), (2, 3));
//! ```

pub mod config;
pub mod error;
pub mod native;
pub mod pipeline;
pub mod projection;
pub mod types;

// Re-exports for convenience
pub use config::GridProcessorConfig;
pub use error::{GridProcessorError, Result};
pub use native::build_native_grid;
pub use pipeline::{BatchOutcome, CoordinatePipeline, PipelineOutput};
pub use self::projection::{reproject_grid, to_geographic, to_geographic_with};
pub use types::{BoundingBox, CoordinateField, GeographicGrid, NativeGrid};
