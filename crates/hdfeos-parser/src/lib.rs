//! HDF-EOS StructMetadata parser.
//!
//! HDF-EOS files carry their grid geometry in a string attribute
//! (`StructMetadata.0`) written in a line-oriented, ODL-like grammar of
//! `KEY=VALUE` assignments nested inside `GROUP`/`OBJECT` blocks. This crate
//! turns that text into an ordered tree and exposes a typed
//! [`GridDescriptor`] for one named grid.
//!
//! # Example
//!
//! ```
//! use hdfeos_parser::{extract_grid, parse, DEFAULT_GRID};
//!
//! let text = "GROUP=GridStructure
//! GROUP=GRID_1
//! XDim=2
//! YDim=2
//! UpperLeftPointMtrs=(-1000.0,1000.0)
//! LowerRightMtrs=(1000.0,-1000.0)
//! Projection=GCTP_SNSOID
//! ProjParams=(6371007.181,0,0)
//! END_GROUP=GRID_1
//! END_GROUP=GridStructure
//! END";
//!
//! let root = parse(text).unwrap();
//! let grid = extract_grid(&root, DEFAULT_GRID).unwrap();
//! assert_eq!(grid.x_dim, 2);
//! ```

pub mod error;
pub mod grid;
pub mod literal;
pub mod metadata;

pub use error::{MetadataError, MetadataResult};
pub use grid::{
    extract_grid, extract_grid_occurrence, grid_names, GridDescriptor, DEFAULT_GRID,
    GRID_STRUCTURE, MAX_GRID_CELLS,
};
pub use literal::{parse_literal, Scalar};
pub use metadata::{parse, parse_with, Group, LiteralPolicy, MetadataNode, ParseOptions};
