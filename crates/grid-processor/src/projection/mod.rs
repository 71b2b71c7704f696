//! Projection utilities for grid processing.
//!
//! This module converts native projected grids into geographic
//! longitude/latitude fields.

pub mod reproject;

pub use reproject::{reproject_grid, to_geographic, to_geographic_with};
