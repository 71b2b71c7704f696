//! Coordinate reference system transformations for HDF-EOS grids.
//!
//! Sinusoidal grids are inverted with closed-form spherical math; other
//! projection codes are handed to proj4rs.

pub mod definition;
pub mod error;
pub mod proj4;
pub mod sinusoidal;

pub use definition::{ProjectionDefinition, ProjectionFamily};
pub use error::{ProjectionError, ProjectionResult};
pub use proj4::Proj4Projection;
pub use sinusoidal::Sinusoidal;
