//! Error types for grid processing.

use hdfeos_parser::MetadataError;
use projection::ProjectionError;
use thiserror::Error;

/// Errors that can occur while building or reprojecting coordinate grids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridProcessorError {
    /// Metadata could not be parsed or the grid could not be extracted.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The projection could not be resolved or parameterized.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// The grid descriptor cannot produce a coordinate field.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Coordinate fields passed together have different shapes.
    #[error("coordinate fields differ in shape: x is {x:?}, y is {y:?}")]
    ShapeMismatch { x: (usize, usize), y: (usize, usize) },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridProcessorError {
    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a ConfigError.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
