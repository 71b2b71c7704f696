//! Error types for projection resolution.

use thiserror::Error;

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors raised while building a projection definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The projection code does not map to a supported family.
    #[error("unsupported projection '{name}'")]
    Unsupported { name: String },

    /// The projection parameters cannot define a valid projection.
    #[error("invalid projection parameters: {0}")]
    InvalidParameters(String),
}
