//! Error types for StructMetadata parsing and grid extraction.

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while parsing StructMetadata text or reading a grid from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// Structural problem in the metadata text (mismatched or unterminated block,
    /// or a value rejected by the literal grammar). `line` is 1-based.
    #[error("malformed metadata at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// The requested grid is not declared under `GridStructure`.
    #[error("grid '{grid}' not found in GridStructure (available: {available:?})")]
    MissingGrid { grid: String, available: Vec<String> },

    /// A required leaf is absent from the selected grid.
    #[error("grid '{grid}' is missing required field '{field}'")]
    MissingField { grid: String, field: String },

    /// A required leaf is present but has the wrong shape or an invalid value.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl MetadataError {
    /// Create a Malformed error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// Create an InvalidField error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
