//! Configuration for the grid processor.

use hdfeos_parser::{LiteralPolicy, ParseOptions, DEFAULT_GRID};
use serde::{Deserialize, Serialize};

/// Configuration for the grid processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridProcessorConfig {
    /// Grid block to extract from `GridStructure`.
    pub grid_name: String,

    /// Which of several same-named sibling grids to use (0-based).
    pub grid_occurrence: usize,

    /// What to do with metadata values that are not valid literals.
    pub literal_policy: LiteralPolicy,

    /// Reproject rows on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GridProcessorConfig {
    fn default() -> Self {
        Self {
            grid_name: DEFAULT_GRID.to_string(),
            grid_occurrence: 0,
            literal_policy: LiteralPolicy::Reject,
            parallel: true,
        }
    }
}

impl GridProcessorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields with any `HDFEOS_*` environment variables that are set.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("HDFEOS_GRID_NAME") {
            if !val.trim().is_empty() {
                self.grid_name = val.trim().to_string();
            }
        }

        if let Ok(val) = std::env::var("HDFEOS_GRID_OCCURRENCE") {
            if let Ok(n) = val.parse() {
                self.grid_occurrence = n;
            }
        }

        if let Ok(val) = std::env::var("HDFEOS_LITERAL_POLICY") {
            if let Some(policy) = LiteralPolicy::from_name(&val) {
                self.literal_policy = policy;
            }
        }

        if let Ok(val) = std::env::var("HDFEOS_PARALLEL") {
            self.parallel = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_name.trim().is_empty() {
            return Err("grid_name must not be empty".to_string());
        }

        if self.grid_name.contains('=') || self.grid_name.contains('\n') {
            return Err(format!("grid_name '{}' is not a valid block name", self.grid_name));
        }

        Ok(())
    }

    /// Parser options derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            literal_policy: self.literal_policy,
        }
    }
}
