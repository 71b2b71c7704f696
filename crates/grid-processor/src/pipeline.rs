//! End-to-end coordinate pipeline.
//!
//! parse -> extract grid -> build native grid -> reproject
//!
//! Each input is processed independently; a batch shares no mutable state
//! between inputs and returns results in input order.

use hdfeos_parser::{extract_grid_occurrence, parse_with, GridDescriptor};
use projection::ProjectionDefinition;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::config::GridProcessorConfig;
use crate::error::{GridProcessorError, Result};
use crate::native::build_native_grid;
use crate::projection::reproject_grid;
use crate::types::{GeographicGrid, NativeGrid};

/// Every intermediate product of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub descriptor: GridDescriptor,
    pub native: NativeGrid,
    pub geographic: GeographicGrid,
}

/// Result of one input of a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Caller-supplied label, usually the file name.
    pub name: String,
    pub result: Result<PipelineOutput>,
}

/// Turns StructMetadata text into geographic coordinate fields.
#[derive(Debug, Clone, Default)]
pub struct CoordinatePipeline {
    config: GridProcessorConfig,
}

impl CoordinatePipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: GridProcessorConfig) -> Result<Self> {
        config.validate().map_err(GridProcessorError::config_error)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridProcessorConfig {
        &self.config
    }

    /// Compute the longitude/latitude of every cell of the configured grid.
    pub fn run(&self, metadata: &str) -> Result<GeographicGrid> {
        self.run_detailed(metadata).map(|output| output.geographic)
    }

    /// Like [`run`](Self::run), but also returns the descriptor and native grid.
    #[instrument(skip_all, fields(grid = %self.config.grid_name))]
    pub fn run_detailed(&self, metadata: &str) -> Result<PipelineOutput> {
        let root = parse_with(metadata, &self.config.parse_options())?;
        let descriptor =
            extract_grid_occurrence(&root, &self.config.grid_name, self.config.grid_occurrence)?;
        debug!(
            x_dim = descriptor.x_dim,
            y_dim = descriptor.y_dim,
            projection = %descriptor.projection_name,
            "Extracted grid descriptor"
        );

        let definition = ProjectionDefinition::from_metadata(
            &descriptor.projection_name,
            &descriptor.projection_params,
        )?;
        let native = build_native_grid(&descriptor)?;
        let geographic = reproject_grid(&native, &definition, self.config.parallel)?;

        Ok(PipelineOutput {
            descriptor,
            native,
            geographic,
        })
    }

    /// Run every `(name, metadata)` input, in parallel when configured.
    ///
    /// A failing input does not affect the others. Outcomes are returned in
    /// the same order as `inputs`.
    pub fn run_batch(&self, inputs: &[(String, String)]) -> Vec<BatchOutcome> {
        let run_one = |(name, metadata): &(String, String)| {
            let result = self.run_detailed(metadata);
            if let Err(e) = &result {
                warn!(file = %name, error = %e, "Failed to compute coordinates");
            }
            BatchOutcome {
                name: name.clone(),
                result,
            }
        };

        let outcomes: Vec<BatchOutcome> = if self.config.parallel {
            inputs.par_iter().map(run_one).collect()
        } else {
            inputs.iter().map(run_one).collect()
        };

        let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
        info!(
            total = outcomes.len(),
            succeeded,
            failed = outcomes.len() - succeeded,
            "Batch complete"
        );
        outcomes
    }
}
