//! Native (projected) coordinate grids.
//!
//! HDF-EOS grids are described only by their corner points and dimensions.
//! The per-axis step is the signed corner difference divided by the
//! dimension, and samples start at the lower-right corner:
//!
//! - `x[col] = lower_right.x + col * x_res`
//! - `y[row] = lower_right.y + (y_dim - 1 - row) * y_res`
//!
//! The y axis is reversed so row 0 is the northernmost row. The sign of each
//! step is kept as computed; corners are never reordered.

use hdfeos_parser::{GridDescriptor, MAX_GRID_CELLS};
use tracing::debug;

use crate::error::{GridProcessorError, Result};
use crate::types::{CoordinateField, NativeGrid};

/// Signed resolution of one axis.
fn axis_resolution(upper_left: f64, lower_right: f64, dim: usize) -> f64 {
    (upper_left - lower_right) / dim as f64
}

/// Build the native x/y coordinate of every cell of a grid.
///
/// Both fields have shape `(y_dim, x_dim)`.
pub fn build_native_grid(descriptor: &GridDescriptor) -> Result<NativeGrid> {
    let (x_dim, y_dim) = (descriptor.x_dim, descriptor.y_dim);
    if x_dim == 0 || y_dim == 0 {
        return Err(GridProcessorError::invalid_grid(format!(
            "grid dimensions must be positive, got {}x{}",
            x_dim, y_dim
        )));
    }
    match x_dim.checked_mul(y_dim) {
        Some(cells) if cells <= MAX_GRID_CELLS => {}
        _ => {
            return Err(GridProcessorError::invalid_grid(format!(
                "grid of {}x{} cells exceeds the limit of {} cells",
                y_dim, x_dim, MAX_GRID_CELLS
            )))
        }
    }

    let (ul_x, ul_y) = descriptor.upper_left;
    let (lr_x, lr_y) = descriptor.lower_right;
    if ul_x == lr_x || ul_y == lr_y {
        return Err(GridProcessorError::invalid_grid(format!(
            "grid has zero extent: upper left ({}, {}), lower right ({}, {})",
            ul_x, ul_y, lr_x, lr_y
        )));
    }

    let x_resolution = axis_resolution(ul_x, lr_x, x_dim);
    let y_resolution = axis_resolution(ul_y, lr_y, y_dim);

    let xs: Vec<f64> = (0..x_dim)
        .map(|col| lr_x + col as f64 * x_resolution)
        .collect();
    let ys: Vec<f64> = (0..y_dim)
        .rev()
        .map(|i| lr_y + i as f64 * y_resolution)
        .collect();

    let x = CoordinateField::from_fn(x_dim, y_dim, |_, col| xs[col]);
    let y = CoordinateField::from_fn(x_dim, y_dim, |row, _| ys[row]);

    debug!(
        grid = descriptor.grid_name.as_deref().unwrap_or("<unnamed>"),
        x_dim,
        y_dim,
        x_resolution,
        y_resolution,
        "Built native grid"
    );

    Ok(NativeGrid {
        x,
        y,
        x_resolution,
        y_resolution,
    })
}
