//! Reprojection of native coordinate fields to geographic coordinates.
//!
//! Every cell is inverted independently, so rows are distributed across the
//! rayon thread pool. Parallel and sequential runs produce bit-identical
//! output.

use projection::ProjectionDefinition;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{GridProcessorError, Result};
use crate::types::{CoordinateField, GeographicGrid, NativeGrid};

/// Convert native `x`/`y` fields to longitude/latitude in degrees.
///
/// The projection is resolved from `projection_name` and `projection_params`
/// the same way it is declared in grid metadata. Cells outside the
/// projection's domain are NaN in both output fields.
///
/// # Example
/// ```
/// use grid_processor::{build_native_grid, to_geographic};
/// use hdfeos_parser::GridDescriptor;
///
/// let descriptor = GridDescriptor {
///     grid_name: None,
///     upper_left: (-1111950.519667, 5559752.598333),
///     lower_right: (0.0, 4447802.078667),
///     x_dim: 4,
///     y_dim: 4,
///     projection_name: "GCTP_SNSOID".to_string(),
///     projection_params: vec![6371007.181, 0.0],
/// };
/// let native = build_native_grid(&descriptor).unwrap();
/// let geo = to_geographic(&native.x, &native.y, "GCTP_SNSOID", &[6371007.181]).unwrap();
///
/// assert_eq!(geo.shape(), (4, 4));
/// let extent = geo.extent().unwrap();
/// assert!(extent.min_lat > 40.0 - 1e-6 && extent.max_lat < 50.0);
/// ```
pub fn to_geographic(
    x: &CoordinateField,
    y: &CoordinateField,
    projection_name: &str,
    projection_params: &[f64],
) -> Result<GeographicGrid> {
    let definition = ProjectionDefinition::from_metadata(projection_name, projection_params)?;
    to_geographic_with(x, y, &definition, true)
}

/// Convert native fields with an already resolved projection.
///
/// `parallel` selects row-parallel evaluation on the rayon pool.
pub fn to_geographic_with(
    x: &CoordinateField,
    y: &CoordinateField,
    definition: &ProjectionDefinition,
    parallel: bool,
) -> Result<GeographicGrid> {
    if x.shape() != y.shape() {
        return Err(GridProcessorError::ShapeMismatch {
            x: x.shape(),
            y: y.shape(),
        });
    }

    let (height, width) = x.shape();
    let mut lon = vec![f64::NAN; width * height];
    let mut lat = vec![f64::NAN; width * height];

    let fill_row = |(row, (lon_row, lat_row)): (usize, (&mut [f64], &mut [f64]))| {
        let start = row * width;
        let xs = &x.values()[start..start + width];
        let ys = &y.values()[start..start + width];

        for col in 0..width {
            if let Some((lo, la)) = definition.to_geographic(xs[col], ys[col]) {
                lon_row[col] = lo;
                lat_row[col] = la;
            }
        }
    };

    if parallel {
        lon.par_chunks_mut(width)
            .zip(lat.par_chunks_mut(width))
            .enumerate()
            .for_each(fill_row);
    } else {
        lon.chunks_mut(width)
            .zip(lat.chunks_mut(width))
            .enumerate()
            .for_each(fill_row);
    }

    let grid = GeographicGrid {
        lon: CoordinateField::new(width, height, lon)?,
        lat: CoordinateField::new(width, height, lat)?,
    };

    debug!(
        width,
        height,
        valid = grid.valid_count(),
        parallel,
        proj = %definition.proj_string(),
        "Reprojected grid to geographic coordinates"
    );

    Ok(grid)
}

/// Reproject both fields of a [`NativeGrid`].
pub fn reproject_grid(
    native: &NativeGrid,
    definition: &ProjectionDefinition,
    parallel: bool,
) -> Result<GeographicGrid> {
    to_geographic_with(&native.x, &native.y, definition, parallel)
}
