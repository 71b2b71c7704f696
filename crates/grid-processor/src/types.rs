//! Core types for grid processing.

use serde::{Deserialize, Serialize};

use crate::error::{GridProcessorError, Result};

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Get the width in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// A 2-D array of coordinates stored row-major, shape `(height, width)`.
///
/// Row 0 is the first row of the grid as it is stored (northernmost for
/// fields produced by [`build_native_grid`](crate::build_native_grid)).
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl CoordinateField {
    /// Wrap row-major values. `values.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridProcessorError::invalid_grid(format!(
                "coordinate field must be non-empty, got {}x{}",
                height, width
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            GridProcessorError::invalid_grid(format!(
                "coordinate field of {}x{} cells is too large",
                height, width
            ))
        })?;
        if values.len() != expected {
            return Err(GridProcessorError::invalid_grid(format!(
                "expected {} values for a {}x{} field, got {}",
                expected,
                height,
                width,
                values.len()
            )));
        }

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub(crate) fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                values.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.height && col < self.width {
            Some(self.values[row * self.width + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.height {
            let start = row * self.width;
            Some(&self.values[start..start + self.width])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Smallest non-NaN value.
    pub fn min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Largest non-NaN value.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Number of non-NaN values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Native projected coordinates of every grid cell, in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeGrid {
    pub x: CoordinateField,
    pub y: CoordinateField,
    /// Signed column step, `(upper_left.x - lower_right.x) / x_dim`.
    pub x_resolution: f64,
    /// Signed row step, `(upper_left.y - lower_right.y) / y_dim`.
    pub y_resolution: f64,
}

impl NativeGrid {
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }
}

/// Geographic coordinates of every grid cell, in degrees.
///
/// Cells outside the projection domain hold NaN in both fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicGrid {
    pub lon: CoordinateField,
    pub lat: CoordinateField,
}

impl GeographicGrid {
    pub fn shape(&self) -> (usize, usize) {
        self.lon.shape()
    }

    /// Number of cells that reprojected inside the projection domain.
    pub fn valid_count(&self) -> usize {
        self.lon
            .values()
            .iter()
            .zip(self.lat.values())
            .filter(|(lon, lat)| !lon.is_nan() && !lat.is_nan())
            .count()
    }

    /// Longitude/latitude range of the valid cells, or `None` if every cell
    /// fell outside the projection domain.
    pub fn extent(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            self.lon.min()?,
            self.lat.min()?,
            self.lon.max()?,
            self.lat.max()?,
        ))
    }
}
