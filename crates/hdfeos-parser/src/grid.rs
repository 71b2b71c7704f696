//! Typed view over one grid declared in `GridStructure`.

use crate::error::{MetadataError, MetadataResult};
use crate::literal::Scalar;
use crate::metadata::{Group, MetadataNode};

/// Name of the top-level group holding grid declarations.
pub const GRID_STRUCTURE: &str = "GridStructure";

/// Grid selected when the caller does not name one.
pub const DEFAULT_GRID: &str = "GRID_1";

pub const FIELD_UPPER_LEFT: &str = "UpperLeftPointMtrs";
pub const FIELD_LOWER_RIGHT: &str = "LowerRightMtrs";
pub const FIELD_X_DIM: &str = "XDim";
pub const FIELD_Y_DIM: &str = "YDim";
pub const FIELD_PROJECTION: &str = "Projection";
pub const FIELD_PROJ_PARAMS: &str = "ProjParams";
pub const FIELD_GRID_NAME: &str = "GridName";

/// Largest `XDim * YDim` accepted. 8192 x 8192 cells, well above the
/// 4800 x 4800 of a 250 m MODIS tile.
pub const MAX_GRID_CELLS: usize = 8192 * 8192;

/// Geometry and projection of a single grid.
///
/// Corners are kept exactly as declared; nothing here assumes `upper_left`
/// lies north-west of `lower_right`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    /// Optional `GridName` leaf (e.g. `"grid1km"`).
    pub grid_name: Option<String>,
    /// Upper-left corner `(x, y)` in projected meters.
    pub upper_left: (f64, f64),
    /// Lower-right corner `(x, y)` in projected meters.
    pub lower_right: (f64, f64),
    /// Number of columns, always > 0.
    pub x_dim: usize,
    /// Number of rows, always > 0.
    pub y_dim: usize,
    /// Projection code as written in the metadata (e.g. `GCTP_SNSOID`).
    pub projection_name: String,
    /// Projection parameters; slot 0 is the sphere radius for sinusoidal grids.
    pub projection_params: Vec<f64>,
}

impl GridDescriptor {
    /// Build a descriptor from the children of a grid block.
    ///
    /// `grid` is only used for error context.
    pub fn from_group(grid: &str, node: &Group) -> MetadataResult<Self> {
        let upper_left = corner(grid, node, FIELD_UPPER_LEFT)?;
        let lower_right = corner(grid, node, FIELD_LOWER_RIGHT)?;
        let x_dim = dimension(grid, node, FIELD_X_DIM)?;
        let y_dim = dimension(grid, node, FIELD_Y_DIM)?;
        check_cell_count(x_dim, y_dim)?;

        let projection_name = required(grid, node, FIELD_PROJECTION)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                MetadataError::invalid_field(FIELD_PROJECTION, "expected a projection code")
            })?;

        let projection_params = required(grid, node, FIELD_PROJ_PARAMS)?
            .as_f64_tuple()
            .ok_or_else(|| {
                MetadataError::invalid_field(FIELD_PROJ_PARAMS, "expected a tuple of numbers")
            })?;

        let grid_name = node
            .scalar(FIELD_GRID_NAME)
            .and_then(Scalar::as_str)
            .map(str::to_string);

        Ok(Self {
            grid_name,
            upper_left,
            lower_right,
            x_dim,
            y_dim,
            projection_name,
            projection_params,
        })
    }

    /// Number of cells in the grid, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        self.x_dim.saturating_mul(self.y_dim)
    }
}

/// Names of every grid declared under `GridStructure`, in document order.
pub fn grid_names(root: &Group) -> Vec<String> {
    root.group(GRID_STRUCTURE)
        .map(|structure| {
            structure
                .iter()
                .filter(|(_, node)| matches!(node, MetadataNode::Group(_)))
                .map(|(name, _)| name.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Extract the first grid called `grid` from `GridStructure`.
pub fn extract_grid(root: &Group, grid: &str) -> MetadataResult<GridDescriptor> {
    extract_grid_occurrence(root, grid, 0)
}

/// Extract the `occurrence`-th (0-based) grid called `grid`.
///
/// Sibling grids may share a name; each one is addressable on its own.
pub fn extract_grid_occurrence(
    root: &Group,
    grid: &str,
    occurrence: usize,
) -> MetadataResult<GridDescriptor> {
    let node = root
        .group(GRID_STRUCTURE)
        .and_then(|structure| {
            structure
                .get_all(grid)
                .filter_map(MetadataNode::as_group)
                .nth(occurrence)
        })
        .ok_or_else(|| MetadataError::MissingGrid {
            grid: grid.to_string(),
            available: grid_names(root),
        })?;

    GridDescriptor::from_group(grid, node)
}

fn required<'a>(grid: &str, node: &'a Group, field: &str) -> MetadataResult<&'a Scalar> {
    node.scalar(field).ok_or_else(|| MetadataError::MissingField {
        grid: grid.to_string(),
        field: field.to_string(),
    })
}

fn corner(grid: &str, node: &Group, field: &str) -> MetadataResult<(f64, f64)> {
    let values = required(grid, node, field)?
        .as_f64_tuple()
        .ok_or_else(|| MetadataError::invalid_field(field, "expected a tuple of numbers"))?;

    match values.as_slice() {
        [x, y] if x.is_finite() && y.is_finite() => Ok((*x, *y)),
        [_, _] => Err(MetadataError::invalid_field(field, "corner is not finite")),
        other => Err(MetadataError::invalid_field(
            field,
            format!("expected 2 coordinates, found {}", other.len()),
        )),
    }
}

fn dimension(grid: &str, node: &Group, field: &str) -> MetadataResult<usize> {
    let value = required(grid, node, field)?
        .as_i64()
        .ok_or_else(|| MetadataError::invalid_field(field, "expected an integer"))?;

    if value <= 0 {
        return Err(MetadataError::invalid_field(
            field,
            format!("dimension must be positive, found {}", value),
        ));
    }
    usize::try_from(value).map_err(|e| MetadataError::invalid_field(field, e.to_string()))
}

fn check_cell_count(x_dim: usize, y_dim: usize) -> MetadataResult<()> {
    match x_dim.checked_mul(y_dim) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
        _ => Err(MetadataError::invalid_field(
            FIELD_X_DIM,
            format!(
                "grid of {}x{} cells exceeds the limit of {} cells",
                y_dim, x_dim, MAX_GRID_CELLS
            ),
        )),
    }
}
