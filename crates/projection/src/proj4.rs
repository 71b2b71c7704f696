//! Projection families evaluated through `proj4rs`.
//!
//! Grids whose projection code is not sinusoidal are passed to proj4rs using
//! the lower-cased code as the `+proj=` identifier, on a sphere whose radius
//! comes from the grid's projection parameters.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::{ProjectionError, ProjectionResult};

/// Geographic identifiers; grid corners are in meters, so these never apply.
const GEOGRAPHIC_IDENTIFIERS: [&str; 4] = ["longlat", "latlong", "lonlat", "latlon"];

/// A pass-through identifier must be a single PROJ token, so metadata cannot
/// smuggle extra `+key=value` parameters into the definition.
fn is_projection_token(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !GEOGRAPHIC_IDENTIFIERS.contains(&identifier)
}

/// A projected-to-geographic transform backed by proj4rs.
pub struct Proj4Projection {
    identifier: String,
    radius: f64,
    source: Proj,
    target: Proj,
}

impl std::fmt::Debug for Proj4Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proj4Projection")
            .field("identifier", &self.identifier)
            .field("radius", &self.radius)
            .finish_non_exhaustive()
    }
}

impl Proj4Projection {
    /// Build the projected and geographic systems for `identifier`.
    ///
    /// `name` is the projection code as written in the metadata and is only
    /// used for error reporting.
    pub fn new(name: &str, identifier: &str, radius: f64) -> ProjectionResult<Self> {
        if !is_projection_token(identifier) {
            return Err(ProjectionError::Unsupported {
                name: name.to_string(),
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ProjectionError::InvalidParameters(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }

        let source = Proj::from_proj_string(&projected_string(identifier, radius)).map_err(|e| {
            tracing::debug!(identifier, error = ?e, "proj4rs rejected projection");
            ProjectionError::Unsupported {
                name: name.to_string(),
            }
        })?;
        let target = Proj::from_proj_string(&geographic_string(radius))
            .map_err(|e| ProjectionError::InvalidParameters(format!("{e:?}")))?;

        Ok(Self {
            identifier: identifier.to_string(),
            radius,
            source,
            target,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn proj_string(&self) -> String {
        projected_string(&self.identifier, self.radius)
    }

    /// Convert projected coordinates (meters) to geographic `(lon, lat)` in degrees.
    ///
    /// Returns `None` when proj4rs reports the point as outside the domain.
    pub fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let mut point = (x, y, 0.0);
        transform(&self.source, &self.target, &mut point).ok()?;

        let (lon, lat) = (point.0.to_degrees(), point.1.to_degrees());
        if lon.is_finite() && lat.is_finite() {
            Some((lon, lat))
        } else {
            None
        }
    }
}

fn projected_string(identifier: &str, radius: f64) -> String {
    format!(
        "+proj={} +lon_0=0 +x_0=0 +y_0=0 +a={} +b={} +units=m +no_defs",
        identifier, radius, radius
    )
}

/// Geographic system on the same sphere as the projected one.
pub fn geographic_string(radius: f64) -> String {
    format!("+proj=longlat +a={} +b={} +no_defs", radius, radius)
}
