//! Projection definitions built from grid metadata.
//!
//! HDF-EOS stores the projection as a GCTP code (`GCTP_SNSOID`, ...) plus a
//! parameter tuple. Any code containing `soid` (case-insensitive) selects the
//! sinusoidal family; every other code is lower-cased and treated as a PROJ
//! identifier. Slot 0 of the parameters holds the sphere radius.

use tracing::debug;

use crate::error::{ProjectionError, ProjectionResult};
use crate::proj4::{geographic_string, Proj4Projection};
use crate::sinusoidal::Sinusoidal;

/// Projection family selected from a metadata projection code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionFamily {
    Sinusoidal,
    /// Lower-cased code passed through as a PROJ identifier.
    Proj4(String),
}

impl ProjectionFamily {
    /// Map a projection code to a family.
    ///
    /// Only the sinusoidal match is made here; whether a pass-through
    /// identifier is actually supported is decided when the definition is built.
    pub fn resolve(name: &str) -> ProjectionResult<Self> {
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(ProjectionError::Unsupported {
                name: name.to_string(),
            });
        }

        if lowered.contains("soid") {
            Ok(Self::Sinusoidal)
        } else {
            Ok(Self::Proj4(lowered))
        }
    }

    /// PROJ identifier for this family.
    pub fn proj_name(&self) -> &str {
        match self {
            Self::Sinusoidal => "sinu",
            Self::Proj4(identifier) => identifier,
        }
    }
}

/// A fully parameterized projected coordinate system and its inverse.
#[derive(Debug)]
pub enum ProjectionDefinition {
    Sinusoidal(Sinusoidal),
    Proj4(Proj4Projection),
}

impl ProjectionDefinition {
    /// Build a definition from the grid's `Projection` code and `ProjParams`.
    pub fn from_metadata(name: &str, params: &[f64]) -> ProjectionResult<Self> {
        let family = ProjectionFamily::resolve(name)?;
        let radius = *params.first().ok_or_else(|| {
            ProjectionError::InvalidParameters("ProjParams is empty; sphere radius missing".into())
        })?;

        let definition = match family {
            ProjectionFamily::Sinusoidal => Self::Sinusoidal(Sinusoidal::new(radius)?),
            ProjectionFamily::Proj4(identifier) => {
                Self::Proj4(Proj4Projection::new(name, &identifier, radius)?)
            }
        };

        debug!(
            projection = name,
            proj = %definition.proj_string(),
            "Resolved projection definition"
        );
        Ok(definition)
    }

    pub fn family(&self) -> ProjectionFamily {
        match self {
            Self::Sinusoidal(_) => ProjectionFamily::Sinusoidal,
            Self::Proj4(p) => ProjectionFamily::Proj4(p.identifier().to_string()),
        }
    }

    /// Sphere radius (meters).
    pub fn radius(&self) -> f64 {
        match self {
            Self::Sinusoidal(p) => p.radius,
            Self::Proj4(p) => p.radius(),
        }
    }

    /// PROJ string of the projected system.
    pub fn proj_string(&self) -> String {
        match self {
            Self::Sinusoidal(p) => p.proj_string(),
            Self::Proj4(p) => p.proj_string(),
        }
    }

    /// PROJ string of the matching geographic system.
    pub fn geographic_proj_string(&self) -> String {
        geographic_string(self.radius())
    }

    /// Convert projected coordinates (meters) to `(lon, lat)` in degrees.
    ///
    /// Returns `None` for points outside the projection's valid domain.
    #[inline]
    pub fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self {
            Self::Sinusoidal(p) => p.to_geographic(x, y),
            Self::Proj4(p) => p.to_geographic(x, y),
        }
    }
}
