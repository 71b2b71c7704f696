//! Spherical sinusoidal projection.
//!
//! This is the equal-area projection used by the MODIS land and MAIAC
//! tiled products. On a sphere of radius R:
//!
//! - x = R * (lon - lon0) * cos(lat)
//! - y = R * lat
//!
//! The inverse is undefined for |y| > R * pi/2 and for points whose
//! longitude would fall more than 180 degrees from the central meridian;
//! such points yield `None`.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ProjectionError, ProjectionResult};

const EPS10: f64 = 1e-10;

/// Sinusoidal projection on a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Sinusoidal {
    /// Sphere radius (meters)
    pub radius: f64,
    /// Central meridian (radians)
    pub lon0: f64,
    /// False easting (meters)
    pub false_easting: f64,
    /// False northing (meters)
    pub false_northing: f64,
}

impl Sinusoidal {
    /// Create a sinusoidal projection centered on the Greenwich meridian with
    /// no false origin.
    pub fn new(radius: f64) -> ProjectionResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ProjectionError::InvalidParameters(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }

        Ok(Self {
            radius,
            lon0: 0.0,
            false_easting: 0.0,
            false_northing: 0.0,
        })
    }

    /// MODIS sinusoidal grid (R = 6371007.181 m).
    pub fn modis() -> Self {
        Self {
            radius: 6371007.181,
            lon0: 0.0,
            false_easting: 0.0,
            false_northing: 0.0,
        }
    }

    /// PROJ-style definition string, e.g. for logging.
    pub fn proj_string(&self) -> String {
        format!(
            "+proj=sinu +lon_0={} +x_0={} +y_0={} +a={} +b={} +units=m +no_defs",
            self.lon0.to_degrees(),
            self.false_easting,
            self.false_northing,
            self.radius,
            self.radius
        )
    }

    /// Convert projected coordinates (meters) to geographic `(lon, lat)` in degrees.
    ///
    /// Returns `None` outside the projection domain.
    pub fn to_geographic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let x = x - self.false_easting;
        let y = y - self.false_northing;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let lat = y / self.radius;
        let abs_lat = lat.abs();
        if abs_lat > FRAC_PI_2 + EPS10 {
            return None;
        }

        // Within EPS10 of a pole every longitude collapses onto the same point.
        let (lat, dlon) = if abs_lat < FRAC_PI_2 {
            (lat, x / (self.radius * lat.cos()))
        } else {
            (FRAC_PI_2.copysign(lat), 0.0)
        };

        if !dlon.is_finite() || dlon.abs() > PI + EPS10 {
            return None;
        }

        let lon = normalize_lon(self.lon0 + dlon);
        Some((lon.to_degrees(), lat.to_degrees()))
    }

    /// Convert geographic coordinates (degrees) to projected `(x, y)` in meters.
    ///
    /// Returns `None` for latitudes beyond the poles or non-finite input.
    pub fn from_geographic(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
            return None;
        }

        let lat = lat.to_radians();
        let dlon = normalize_lon(lon.to_radians() - self.lon0);

        let x = self.radius * dlon * lat.cos() + self.false_easting;
        let y = self.radius * lat + self.false_northing;
        Some((x, y))
    }
}

/// Wrap a longitude in radians into [-pi, pi].
fn normalize_lon(mut lon: f64) -> f64 {
    while lon > PI + EPS10 {
        lon -= 2.0 * PI;
    }
    while lon < -PI - EPS10 {
        lon += 2.0 * PI;
    }
    lon
}
