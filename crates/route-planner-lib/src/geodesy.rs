//! Coordinate type and geodesic distance
//!
//! Degrees of latitude and longitude do not map to a uniform physical length,
//! so every distance in the planner goes through the ellipsoidal (WGS84)
//! geodesic from the `geo` crate rather than a planar formula.

use crate::{Field, PlannerError, Result};
use geo::{Distance, Geodesic, Point};

/// Maximum absolute latitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;

/// Maximum absolute longitude in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in decimal degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse free-text latitude and longitude, e.g. from two input fields
    ///
    /// Surrounding whitespace is ignored; both values must be finite decimals.
    pub fn parse(lat: &str, lon: &str) -> Result<Self> {
        Ok(Self::new(
            parse_component(lat, Field::Latitude)?,
            parse_component(lon, Field::Longitude)?,
        ))
    }

    /// Both components are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Both components are within the usual WGS84 ranges
    ///
    /// The planner itself never rejects out-of-range coordinates; this is for
    /// callers that want to warn about them.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.is_finite() && self.lat.abs() <= MAX_LATITUDE && self.lon.abs() <= MAX_LONGITUDE
    }

    /// Linear interpolation in coordinate space, `t = 0` is `self`, `t = 1` is `other`
    #[inline]
    pub fn lerp(&self, other: &Coordinate, t: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

impl From<Coordinate> for Point<f64> {
    #[inline]
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.lon, coordinate.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    #[inline]
    fn from(point: Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

fn parse_component(text: &str, field: Field) -> Result<f64> {
    let invalid = || PlannerError::InvalidInput {
        field,
        value: text.to_string(),
    };
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Geodesic distance between two coordinates in meters
#[inline]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(Point::from(a), Point::from(b))
}
