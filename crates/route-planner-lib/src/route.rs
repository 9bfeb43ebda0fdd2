//! Route interpolation module
//!
//! This module turns the ordered waypoint list into the dense route drawn on
//! the map: for every consecutive pair of waypoints, dots are placed along the
//! straight line between them (in coordinate space) roughly every
//! [`DEFAULT_SPACING_METERS`], where the count comes from the geodesic distance.

use crate::geodesy::{self, Coordinate};
use crate::planner::Waypoint;
use crate::{PlannerError, Result};

/// Target distance between interpolated dots, in meters
pub const DEFAULT_SPACING_METERS: f64 = 5.0;

/// Smallest accepted dot spacing, in meters
pub const MIN_SPACING_METERS: f64 = 0.01;

/// Upper bound on the dots of a single segment
///
/// Two antipodal waypoints at the default spacing stay well below it.
pub const MAX_SEGMENT_DOTS: usize = 10_000_000;

/// Parameters for route interpolation
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Target dot spacing in meters (finite, at least [`MIN_SPACING_METERS`])
    pub spacing_meters: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            spacing_meters: DEFAULT_SPACING_METERS,
        }
    }
}

impl RouteConfig {
    /// Create a validated configuration
    pub fn new(spacing_meters: f64) -> Result<Self> {
        let config = Self { spacing_meters };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.spacing_meters.is_finite() && self.spacing_meters >= MIN_SPACING_METERS {
            Ok(())
        } else {
            Err(PlannerError::InvalidSpacing(self.spacing_meters))
        }
    }
}

/// The dots between two consecutive waypoints
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    pub start: Coordinate,
    pub end: Coordinate,
    /// Geodesic length of the segment in meters
    pub distance_meters: f64,
    /// Interpolated dots, strictly between `start` and `end`, in travel order
    pub dots: Vec<Coordinate>,
}

impl RouteSegment {
    fn interpolate(start: Coordinate, end: Coordinate, spacing_meters: f64) -> Self {
        let distance_meters = geodesy::distance(start, end);
        let steps = step_count(distance_meters, spacing_meters);

        // Dividing by steps + 1 keeps the last dot short of `end`, which
        // already has its own waypoint marker. `step_count` caps `steps`, so
        // this cannot overflow.
        let divisions = (steps + 1) as f64;
        let dots = (1..=steps)
            .map(|k| start.lerp(&end, k as f64 / divisions))
            .collect();

        Self {
            start,
            end,
            distance_meters,
            dots,
        }
    }
}

/// Number of dots for a segment: `floor(distance / spacing)`
///
/// Segments shorter than one spacing get no dots. NaN distances (from
/// non-finite input) also yield zero. Counts above [`MAX_SEGMENT_DOTS`] are
/// clamped to it.
#[inline]
fn step_count(distance_meters: f64, spacing_meters: f64) -> usize {
    let steps = (distance_meters / spacing_meters).floor();
    if !(steps.is_finite() && steps > 0.0) {
        return 0;
    }
    if steps >= MAX_SEGMENT_DOTS as f64 {
        tracing::warn!(
            "Segment of {distance_meters:.0} m at {spacing_meters} m spacing capped to {MAX_SEGMENT_DOTS} dots"
        );
        return MAX_SEGMENT_DOTS;
    }
    steps as usize
}

/// An interpolated route derived from a waypoint sequence
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// First waypoint, kept so that `path()` also works for a single waypoint
    origin: Option<Coordinate>,
    segments: Vec<RouteSegment>,
    /// Cached total number of dots (computed once during construction)
    cached_total_dots: usize,
    /// Cached total distance in meters (computed once during construction)
    cached_total_distance: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Build the route through `coordinates`, in order
    ///
    /// Fewer than two coordinates produce a route without segments.
    pub fn build<I>(coordinates: I, config: &RouteConfig) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let coordinates: Vec<Coordinate> = coordinates.into_iter().collect();
        let origin = coordinates.first().copied();

        if config.validate().is_err() {
            tracing::warn!(
                "Refusing to interpolate with spacing {} m",
                config.spacing_meters
            );
            return Route {
                origin,
                ..Default::default()
            };
        }

        let segments: Vec<RouteSegment> = coordinates
            .windows(2)
            .map(|pair| RouteSegment::interpolate(pair[0], pair[1], config.spacing_meters))
            .collect();

        let cached_total_dots = segments.iter().map(|s| s.dots.len()).sum();
        let cached_total_distance = segments.iter().map(|s| s.distance_meters).sum();

        tracing::trace!(
            "Built route: {} segments, {} dots, {:.1} m",
            segments.len(),
            cached_total_dots,
            cached_total_distance
        );

        Route {
            origin,
            segments,
            cached_total_dots,
            cached_total_distance,
        }
    }

    /// Build the route through a waypoint list
    pub fn from_waypoints(waypoints: &[Waypoint], config: &RouteConfig) -> Self {
        Self::build(waypoints.iter().map(|w| w.coordinate), config)
    }

    #[inline]
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// All interpolated dots in travel order
    pub fn dots(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.segments.iter().flat_map(|s| s.dots.iter().copied())
    }

    /// The full path: first waypoint, then each segment's dots followed by its end waypoint
    pub fn path(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.origin.into_iter().chain(
            self.segments
                .iter()
                .flat_map(|s| s.dots.iter().copied().chain(std::iter::once(s.end))),
        )
    }

    /// Total number of interpolated dots
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn total_dots(&self) -> usize {
        self.cached_total_dots
    }

    /// Total geodesic length through all waypoints, in meters
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn total_distance(&self) -> f64 {
        self.cached_total_distance
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Interpolate dots between consecutive waypoints at the default 5 m spacing
pub fn interpolate(waypoints: &[Waypoint]) -> Vec<Coordinate> {
    Route::from_waypoints(waypoints, &RouteConfig::default())
        .dots()
        .collect()
}

/// Interpolate dots between consecutive coordinates at a custom spacing
///
/// Returns nothing for a spacing below [`MIN_SPACING_METERS`] or non-finite.
pub fn interpolate_with_spacing(coordinates: &[Coordinate], spacing_meters: f64) -> Vec<Coordinate> {
    let config = RouteConfig { spacing_meters };
    Route::build(coordinates.iter().copied(), &config)
        .dots()
        .collect()
}
