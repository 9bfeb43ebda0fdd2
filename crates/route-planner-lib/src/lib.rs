//! Route Planner Library - Core Logic for Manual Route Planning
//!
//! This library holds everything in the route planner that is not screen wiring:
//! the ordered waypoint list a user builds by dropping markers on a map, and the
//! dense route of interpolated dots derived from it.
//!
//! # Architecture
//!
//! - **[`Coordinate`]**: a latitude/longitude pair in decimal degrees
//! - **[`geodesy`]**: geodesic distance between two coordinates
//! - **[`Route`]**: dots interpolated roughly every 5 meters between consecutive waypoints
//! - **[`RoutePlanner`]**: waypoint list with a non-blocking add throttle and undo
//! - **[`PositionSource`]**: the GPS boundary (stubbed by [`NoGps`])
//! - **[`LoadingStatus`]** and **[`Ticker`]**: the once-per-second polling used by the screens
//!
//! The route is a pure function of the waypoint list and is rebuilt in full
//! every time the list changes.

pub mod geodesy;
mod gps;
mod loading;
mod planner;
mod route;
mod tick;

// Public API exports
pub use geodesy::{Coordinate, distance};
pub use gps::{FixedPosition, NoGps, PositionSource};
pub use loading::{FOUND_MESSAGE, LoadingStatus, WAITING_MESSAGE};
pub use planner::{DEFAULT_WAIT_THRESHOLD, RoutePlanner, Waypoint};
pub use route::{
    DEFAULT_SPACING_METERS, MAX_SEGMENT_DOTS, MIN_SPACING_METERS, Route, RouteConfig,
    RouteSegment, interpolate, interpolate_with_spacing,
};
pub use tick::Ticker;

use std::time::Duration;

/// Which manual-entry field failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Latitude => f.write_str("latitude"),
            Field::Longitude => f.write_str("longitude"),
        }
    }
}

/// Error types for the planner
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    #[error("Invalid {field}: {value:?} is not a finite decimal number")]
    InvalidInput { field: Field, value: String },

    #[error("No waypoints to undo")]
    EmptyList,

    #[error("Waypoint throttled, retry in {retry_in:?}")]
    Throttled { retry_in: Duration },

    #[error("Invalid route spacing: {0} meters")]
    InvalidSpacing(f64),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _: fn() -> RoutePlanner = RoutePlanner::default;
        let _: fn() -> RouteConfig = RouteConfig::default;
        let _: fn(Coordinate, Coordinate) -> f64 = distance;
    }

    #[test]
    fn test_error_messages() {
        let err = PlannerError::InvalidInput {
            field: Field::Latitude,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid latitude: \"abc\" is not a finite decimal number"
        );
        assert_eq!(PlannerError::EmptyList.to_string(), "No waypoints to undo");
    }
}
