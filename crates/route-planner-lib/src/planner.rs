//! Waypoint list management
//!
//! [`RoutePlanner`] owns the ordered waypoints, the route derived from them and
//! the reference position that "add marker" uses. Adding is rate limited by a
//! check-and-reject throttle: a rejected add returns
//! [`PlannerError::Throttled`] immediately instead of waiting.

use crate::geodesy::Coordinate;
use crate::route::{Route, RouteConfig};
use crate::{PlannerError, Result};
use std::time::Duration;

/// Minimum time between two accepted waypoints
pub const DEFAULT_WAIT_THRESHOLD: Duration = Duration::from_secs(1);

/// A user-placed waypoint
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub coordinate: Coordinate,
    /// When the waypoint was added, relative to the planner's clock epoch
    pub created_at: Duration,
}

impl Waypoint {
    #[inline]
    pub const fn new(coordinate: Coordinate, created_at: Duration) -> Self {
        Self {
            coordinate,
            created_at,
        }
    }
}

/// Ordered waypoint list with its interpolated route
///
/// Timestamps passed to the planner are durations since an arbitrary epoch
/// chosen by the caller; they only need to be monotonic.
#[derive(Clone, Debug)]
pub struct RoutePlanner {
    waypoints: Vec<Waypoint>,
    route: Route,
    route_config: RouteConfig,
    /// Position used by [`RoutePlanner::add_waypoint_at_reference`]
    reference: Coordinate,
    wait_threshold: Duration,
    last_add: Option<Duration>,
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(Coordinate::default(), DEFAULT_WAIT_THRESHOLD, RouteConfig::default())
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RoutePlanner {
    pub fn new(reference: Coordinate, wait_threshold: Duration, route_config: RouteConfig) -> Self {
        Self {
            waypoints: Vec::new(),
            route: Route::default(),
            route_config,
            reference,
            wait_threshold,
            last_add: None,
        }
    }

    /// Append a waypoint unless the previous one was added within the wait threshold
    ///
    /// Returns the index of the new waypoint. A throttled call changes nothing.
    pub fn add_waypoint(&mut self, coordinate: Coordinate, now: Duration) -> Result<usize> {
        if let Some(retry_in) = self.throttle_remaining(now) {
            tracing::debug!("Waypoint at {coordinate} throttled for {retry_in:?}");
            return Err(PlannerError::Throttled { retry_in });
        }

        self.waypoints.push(Waypoint::new(coordinate, now));
        self.last_add = Some(now);
        self.rebuild_route();

        let index = self.waypoints.len() - 1;
        tracing::info!("Added waypoint #{index} at {coordinate}");
        Ok(index)
    }

    /// Append a waypoint at the current reference position
    pub fn add_waypoint_at_reference(&mut self, now: Duration) -> Result<usize> {
        self.add_waypoint(self.reference, now)
    }

    /// Remove the most recently added waypoint
    pub fn undo_last(&mut self) -> Result<Waypoint> {
        let removed = self.waypoints.pop().ok_or(PlannerError::EmptyList)?;
        self.rebuild_route();
        tracing::info!(
            "Removed waypoint #{} at {}",
            self.waypoints.len(),
            removed.coordinate
        );
        Ok(removed)
    }

    /// Remove every waypoint
    pub fn clear(&mut self) {
        if !self.waypoints.is_empty() {
            tracing::info!("Cleared {} waypoints", self.waypoints.len());
        }
        self.waypoints.clear();
        self.route = Route::default();
    }

    /// Parse a manually typed latitude/longitude and make it the reference position
    ///
    /// Surrounding whitespace is ignored. On failure nothing changes.
    pub fn set_by_manual_entry(&mut self, lat: &str, lon: &str) -> Result<Coordinate> {
        let coordinate = Coordinate::parse(lat, lon)?;
        if !coordinate.is_in_range() {
            tracing::warn!("Manual entry {coordinate} is outside the usual WGS84 range");
        }
        self.reference = coordinate;
        Ok(coordinate)
    }

    #[inline]
    pub fn set_reference(&mut self, coordinate: Coordinate) {
        self.reference = coordinate;
    }

    #[inline]
    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    /// Time left before another waypoint is accepted, `None` if one would be accepted now
    pub fn throttle_remaining(&self, now: Duration) -> Option<Duration> {
        let last = self.last_add?;
        let elapsed = now.saturating_sub(last);
        if elapsed > self.wait_threshold {
            None
        } else {
            // At exactly the threshold the add is still rejected, report a minimal wait
            Some((self.wait_threshold - elapsed).max(Duration::from_nanos(1)))
        }
    }

    #[inline]
    pub fn is_throttled(&self, now: Duration) -> bool {
        self.throttle_remaining(now).is_some()
    }

    #[inline]
    pub fn wait_threshold(&self) -> Duration {
        self.wait_threshold
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[inline]
    pub fn route_config(&self) -> &RouteConfig {
        &self.route_config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Index of the segment leading to a waypoint added less than the wait threshold ago
    ///
    /// `None` once the throttle has elapsed, or when the newest waypoint is
    /// not the last one added (it was undone).
    pub fn pending_segment(&self, now: Duration) -> Option<usize> {
        let newest = self.waypoints.last()?;
        if self.last_add != Some(newest.created_at) || !self.is_throttled(now) {
            return None;
        }
        self.route.segments().len().checked_sub(1)
    }

    /// Undo is only meaningful with at least one waypoint
    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.waypoints.is_empty()
    }

    fn rebuild_route(&mut self) {
        self.route = Route::from_waypoints(&self.waypoints, &self.route_config);
    }
}
