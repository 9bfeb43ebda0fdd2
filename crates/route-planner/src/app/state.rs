//! Application state management
//!
//! This module holds everything the screens share: the waypoint planner, the
//! GPS source, the once-per-second ticker and the manual-entry form. Map
//! widgets and tile caches stay in [`crate::app::RoutePlannerApp`].

use crate::app::settings::Settings;
use route_planner_lib::{
    Coordinate, FixedPosition, LoadingStatus, NoGps, PlannerError, PositionSource, RouteConfig,
    RoutePlanner, Ticker,
};
use std::time::Duration;

/// Label of the add button while waypoints are accepted
pub const ADD_MARKER_LABEL: &str = "Add Marker";

/// Label of the add button while the throttle is active
pub const WAIT_LABEL: &str = "Wait";

/// The three screens of the application
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Screen {
    Loading,
    SelectLocation,
    Monitoring,
}

impl Screen {
    pub fn all() -> &'static [Self] {
        &[Self::Loading, Self::SelectLocation, Self::Monitoring]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "⏳ Loading",
            Self::SelectLocation => "📍 Select Location",
            Self::Monitoring => "📡 Monitoring",
        }
    }
}

/// Available map tile providers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TilesProvider {
    OpenStreetMap,
    OpenTopoMap,
}

impl TilesProvider {
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
            Self::OpenTopoMap => "© OpenTopoMap (CC-BY-SA)",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::OpenStreetMap, Self::OpenTopoMap]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::OpenTopoMap => "OpenTopoMap",
        }
    }
}

/// Outcome of the last manual position entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMessage {
    Valid,
    Invalid,
}

impl EntryMessage {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Valid => "Valid Lat/Long",
            Self::Invalid => "Invalid Lat/Long",
        }
    }
}

/// The latitude/longitude text fields on the select-location screen
#[derive(Clone, Debug, Default)]
pub struct ManualEntry {
    pub lat_text: String,
    pub lon_text: String,
    pub message: Option<EntryMessage>,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone)]
pub struct UiSettings {
    /// Map tiles provider
    pub tiles_provider: TilesProvider,

    /// Whether the settings window is open
    pub show_settings: bool,

    /// Whether the help window is open
    pub show_help: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tiles_provider: TilesProvider::OpenStreetMap,
            show_settings: false,
            show_help: false,
        }
    }
}

/// Main application state
pub struct AppState {
    /// Waypoints and the interpolated route
    pub planner: RoutePlanner,

    /// GPS boundary
    pub gps: Box<dyn PositionSource>,

    /// Loading screen message
    pub loading: LoadingStatus,

    /// Currently shown screen
    pub screen: Screen,

    /// Manual position form
    pub entry: ManualEntry,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Initial map zoom
    pub start_zoom: f64,

    /// Set when the select-location map should jump to the reference position
    pub pending_recenter: Option<Coordinate>,

    ticker: Ticker,

    /// Epoch for all planner timestamps
    started: instant::Instant,
}

impl AppState {
    /// Create new application state from CLI settings
    pub fn new(settings: &Settings) -> Self {
        let gps: Box<dyn PositionSource> = match settings.simulate_gps {
            Some(position) => {
                tracing::info!("Simulating a GPS fix at {position}");
                Box::new(FixedPosition(position))
            }
            None => Box::new(NoGps),
        };
        Self::with_gps(settings, gps)
    }

    /// Create state with an explicit GPS source
    pub fn with_gps(settings: &Settings, gps: Box<dyn PositionSource>) -> Self {
        let fallback = Coordinate::new(11.0, 11.0);
        let start = settings.start_position().unwrap_or_else(|e| {
            tracing::warn!("{e}, using {fallback}");
            fallback
        });
        let wait_threshold = settings.wait_threshold().unwrap_or_else(|e| {
            tracing::warn!("{e}, using the default");
            route_planner_lib::DEFAULT_WAIT_THRESHOLD
        });
        let route_config = settings.route_config().unwrap_or_else(|e| {
            tracing::warn!("{e}, using the default");
            RouteConfig::default()
        });

        // Start at the GPS position when one is already available
        let reference = gps.current_position().unwrap_or(start);

        Self {
            planner: RoutePlanner::new(reference, wait_threshold, route_config),
            gps,
            loading: LoadingStatus::new(),
            screen: settings.start_screen,
            entry: ManualEntry::default(),
            ui_settings: UiSettings::default(),
            start_zoom: settings.zoom,
            pending_recenter: None,
            ticker: Ticker::default(),
            started: instant::Instant::now(),
        }
    }

    /// Time since startup, the clock used for waypoint timestamps
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run the periodic polling if a tick is due
    ///
    /// `map_center` is the select-location map's current center. Returns the
    /// time until the next tick so the caller can schedule a repaint.
    pub fn poll_tick(&mut self, now: Duration, map_center: Coordinate) -> Duration {
        if self.ticker.poll(now) {
            profiling::scope!("tick");
            self.loading.tick(self.gps.is_available());
            self.planner.set_reference(map_center);
        }
        self.ticker.until_next(now)
    }

    /// "Add Marker" button
    pub fn add_marker(&mut self) {
        let now = self.now();
        match self.planner.add_waypoint_at_reference(now) {
            Ok(_) => {}
            Err(PlannerError::Throttled { retry_in }) => {
                tracing::debug!("Add marker ignored, retry in {retry_in:?}");
            }
            Err(e) => tracing::warn!("Add marker failed: {e}"),
        }
    }

    /// "Undo" button
    pub fn undo_marker(&mut self) {
        if let Err(e) = self.planner.undo_last() {
            tracing::debug!("Undo ignored: {e}");
        }
    }

    /// "Go" button of the manual position form
    pub fn enter_position(&mut self) {
        match self
            .planner
            .set_by_manual_entry(&self.entry.lat_text, &self.entry.lon_text)
        {
            Ok(position) => {
                self.entry.message = Some(EntryMessage::Valid);
                self.pending_recenter = Some(position);
            }
            Err(e) => {
                tracing::debug!("Manual entry rejected: {e}");
                self.entry.message = Some(EntryMessage::Invalid);
            }
        }
    }

    /// Label for the add button at `now`
    pub fn add_marker_label(&self, now: Duration) -> &'static str {
        if self.planner.is_throttled(now) {
            WAIT_LABEL
        } else {
            ADD_MARKER_LABEL
        }
    }

    /// Segment to the waypoint just added, hidden until the add throttle elapses
    pub fn hidden_route_segment(&self, now: Duration) -> Option<usize> {
        self.planner.pending_segment(now)
    }

    /// Total planned distance, human readable
    pub fn format_distance(&self) -> String {
        format_distance(self.planner.route().total_distance())
    }
}

/// Format a distance in meters as a human-readable string
pub fn format_distance(meters: f64) -> String {
    let km = meters / 1000.0;
    if km < 1.0 {
        format!("{:.0} m", meters)
    } else if km < 100.0 {
        format!("{:.2} km", km)
    } else {
        format!("{:.0} km", km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_gps(&Settings::default(), Box::new(NoGps))
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.screen, Screen::Loading);
        assert_eq!(state.planner.reference(), Coordinate::new(11.0, 11.0));
        assert!(state.planner.is_empty());
        assert_eq!(state.add_marker_label(state.now()), ADD_MARKER_LABEL);
    }

    #[test]
    fn test_gps_position_used_at_startup() {
        let gps = FixedPosition(Coordinate::new(-33.86, 151.2));
        let state = AppState::with_gps(&Settings::default(), Box::new(gps));
        assert_eq!(state.planner.reference(), Coordinate::new(-33.86, 151.2));
    }

    #[test]
    fn test_add_marker_twice_is_throttled() {
        let mut state = state();
        state.add_marker();
        state.add_marker();
        assert_eq!(state.planner.len(), 1);
        assert_eq!(state.add_marker_label(state.now()), WAIT_LABEL);
        // The first waypoint has no leg yet
        assert_eq!(state.hidden_route_segment(state.now()), None);
    }

    #[test]
    fn test_undo_on_empty_is_harmless() {
        let mut state = state();
        state.undo_marker();
        assert!(state.planner.is_empty());
    }

    #[test]
    fn test_enter_position() {
        let mut state = state();
        state.entry.lat_text = "abc".to_string();
        state.entry.lon_text = "10".to_string();
        state.enter_position();
        assert_eq!(state.entry.message, Some(EntryMessage::Invalid));
        assert_eq!(state.pending_recenter, None);
        assert_eq!(state.planner.reference(), Coordinate::new(11.0, 11.0));

        state.entry.lat_text = "48.8566".to_string();
        state.entry.lon_text = "2.3522".to_string();
        state.enter_position();
        assert_eq!(state.entry.message, Some(EntryMessage::Valid));
        assert_eq!(state.pending_recenter, Some(Coordinate::new(48.8566, 2.3522)));
        assert_eq!(state.entry.message.map(|m| m.text()), Some("Valid Lat/Long"));
    }

    #[test]
    fn test_tick_updates_reference_and_loading() {
        let mut state = state();
        let center = Coordinate::new(1.0, 2.0);

        let wait = state.poll_tick(Duration::ZERO, center);
        assert_eq!(wait, Duration::from_secs(1));
        assert_eq!(state.planner.reference(), center);
        assert_eq!(state.loading.message(), "Waiting for GPS Signal.");

        // Not due yet: nothing changes
        state.poll_tick(Duration::from_millis(500), Coordinate::new(5.0, 5.0));
        assert_eq!(state.planner.reference(), center);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(111.3), "111 m");
        assert_eq!(format_distance(1234.0), "1.23 km");
        assert_eq!(format_distance(250_000.0), "250 km");
    }
}
