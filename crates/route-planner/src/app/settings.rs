use crate::app::state::Screen;
use clap::Parser;
use eframe_entrypoints::parse_args;
use route_planner_lib::{Coordinate, RouteConfig};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Route Planner - place waypoints on a map and preview the interpolated route
pub struct Settings {
    /// Initial map latitude (used when no GPS fix is available)
    #[clap(long, default_value = "11.0", allow_negative_numbers = true)]
    pub lat: f64,

    /// Initial map longitude (used when no GPS fix is available)
    #[clap(long, default_value = "11.0", allow_negative_numbers = true)]
    pub lon: f64,

    /// Initial map zoom level
    #[clap(long, default_value = "11.0")]
    pub zoom: f64,

    /// Minimum seconds between two added waypoints
    #[clap(long, default_value = "1.0")]
    pub wait_seconds: f64,

    /// Target spacing of the interpolated route dots in meters
    #[clap(long, default_value = "5.0")]
    pub spacing_meters: f64,

    /// Pretend a GPS receiver reports this fixed position
    #[clap(long, value_name = "LAT,LON", value_parser = parse_lat_lon, allow_hyphen_values = true)]
    pub simulate_gps: Option<Coordinate>,

    /// Screen shown at startup
    #[clap(long, value_enum, default_value = "loading")]
    pub start_screen: Screen,
}

/// Invalid combinations clap cannot check on its own
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettingsError {
    #[error("Invalid start position: {0}")]
    InvalidStart(Coordinate),

    #[error("Invalid wait time: {0} seconds")]
    InvalidWait(f64),

    #[error(transparent)]
    Route(#[from] route_planner_lib::PlannerError),
}

impl Settings {
    /// Parse settings from the command line
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    pub fn start_position(&self) -> Result<Coordinate, SettingsError> {
        let start = Coordinate::new(self.lat, self.lon);
        if start.is_finite() {
            Ok(start)
        } else {
            Err(SettingsError::InvalidStart(start))
        }
    }

    pub fn wait_threshold(&self) -> Result<Duration, SettingsError> {
        Duration::try_from_secs_f64(self.wait_seconds)
            .map_err(|_| SettingsError::InvalidWait(self.wait_seconds))
    }

    pub fn route_config(&self) -> Result<RouteConfig, SettingsError> {
        Ok(RouteConfig::new(self.spacing_meters)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::parse_from(["route-planner"])
    }
}

/// Parse "LAT,LON" for `--simulate-gps`
fn parse_lat_lon(text: &str) -> Result<Coordinate, String> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {text:?}"))?;
    Coordinate::parse(lat, lon).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe_entrypoints::parse_args_from;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.start_position(), Ok(Coordinate::new(11.0, 11.0)));
        assert_eq!(settings.zoom, 11.0);
        assert_eq!(settings.wait_threshold(), Ok(Duration::from_secs(1)));
        assert_eq!(settings.route_config(), Ok(RouteConfig::default()));
        assert_eq!(settings.simulate_gps, None);
        assert_eq!(settings.start_screen, Screen::Loading);
    }

    #[test]
    fn test_negative_coordinates() {
        let settings: Settings = parse_args_from([
            "route-planner",
            "--lat",
            "-33.8688",
            "--lon",
            "151.2093",
            "--simulate-gps",
            "-33.86,151.2",
            "--start-screen",
            "select-location",
        ])
        .unwrap();
        assert_eq!(settings.lat, -33.8688);
        assert_eq!(settings.simulate_gps, Some(Coordinate::new(-33.86, 151.2)));
        assert_eq!(settings.start_screen, Screen::SelectLocation);
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse_args_from::<Settings, _, _>(["route-planner", "--simulate-gps", "north"]).is_err());

        let settings: Settings =
            parse_args_from(["route-planner", "--wait-seconds=-1", "--spacing-meters", "0"])
                .unwrap();
        assert_eq!(settings.wait_threshold(), Err(SettingsError::InvalidWait(-1.0)));
        assert!(settings.route_config().is_err());
    }
}
