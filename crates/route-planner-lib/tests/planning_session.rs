//! End-to-end planning session through the public API

use route_planner_lib::{
    Coordinate, DEFAULT_SPACING_METERS, DEFAULT_WAIT_THRESHOLD, LoadingStatus, NoGps,
    PlannerError, PositionSource, RouteConfig, RoutePlanner, Ticker, distance,
};
use std::time::Duration;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn plan_route_with_map_center_polling() {
    let mut planner = RoutePlanner::new(
        Coordinate::new(11.0, 11.0),
        DEFAULT_WAIT_THRESHOLD,
        RouteConfig::default(),
    );
    let mut ticker = Ticker::default();

    // The user pans the map, the 1 s tick copies the center into the planner
    let centers = [
        Coordinate::new(11.0, 11.0),
        Coordinate::new(11.0, 11.0005),
        Coordinate::new(11.0004, 11.0005),
    ];

    let mut now = Duration::ZERO;
    for center in centers {
        while !ticker.poll(now) {
            now += Duration::from_millis(16);
        }
        planner.set_reference(center);
        planner.add_waypoint_at_reference(now).unwrap();
        // Clicking again right away is rejected without blocking
        assert!(matches!(
            planner.add_waypoint_at_reference(now + Duration::from_millis(100)),
            Err(PlannerError::Throttled { .. })
        ));
        now += secs(1.1);
    }

    assert_eq!(planner.len(), 3);
    let route = planner.route();
    assert_eq!(route.segments().len(), 2);

    for (segment, pair) in route.segments().iter().zip(centers.windows(2)) {
        let expected = (distance(pair[0], pair[1]) / DEFAULT_SPACING_METERS).floor() as usize;
        assert_eq!(segment.dots.len(), expected);
    }

    let path: Vec<Coordinate> = route.path().collect();
    assert_eq!(path[0], centers[0]);
    assert_eq!(*path.last().unwrap(), centers[2]);

    // Undo everything, then undo once more on the empty list
    for _ in 0..3 {
        planner.undo_last().unwrap();
    }
    assert_eq!(planner.undo_last(), Err(PlannerError::EmptyList));
    assert!(planner.route().is_empty());
}

#[test]
fn manual_entry_then_add() {
    let mut planner = RoutePlanner::default();
    assert!(planner.set_by_manual_entry("abc", "2.0").is_err());
    assert_eq!(planner.reference(), Coordinate::default());

    planner.set_by_manual_entry("48.8566", "2.3522").unwrap();
    planner.add_waypoint_at_reference(Duration::ZERO).unwrap();
    assert_eq!(
        planner.waypoints()[0].coordinate,
        Coordinate::new(48.8566, 2.3522)
    );
}

#[test]
fn loading_screen_without_gps() {
    let gps = NoGps;
    let mut status = LoadingStatus::new();
    let mut ticker = Ticker::default();

    let mut messages = Vec::new();
    for t in (0..5000).step_by(250) {
        if ticker.poll(Duration::from_millis(t)) {
            status.tick(gps.is_available());
            messages.push(status.message());
        }
    }

    assert_eq!(messages.len(), 5);
    assert_eq!(messages[2], "Waiting for GPS Signal...");
    assert_eq!(messages[3], "Waiting for GPS Signal");
}
