//! Walkers plugins for drawing the planned route on the map
//!
//! The planner only holds plain coordinates. Every frame the plugin borrows
//! the planner and paints markers in screen space; nothing on the map
//! outlives the frame.

use egui::{Color32, Pos2, Rect, Stroke};
use route_planner_lib::{Coordinate, RoutePlanner, RouteSegment};
use walkers::{Plugin, Position, Projector};

const MARKER_RED: Color32 = Color32::from_rgb(220, 40, 40);
const LIVE_BLUE: Color32 = Color32::from_rgb(40, 110, 230);

/// Convert a planner coordinate to a walkers position
#[inline]
pub fn to_position(coordinate: Coordinate) -> Position {
    walkers::lat_lon(coordinate.lat, coordinate.lon)
}

/// Convert a walkers position to a planner coordinate
#[inline]
pub fn to_coordinate(position: Position) -> Coordinate {
    Coordinate::new(position.y(), position.x())
}

/// Minimum on-screen gap between drawn route dots, in points
const MIN_DOT_GAP: f32 = 3.0;

/// Draw every `n`-th dot of a segment so that at most one dot lands per
/// [`MIN_DOT_GAP`] along its on-screen length
fn dot_stride(dot_count: usize, screen_length: f32) -> usize {
    let room = (screen_length / MIN_DOT_GAP).max(0.0) as usize + 1;
    dot_count.div_ceil(room).max(1)
}

/// Plugin rendering waypoints, route dots and overlays
///
/// Borrows the planner for the frame instead of copying the route.
pub struct RoutePlugin<'a> {
    planner: &'a RoutePlanner,
    /// Segment whose dots are held back (the leg to a just-added waypoint)
    hidden_segment: Option<usize>,
    /// Crosshair at the map center (where "Add Marker" drops the next waypoint)
    crosshair: bool,
    /// Live vehicle position, if known
    live_position: Option<Coordinate>,
}

impl<'a> RoutePlugin<'a> {
    pub fn new(planner: &'a RoutePlanner) -> Self {
        Self {
            planner,
            hidden_segment: None,
            crosshair: false,
            live_position: None,
        }
    }

    pub fn with_hidden_segment(mut self, segment: Option<usize>) -> Self {
        self.hidden_segment = segment;
        self
    }

    pub fn with_crosshair(mut self, enabled: bool) -> Self {
        self.crosshair = enabled;
        self
    }

    pub fn with_live_position(mut self, position: Option<Coordinate>) -> Self {
        self.live_position = position;
        self
    }

    /// Segments whose dots are drawn this frame
    fn visible_segments(&self) -> impl Iterator<Item = &'a RouteSegment> + use<'a> {
        let hidden = self.hidden_segment;
        self.planner
            .route()
            .segments()
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != hidden)
            .map(|(_, segment)| segment)
    }

    fn draw_dots(painter: &egui::Painter, projector: &Projector, viewport: Rect, segment: &RouteSegment) {
        if segment.dots.is_empty() {
            return;
        }

        // Dots are linear in lat/lon between the endpoints, so they all fall
        // inside the screen box spanned by the projected endpoints.
        let start = Self::screen_pos(projector, segment.start);
        let end = Self::screen_pos(projector, segment.end);
        if !viewport.intersects(Rect::from_two_pos(start, end)) {
            return;
        }

        let stride = dot_stride(segment.dots.len(), start.distance(end));
        for dot in segment.dots.iter().step_by(stride) {
            let pos = Self::screen_pos(projector, *dot);
            if viewport.contains(pos) {
                painter.circle_filled(pos, 2.5, MARKER_RED);
            }
        }
    }

    #[inline]
    fn screen_pos(projector: &Projector, coordinate: Coordinate) -> Pos2 {
        let screen_vec = projector.project(to_position(coordinate));
        Pos2::new(screen_vec.x, screen_vec.y)
    }

    fn draw_waypoint(painter: &egui::Painter, pos: Pos2, index: usize) {
        // Pin: a filled head above the exact point, plus a small tip
        let head = pos - egui::vec2(0.0, 14.0);
        painter.line_segment([head, pos], Stroke::new(2.0, MARKER_RED));
        painter.circle(head, 8.0, MARKER_RED, Stroke::new(1.5, Color32::WHITE));
        painter.text(
            head,
            egui::Align2::CENTER_CENTER,
            (index + 1).to_string(),
            egui::FontId::proportional(10.0),
            Color32::WHITE,
        );
        painter.circle_filled(pos, 2.0, MARKER_RED);
    }

    fn draw_crosshair(painter: &egui::Painter, center: Pos2) {
        let stroke = Stroke::new(1.5, Color32::from_black_alpha(180));
        painter.line_segment([center - egui::vec2(10.0, 0.0), center + egui::vec2(10.0, 0.0)], stroke);
        painter.line_segment([center - egui::vec2(0.0, 10.0), center + egui::vec2(0.0, 10.0)], stroke);
    }
}

impl Plugin for RoutePlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("RoutePlugin::run");

        let painter = ui.painter();
        let viewport = response.rect.expand(16.0);

        for segment in self.visible_segments() {
            Self::draw_dots(painter, projector, viewport, segment);
        }

        for (index, waypoint) in self.planner.waypoints().iter().enumerate() {
            let pos = Self::screen_pos(projector, waypoint.coordinate);
            if viewport.contains(pos) {
                Self::draw_waypoint(painter, pos, index);
            }
        }

        if let Some(live) = self.live_position {
            let pos = Self::screen_pos(projector, live);
            painter.circle(pos, 7.0, LIVE_BLUE, Stroke::new(2.0, Color32::WHITE));
        }

        if self.crosshair {
            Self::draw_crosshair(painter, response.rect.center());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_planner_lib::RouteConfig;
    use std::time::Duration;

    #[test]
    fn test_position_conversion() {
        let coordinate = Coordinate::new(51.5, -0.12);
        let position = to_position(coordinate);
        assert_eq!(position.y(), 51.5);
        assert_eq!(position.x(), -0.12);
        assert_eq!(to_coordinate(position), coordinate);
    }

    fn planner_with_two_legs() -> RoutePlanner {
        let mut planner = RoutePlanner::new(
            Coordinate::new(0.0, 0.0),
            Duration::from_secs(1),
            RouteConfig::default(),
        );
        planner.add_waypoint(Coordinate::new(0.0, 0.0), Duration::ZERO).unwrap();
        planner
            .add_waypoint(Coordinate::new(0.0, 0.001), Duration::from_secs(2))
            .unwrap();
        planner
            .add_waypoint(Coordinate::new(0.001, 0.001), Duration::from_secs(4))
            .unwrap();
        planner
    }

    #[test]
    fn test_only_pending_segment_is_hidden() {
        let planner = planner_with_two_legs();
        let pending = planner.pending_segment(Duration::from_millis(4500));
        assert_eq!(pending, Some(1));

        let plugin = RoutePlugin::new(&planner).with_hidden_segment(pending);
        let drawn: Vec<&RouteSegment> = plugin.visible_segments().collect();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].end, Coordinate::new(0.0, 0.001));
        assert_eq!(drawn[0].dots.len(), 22);

        let all = RoutePlugin::new(&planner);
        assert_eq!(all.visible_segments().count(), 2);
    }

    #[test]
    fn test_dot_stride() {
        // Plenty of room: every dot
        assert_eq!(dot_stride(22, 200.0), 1);
        // 4M dots squeezed into 300 points: about one dot per 3 points
        let stride = dot_stride(4_000_000, 300.0);
        assert!(4_000_000 / stride <= 101);
        // Segment collapsed to a point still draws one dot
        assert_eq!(dot_stride(50, 0.0), 50);
        assert_eq!(dot_stride(0, 10.0), 1);
    }
}
