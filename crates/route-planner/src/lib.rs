//! Route Planner - Application Library
//!
//! The eframe application: a loading screen that waits for GPS, a map screen
//! for placing waypoints, and a placeholder monitoring screen. All planning
//! logic lives in `route-planner-lib`.

mod app;

pub use app::RoutePlannerApp;

eframe_entrypoints::eframe_app!("Route Planner", |cc| Box::new(RoutePlannerApp::new(cc)));
