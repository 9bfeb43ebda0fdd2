//! Application module
//!
//! This module provides the main application structure:
//! - Loading screen polling for a GPS fix
//! - Select-location screen with the planning map and marker controls
//! - Monitoring screen showing the planned route (live tracking placeholder)
//!
//! Screens are a single [`Screen`] enum dispatched from [`RoutePlannerApp::update`].

mod plugin;
pub(crate) mod settings;
mod state;
mod ui_panels;

use crate::app::plugin::{RoutePlugin, to_coordinate, to_position};
use crate::app::settings::Settings;
use crate::app::state::{AppState, Screen, TilesProvider};
use eframe::egui;
use walkers::{
    HttpTiles, Map, MapMemory, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Custom OpenTopoMap tile source
pub struct OpenTopoMap;

impl TileSource for OpenTopoMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.opentopomap.org/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenTopoMap (CC-BY-SA)",
            url: "https://opentopomap.org/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        17 // OpenTopoMap has max zoom of 17
    }
}

/// Main application structure
pub struct RoutePlannerApp {
    /// Application state (planner, GPS, screen, UI settings)
    state: AppState,

    /// Map tiles provider (OpenStreetMap)
    tiles_osm: HttpTiles,

    /// Map tiles provider (OpenTopoMap)
    tiles_otm: HttpTiles,

    /// Planning map camera
    select_map: MapMemory,

    /// Monitoring map camera
    monitor_map: MapMemory,
}

impl RoutePlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::from_cli();
        let state = AppState::new(&settings);

        let tiles_osm = HttpTiles::new(OpenStreetMap, cc.egui_ctx.clone());
        let tiles_otm = HttpTiles::new(OpenTopoMap, cc.egui_ctx.clone());

        let mut select_map = MapMemory::default();
        let mut monitor_map = MapMemory::default();
        for memory in [&mut select_map, &mut monitor_map] {
            if memory.set_zoom(state.start_zoom).is_err() {
                tracing::warn!("Zoom {} out of range, keeping the default", state.start_zoom);
            }
        }

        tracing::info!(
            "Starting on {:?} at {}",
            state.screen,
            state.planner.reference()
        );

        Self {
            state,
            tiles_osm,
            tiles_otm,
            select_map,
            monitor_map,
        }
    }

    /// Current center of the planning map
    fn select_map_center(&self) -> route_planner_lib::Coordinate {
        self.select_map
            .detached()
            .map(to_coordinate)
            .unwrap_or_else(|| self.state.planner.reference())
    }

    fn select_location_screen(&mut self, ctx: &egui::Context) {
        ui_panels::select_location_panel(ctx, &mut self.state);

        if let Some(position) = self.state.pending_recenter.take() {
            self.select_map.center_at(to_position(position));
        }

        let now = self.state.now();
        let hidden_segment = self.state.hidden_route_segment(now);
        if let Some(wait) = self.state.planner.throttle_remaining(now) {
            // Repaint when the newest leg and the "Add Marker" label come back
            ctx.request_repaint_after(wait);
        }

        let my_position = to_position(self.state.planner.reference());
        let provider = self.state.ui_settings.tiles_provider;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("select_map");

                let plugin = RoutePlugin::new(&self.state.planner)
                    .with_hidden_segment(hidden_segment)
                    .with_crosshair(true);

                let tiles: &mut HttpTiles = match provider {
                    TilesProvider::OpenStreetMap => &mut self.tiles_osm,
                    TilesProvider::OpenTopoMap => &mut self.tiles_otm,
                };
                let map = Map::new(Some(tiles), &mut self.select_map, my_position).with_plugin(plugin);
                ui.add(map);

                ui_panels::zoom_controls(ui, &mut self.select_map);
                ui_panels::attribution(ui, provider);
            });
    }

    fn monitoring_screen(&mut self, ctx: &egui::Context) {
        ui_panels::monitoring_panel(ctx, &mut self.state);

        let live = self.state.gps.current_position();
        let center = live
            .or_else(|| self.state.planner.waypoints().first().map(|w| w.coordinate))
            .unwrap_or_else(|| self.state.planner.reference());

        let provider = self.state.ui_settings.tiles_provider;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                profiling::scope!("monitor_map");

                let plugin = RoutePlugin::new(&self.state.planner).with_live_position(live);

                let tiles: &mut HttpTiles = match provider {
                    TilesProvider::OpenStreetMap => &mut self.tiles_osm,
                    TilesProvider::OpenTopoMap => &mut self.tiles_otm,
                };
                let map = Map::new(Some(tiles), &mut self.monitor_map, to_position(center))
                    .with_plugin(plugin);
                ui.add(map);

                ui_panels::zoom_controls(ui, &mut self.monitor_map);
                ui_panels::attribution(ui, provider);
            });
    }
}

#[profiling::all_functions]
impl eframe::App for RoutePlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (toggle_help, undo) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::F1),
                i.key_pressed(egui::Key::Z) && i.modifiers.command,
            )
        });
        if toggle_help {
            self.state.ui_settings.show_help = !self.state.ui_settings.show_help;
        }
        if undo && self.state.screen == Screen::SelectLocation && !ctx.wants_keyboard_input() {
            self.state.undo_marker();
        }

        // Once-per-second polling of GPS availability and the map center
        let now = self.state.now();
        let center = self.select_map_center();
        let until_next = self.state.poll_tick(now, center);
        ctx.request_repaint_after(until_next);

        ui_panels::navigation_bar(ctx, &mut self.state);

        if self.state.ui_settings.show_help {
            ui_panels::help_overlay(ctx, &mut self.state.ui_settings.show_help);
        }
        if self.state.ui_settings.show_settings {
            ui_panels::settings_window(ctx, &mut self.state);
        }

        match self.state.screen {
            Screen::Loading => ui_panels::loading_screen(ctx, &mut self.state),
            Screen::SelectLocation => self.select_location_screen(ctx),
            Screen::Monitoring => self.monitoring_screen(ctx),
        }
    }
}
