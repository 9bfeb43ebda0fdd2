//! UI panels for the application
//!
//! One function per screen plus the shared navigation bar, map controls and
//! overlay windows. Map widgets are passed in by the caller.

use crate::app::state::{AppState, EntryMessage, Screen, TilesProvider, format_distance};
use egui::{Color32, RichText, Ui};
use route_planner_lib::WAITING_MESSAGE;

/// Top navigation bar with one tab per screen
pub fn navigation_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            for screen in Screen::all() {
                ui.selectable_value(&mut state.screen, *screen, screen.name());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("❓").on_hover_text("Help (F1)").clicked() {
                    state.ui_settings.show_help = !state.ui_settings.show_help;
                }
                if ui.button("⚙").on_hover_text("Settings").clicked() {
                    state.ui_settings.show_settings = !state.ui_settings.show_settings;
                }
            });
        });
    });
}

/// Loading screen: GPS wait message, no automatic transition
pub fn loading_screen(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.heading(RichText::new("Route Planner").size(32.0).strong());
            ui.add_space(24.0);

            let found = state.loading.is_found();
            // Fixed width so the trailing dots do not make the text jump around
            let message = state.loading.message();
            let text = RichText::new(format!("{message:<width$}", width = WAITING_MESSAGE.len() + 3))
                .size(20.0)
                .monospace();
            if found {
                ui.label(text.color(Color32::from_rgb(40, 160, 60)));
            } else {
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 320.0).max(0.0) / 2.0);
                    ui.spinner();
                    ui.label(text);
                });
            }

            ui.add_space(24.0);
            let label = if found { "Continue" } else { "Skip" };
            if ui.button(RichText::new(label).size(16.0)).clicked() {
                state.screen = Screen::SelectLocation;
            }
        });
    });
}

/// Side panel of the select-location screen
pub fn select_location_panel(ctx: &egui::Context, state: &mut AppState) {
    let screen_size = ctx.viewport_rect().size();
    if screen_size.y > screen_size.x {
        egui::TopBottomPanel::bottom("planner_panel")
            .default_height(260.0)
            .resizable(true)
            .show(ctx, |ui| planner_controls(ui, state));
    } else {
        egui::SidePanel::right("planner_panel")
            .default_width(280.0)
            .min_width(240.0)
            .resizable(true)
            .show(ctx, |ui| planner_controls(ui, state));
    }
}

fn planner_controls(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(RichText::new("📍 Markers").strong());
            ui.add_space(6.0);

            let now = state.now();
            ui.horizontal(|ui| {
                let label = state.add_marker_label(now);
                if ui.button(label).clicked() {
                    state.add_marker();
                }
                if ui
                    .add_enabled(state.planner.can_undo(), egui::Button::new("↩ Undo"))
                    .clicked()
                {
                    state.undo_marker();
                }
                if ui
                    .add_enabled(state.planner.can_undo(), egui::Button::new("🗑 Clear"))
                    .clicked()
                {
                    state.planner.clear();
                }
            });

            ui.add_space(12.0);
            ui.separator();
            position_form(ui, state);

            ui.add_space(12.0);
            ui.separator();
            stats_section(ui, state);

            ui.add_space(12.0);
            if ui
                .add_enabled(!state.planner.is_empty(), egui::Button::new("▶ Start Monitoring"))
                .clicked()
            {
                state.screen = Screen::Monitoring;
            }
        });
}

/// Manual latitude/longitude entry
fn position_form(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("🧭 Go to Position").strong());
    ui.add_space(6.0);

    let mut submitted = false;
    egui::Grid::new("position_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Latitude:");
            let lat = ui.add(egui::TextEdit::singleline(&mut state.entry.lat_text).desired_width(120.0));
            ui.end_row();

            ui.label("Longitude:");
            let lon = ui.add(egui::TextEdit::singleline(&mut state.entry.lon_text).desired_width(120.0));
            ui.end_row();

            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            submitted |= (lat.lost_focus() || lon.lost_focus()) && enter;
        });

    ui.add_space(4.0);
    if ui.button("Go").clicked() {
        submitted = true;
    }
    if submitted {
        state.enter_position();
    }

    if let Some(message) = state.entry.message {
        let color = match message {
            EntryMessage::Valid => Color32::from_rgb(40, 160, 60),
            EntryMessage::Invalid => Color32::RED,
        };
        ui.label(RichText::new(message.text()).color(color));
    }
}

/// Planned route statistics
fn stats_section(ui: &mut Ui, state: &AppState) {
    ui.label(RichText::new("📊 Route").strong());
    ui.add_space(4.0);

    let reference = state.planner.reference();
    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Waypoints:");
            ui.label(RichText::new(state.planner.len().to_string()).strong());
            ui.end_row();

            ui.label("Route dots:");
            ui.label(RichText::new(state.planner.route().total_dots().to_string()).strong());
            ui.end_row();

            ui.label("Distance:");
            ui.label(RichText::new(state.format_distance()).strong());
            ui.end_row();

            ui.label("Map center:");
            ui.label(RichText::new(format!("{:.5}, {:.5}", reference.lat, reference.lon)).monospace());
            ui.end_row();
        });

    if !state.planner.is_empty() {
        ui.add_space(8.0);
        egui::ScrollArea::vertical()
            .id_salt("waypoints_scroll")
            .max_height(160.0)
            .show(ui, |ui| {
                let segments = state.planner.route().segments();
                for (index, waypoint) in state.planner.waypoints().iter().enumerate() {
                    let leg = index
                        .checked_sub(1)
                        .and_then(|i| segments.get(i))
                        .map(|s| format!("  +{}", format_distance(s.distance_meters)))
                        .unwrap_or_default();
                    ui.label(
                        RichText::new(format!(
                            "{:>2}. {:.5}, {:.5}{}",
                            index + 1,
                            waypoint.coordinate.lat,
                            waypoint.coordinate.lon,
                            leg
                        ))
                        .small()
                        .monospace(),
                    );
                }
            });
    }
}

/// Status bar of the monitoring screen
pub fn monitoring_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("monitoring_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            match state.gps.current_position() {
                Some(position) => ui.label(format!(
                    "Live position: {:.5}, {:.5}",
                    position.lat, position.lon
                )),
                None => ui.label(RichText::new("Live position: unavailable").weak()),
            };
            ui.separator();
            ui.label(format!(
                "{} waypoints, {}",
                state.planner.len(),
                state.format_distance()
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Back to Planning").clicked() {
                    state.screen = Screen::SelectLocation;
                }
            });
        });
    });
}

/// Zoom buttons overlaid on the top-left of the map
pub fn zoom_controls(ui: &mut Ui, map_memory: &mut walkers::MapMemory) {
    let rect = ui.max_rect();
    let area_pos = rect.left_top() + egui::vec2(10.0, 10.0);

    egui::Area::new(ui.id().with("zoom_controls"))
        .fixed_pos(area_pos)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.vertical(|ui| {
                    if ui.button(RichText::new("➕").size(16.0)).clicked() {
                        let _ = map_memory.zoom_in();
                    }
                    if ui.button(RichText::new("➖").size(16.0)).clicked() {
                        let _ = map_memory.zoom_out();
                    }
                });
            });
        });
}

/// Tile attribution at the bottom of the map
pub fn attribution(ui: &Ui, provider: TilesProvider) {
    let rect = ui.max_rect();
    ui.painter().text(
        rect.center_bottom() + egui::vec2(0.0, -5.0),
        egui::Align2::CENTER_BOTTOM,
        provider.attribution(),
        egui::FontId::proportional(10.0),
        Color32::from_black_alpha(180),
    );
}

/// Settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.ui_settings.show_settings;
    egui::Window::new("⚙ Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new("🗺 Map Tiles").strong());
            ui.add_space(6.0);
            for provider in TilesProvider::all() {
                let selected = state.ui_settings.tiles_provider == *provider;
                if ui.selectable_label(selected, provider.name()).clicked() {
                    state.ui_settings.tiles_provider = *provider;
                }
            }

            ui.add_space(12.0);
            ui.separator();
            ui.label(RichText::new("📐 Planning").strong());
            ui.add_space(6.0);
            egui::Grid::new("planning_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Dot spacing:");
                    ui.label(format!("{} m", state.planner.route_config().spacing_meters));
                    ui.end_row();

                    ui.label("Marker wait:");
                    ui.label(format!("{:.1} s", state.planner.wait_threshold().as_secs_f64()));
                    ui.end_row();

                    ui.label("GPS:");
                    ui.label(if state.gps.is_available() {
                        "available"
                    } else {
                        "unavailable"
                    });
                    ui.end_row();
                });
            ui.label(
                RichText::new("Change these with --spacing-meters and --wait-seconds")
                    .small()
                    .weak(),
            );
        });
    state.ui_settings.show_settings = open;
}

/// Help overlay
pub fn help_overlay(ctx: &egui::Context, show_help: &mut bool) {
    egui::Window::new("Help")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading("Route Planner");
            ui.add_space(8.0);

            ui.label(RichText::new("Planning").strong());
            ui.label("• Drag the map so the crosshair sits on the next point");
            ui.label("• 'Add Marker' drops a waypoint there (once per second)");
            ui.label("• Route dots appear every ~5 m between waypoints");
            ui.label("• Type a latitude/longitude and press 'Go' to jump");
            ui.add_space(8.0);

            ui.label(RichText::new("Keyboard Shortcuts").strong());
            ui.label("• F1 - Toggle this help");
            ui.label("• Ctrl+Z - Undo last marker");
            ui.add_space(12.0);

            if ui.button("Close").clicked() {
                *show_help = false;
            }
        });
}
