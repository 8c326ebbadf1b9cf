// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Theme and chart palette

use eframe::egui;
use egui::Color32;

use crate::config::Theme;
use crate::detection::AlertKind;

/// Earthquake banner
pub const EARTHQUAKE_RED: Color32 = Color32::from_rgb(220, 20, 20);
/// Tremor banner
pub const TREMOR_ORANGE: Color32 = Color32::from_rgb(255, 140, 0);
/// Title when no alert is active
pub const TITLE_BLUE: Color32 = Color32::from_rgb(0, 0, 139);
/// X trace
pub const AXIS_X_BLUE: Color32 = Color32::from_rgb(30, 90, 230);
/// Y trace
pub const AXIS_Y_GREEN: Color32 = Color32::from_rgb(20, 150, 40);
/// Z trace
pub const AXIS_Z_RED: Color32 = Color32::from_rgb(210, 40, 40);

/// Apply theme to egui context
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Dark => ctx.set_visuals(chart_visuals(egui::Visuals::dark())),
        Theme::Light => ctx.set_visuals(chart_visuals(light_visuals())),
        Theme::System => {
            // egui 0.25 has no portable dark-mode query; follow the plot default
            ctx.set_visuals(chart_visuals(light_visuals()));
        }
    }
}

fn light_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    // figure background around a white chart
    visuals.panel_fill = Color32::from_rgb(245, 245, 245);
    visuals.extreme_bg_color = Color32::WHITE;
    visuals
}

fn chart_visuals(mut visuals: egui::Visuals) -> egui::Visuals {
    visuals.window_rounding = egui::Rounding::same(4.0);
    visuals.selection.bg_fill = Color32::from_rgb(60, 110, 170);
    visuals
}

/// Magnitude trace color, readable on either background
pub fn magnitude_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_gray(230)
    } else {
        Color32::BLACK
    }
}

/// Banner color for the active alert, or the idle title color
pub fn alert_color(alert: Option<AlertKind>, dark_mode: bool) -> Color32 {
    match alert {
        Some(AlertKind::Earthquake) => EARTHQUAKE_RED,
        Some(AlertKind::Tremor) => TREMOR_ORANGE,
        None if dark_mode => Color32::from_rgb(120, 170, 255),
        None => TITLE_BLUE,
    }
}
