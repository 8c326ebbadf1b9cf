// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Custom UI widgets

use eframe::egui;

use crate::core::Sample;
use crate::detection::AlertKind;
use crate::sensors::TransportStatus;
use super::theme::*;

/// Chart title; switches to a warning banner while an alert is active
pub fn alert_banner(ui: &mut egui::Ui, alert: Option<AlertKind>) {
    let dark_mode = ui.visuals().dark_mode;
    let color = alert_color(alert, dark_mode);

    let (text, size) = match alert {
        Some(kind) => (format!("⚠ {} ⚠", kind.headline()), 22.0),
        None => ("Real-Time Earthquake Visualization".to_string(), 18.0),
    };

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(text).size(size).color(color).strong());
    });
}

/// Latest X/Y/Z/magnitude readout
pub fn sample_readout(ui: &mut egui::Ui, last: Option<&Sample>) {
    let dark_mode = ui.visuals().dark_mode;
    let fmt = |v: Option<i32>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());

    egui::Grid::new("sample_readout")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (label, value, color) in [
                ("X", last.map(|s| s.x), AXIS_X_BLUE),
                ("Y", last.map(|s| s.y), AXIS_Y_GREEN),
                ("Z", last.map(|s| s.z), AXIS_Z_RED),
                ("Magnitude", last.map(|s| s.magnitude), magnitude_color(dark_mode)),
            ] {
                ui.label(egui::RichText::new(label).color(color).strong());
                ui.label(egui::RichText::new(fmt(value)).color(color).strong().monospace());
                ui.end_row();
            }
        });

    if let Some(s) = last {
        ui.weak(format!("sample #{}", s.sequence));
    }
}

/// Transport status dot with label
pub fn transport_indicator(ui: &mut egui::Ui, status: TransportStatus, name: &str) {
    let color = match status {
        TransportStatus::Connected => egui::Color32::GREEN,
        TransportStatus::Exhausted | TransportStatus::Closed => egui::Color32::GRAY,
        TransportStatus::Disconnected | TransportStatus::Error => egui::Color32::RED,
    };
    ui.horizontal(|ui| {
        ui.colored_label(color, "●");
        ui.label(format!("{} ({:?})", name, status));
    });
}
