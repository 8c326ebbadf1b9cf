// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! UI module - egui strip-chart console

mod app;
mod widgets;
mod plots;
mod theme;

pub use app::*;
pub use widgets::*;
pub use plots::*;
pub use theme::*;

use anyhow::Result;
use eframe::egui;

use crate::config::Config;
use crate::core::Engine;

/// Launch GUI application
pub fn run_gui(config: Config, engine: Engine) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.gui.width as f32, config.gui.height as f32])
            .with_title("QuakeWatch - Real-Time Earthquake Visualization"),
        vsync: config.gui.vsync,
        ..Default::default()
    };

    eframe::run_native(
        "QuakeWatch",
        options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, config.gui.theme);
            Box::new(QuakeWatchApp::new(config, engine))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
