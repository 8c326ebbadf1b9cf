//! Main application window

use eframe::egui;
use std::time::Instant;
use tracing::error;

use crate::config::Config;
use crate::core::Engine;
use super::plots::StripChart;
use super::widgets::*;

/// Renders the session and drives its poll loop from the frame callback
pub struct QuakeWatchApp {
    engine: Engine,
    chart: StripChart,
    last_poll: Option<Instant>,
    transport_error: Option<String>,
    paused: bool,
}

impl QuakeWatchApp {
    /// Window state for `engine` with chart settings from `config`
    pub fn new(config: Config, engine: Engine) -> Self {
        Self {
            engine,
            chart: StripChart {
                y_min: config.gui.y_min,
                y_max: config.gui.y_max,
                show_axes: config.gui.show_axes,
            },
            last_poll: None,
            transport_error: None,
            paused: false,
        }
    }

    fn poll_if_due(&mut self) {
        let due = self
            .last_poll
            .map_or(true, |t| t.elapsed() >= self.engine.poll_interval());
        if !due {
            return;
        }
        self.last_poll = Some(Instant::now());

        if self.paused || self.transport_error.is_some() {
            // still expire alerts while the feed is paused or the device is gone
            self.engine.tick();
            return;
        }

        if let Err(e) = self.engine.poll() {
            self.fail(e.to_string());
        }
    }

    fn fail(&mut self, message: String) {
        error!("Transport failed, no further reads: {}", message);
        self.transport_error = Some(message);
    }
}

impl eframe::App for QuakeWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_if_due();
        let snapshot = self.engine.snapshot();

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                transport_indicator(ui, self.engine.transport_status(), self.engine.transport_name());
                ui.separator();
                ui.label(format!("Lines: {}", snapshot.stats.lines_received));
                ui.separator();
                ui.label(format!("Samples: {}", snapshot.stats.readings_accepted));
                ui.separator();
                ui.label(format!("Parse errors: {}", snapshot.stats.parse_errors));
                ui.separator();
                ui.label(format!(
                    "Alerts: {} tremor / {} earthquake",
                    snapshot.stats.tremor_alerts, snapshot.stats.earthquake_alerts
                ));

                if let Some(err) = &self.transport_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, format!("Transport error: {}", err));
                } else if let Some(err) = &snapshot.stats.last_error {
                    ui.separator();
                    ui.weak(format!("Last bad line: {}", err));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(chrono::Local::now().format("%H:%M:%S").to_string());
                    ui.checkbox(&mut self.paused, "Pause feed");
                });
            });
        });

        // Title / alert banner
        egui::TopBottomPanel::top("alert_banner").show(ctx, |ui| {
            ui.add_space(4.0);
            alert_banner(ui, snapshot.alert);
            ui.add_space(4.0);
        });

        // Readout
        egui::SidePanel::right("readout_panel")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.heading("Latest");
                ui.separator();
                sample_readout(ui, snapshot.last.as_ref());
                ui.separator();
                ui.checkbox(&mut self.chart.show_axes, "Show X/Y/Z");
            });

        // Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart.show(ui, &snapshot.series);
        });

        ctx.request_repaint_after(self.engine.poll_interval());
    }
}
