//! Strip-chart plotting

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::core::Sample;
use super::theme::*;

/// Vertical range and layers of the strip chart
pub struct StripChart {
    /// Bottom of the y axis
    pub y_min: f64,
    /// Top of the y axis
    pub y_max: f64,
    /// Also plot X/Y/Z
    pub show_axes: bool,
}

impl StripChart {
    /// Plot magnitude (and optionally X/Y/Z) against sample sequence
    pub fn show(&self, ui: &mut egui::Ui, series: &[Sample]) {
        let dark_mode = ui.visuals().dark_mode;

        let plot = Plot::new("magnitude_strip_chart")
            .legend(Legend::default().position(egui_plot::Corner::LeftTop))
            .x_axis_label("Sample")
            .y_axis_label("Acceleration (G)")
            .include_y(self.y_min)
            .include_y(self.y_max)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_grid(true);

        plot.show(ui, |plot_ui| {
            if self.show_axes {
                plot_ui.line(trace(series, "X", AXIS_X_BLUE, |s| s.x));
                plot_ui.line(trace(series, "Y", AXIS_Y_GREEN, |s| s.y));
                plot_ui.line(trace(series, "Z", AXIS_Z_RED, |s| s.z));
            }
            plot_ui.line(
                trace(series, "Magnitude", magnitude_color(dark_mode), |s| s.magnitude).width(2.0),
            );
        });
    }
}

fn trace(series: &[Sample], name: &str, color: egui::Color32, value: impl Fn(&Sample) -> i32) -> Line {
    let points: PlotPoints = series
        .iter()
        .map(|s| [s.sequence as f64, value(s) as f64])
        .collect();

    Line::new(points).color(color).name(name).width(1.5)
}
