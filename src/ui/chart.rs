// src/ui/chart.rs
use eframe::egui;
use egui_plot::{uniform_grid_spacer, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::analysis::{capitalize, format_currency};
use crate::config::Settings;
use crate::model::TimelinePoint;
use crate::ui::table::FORECAST_COLOR;

const UPPER_COLOR: egui::Color32 = egui::Color32::from_rgb(39, 174, 96);
const LOWER_COLOR: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);

/// Points are placed at their position in the timeline; axis ticks and hover
/// text map a position back to its period label.
fn series(timeline: &[TimelinePoint], pick: impl Fn(&TimelinePoint) -> Option<f64>) -> PlotPoints {
    timeline
        .iter()
        .enumerate()
        .filter_map(|(i, point)| pick(point).map(|y| [i as f64, y]))
        .collect()
}

// Whole positions only; the grid also asks for fractional ones.
fn period_tick(labels: &[String], x: f64) -> String {
    if x < -0.5 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

fn hover_text(labels: &[String], series_name: &str, x: f64, y: f64) -> String {
    let period = if x < -0.5 {
        None
    } else {
        labels.get(x.round() as usize)
    };
    let period = period.map(String::as_str).unwrap_or_default();

    if series_name.is_empty() {
        format!("{}\n{}", period, format_currency(y))
    } else {
        format!("{}\n{}: {}", period, series_name, format_currency(y))
    }
}

pub fn show_forecast_chart(ui: &mut egui::Ui, timeline: &[TimelinePoint], settings: &Settings) {
    ui.heading("Sales Forecast");

    let labels: Vec<String> = timeline.iter().map(TimelinePoint::period_label).collect();
    let tick_labels = labels.clone();

    let plot = Plot::new("forecast_chart")
        .height(320.0)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_label(capitalize(&settings.period_name))
        .y_axis_label("Sales ($)")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |x, _max_chars, _range| period_tick(&tick_labels, x))
        .y_axis_formatter(|y, _max_chars, _range| format_currency(y))
        .label_formatter(move |name, value| hover_text(&labels, name, value.x, value.y));

    plot.show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(series(timeline, |p| Some(p.value)))
                .name("Sales")
                .color(FORECAST_COLOR)
                .width(2.0),
        );
        plot_ui.line(
            Line::new(series(timeline, |p| p.upper))
                .name("Upper Bound")
                .color(UPPER_COLOR)
                .style(LineStyle::dashed_loose()),
        );
        plot_ui.line(
            Line::new(series(timeline, |p| p.lower))
                .name("Lower Bound")
                .color(LOWER_COLOR)
                .style(LineStyle::dashed_loose()),
        );
    });
}
