// src/ui/table.rs
use eframe::egui;

use crate::analysis::{capitalize, format_currency, humanize_key, range_display, sorted_breakdown};
use crate::config::Settings;
use crate::model::TimelinePoint;

pub const FORECAST_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 134, 222);

pub fn show_results_table(ui: &mut egui::Ui, timeline: &[TimelinePoint], settings: &Settings) {
    ui.heading("Forecast Results");
    ui.add_space(4.0);

    egui::Grid::new("forecast_table")
        .num_columns(4)
        .striped(true)
        .spacing([32.0, 6.0])
        .show(ui, |ui| {
            ui.strong(capitalize(&settings.period_name));
            ui.strong("Type");
            ui.strong("Sales ($)");
            ui.strong("Range (±)");
            ui.end_row();

            for (idx, point) in timeline.iter().enumerate() {
                ui.label(point.period_label());
                if point.is_forecast() {
                    ui.colored_label(FORECAST_COLOR, "Forecast");
                } else {
                    ui.label("Actual");
                }
                ui.label(format_currency(point.value));
                ui.label(range_display(point));
                ui.end_row();

                if point.is_forecast() && point.has_breakdown() {
                    show_breakdown_row(ui, idx, point, settings);
                    ui.end_row();
                }
            }
        });
}

fn show_breakdown_row(ui: &mut egui::Ui, idx: usize, point: &TimelinePoint, settings: &Settings) {
    egui::CollapsingHeader::new("Category breakdown")
        .id_source(("breakdown", idx))
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new(("breakdown_grid", idx))
                .num_columns(2)
                .spacing([16.0, 2.0])
                .show(ui, |ui| {
                    for (category, amount) in sorted_breakdown(point) {
                        ui.label(humanize_key(category, &settings.category_separators));
                        ui.label(format_currency(amount));
                        ui.end_row();
                    }
                });
        });
}
