// src/ui/panels.rs
use eframe::egui;

use crate::analysis::{capitalize, format_currency, ForecastMetrics, PLACEHOLDER};
use crate::config::Settings;
use crate::model::StoreInfo;

fn info_row(ui: &mut egui::Ui, label: &str, value: Option<String>) {
    ui.strong(label);
    ui.label(value.unwrap_or_else(|| PLACEHOLDER.to_string()));
    ui.end_row();
}

fn peak_text(label: Option<&str>, value: Option<f64>) -> Option<String> {
    match (label, value) {
        (Some(label), Some(value)) => Some(format!("{} ({})", label, format_currency(value))),
        (Some(label), None) => Some(label.to_string()),
        (None, Some(value)) => Some(format_currency(value)),
        (None, None) => None,
    }
}

pub fn show_store_info(ui: &mut egui::Ui, info: &StoreInfo) {
    ui.group(|ui| {
        ui.heading("Store Info");
        egui::Grid::new("store_info_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                info_row(ui, "City:", info.city.clone());
                info_row(ui, "County:", info.county.clone());
                info_row(ui, "Store #:", info.store_number.as_ref().map(ToString::to_string));
                info_row(ui, "Avg Sales:", info.avg_sales.map(format_currency));
                info_row(ui, "Peak Period:", peak_text(info.peak_month.as_deref(), info.peak_value));
            });
    });
}

pub fn show_metrics(ui: &mut egui::Ui, metrics: &ForecastMetrics, settings: &Settings) {
    let period = capitalize(&settings.period_name);

    ui.group(|ui| {
        ui.heading("📊 Growth Metrics");
        egui::Grid::new("metrics_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                info_row(ui, "Total Forecasted Sales:", Some(format_currency(metrics.total_forecast)));
                info_row(
                    ui,
                    &format!("Average Forecast per {}:", period),
                    Some(format_currency(metrics.avg_forecast)),
                );
                info_row(
                    ui,
                    &format!("{}-over-{} Growth:", period, period),
                    Some(metrics.growth_summary()),
                );

                if metrics.actual_count > 0 {
                    info_row(ui, "Historical Average:", Some(format_currency(metrics.avg_historical)));
                    info_row(
                        ui,
                        &format!("Peak Actual {}:", period),
                        metrics
                            .peak_actual
                            .as_ref()
                            .and_then(|peak| peak_text(Some(peak.label.as_str()), Some(peak.value))),
                    );
                }
            });
    });
}

pub fn show_insight(ui: &mut egui::Ui, summary: &str) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("AI-Generated Insight:");
        ui.label(summary);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_text() {
        assert_eq!(
            peak_text(Some("December 2023"), Some(2210.0)).as_deref(),
            Some("December 2023 ($2,210)")
        );
        assert_eq!(peak_text(None, Some(5.5)).as_deref(), Some("$5.5"));
        assert_eq!(peak_text(None, None), None);
    }
}
