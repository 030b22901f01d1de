// src/ui/mod.rs
use eframe::egui;

use crate::analysis::ForecastMetrics;
use crate::config::Settings;
use crate::state::AppState;

pub mod chart;
pub mod controls;
pub mod panels;
pub mod table;

pub use controls::{show_controls, show_error};

/// Everything below the controls; only drawn once a timeline is present.
pub fn show_results(ui: &mut egui::Ui, state: &AppState, settings: &Settings) {
    if !state.has_results() {
        ui.centered_and_justified(|ui| {
            ui.weak("Pick a store and request a forecast");
        });
        return;
    }

    let metrics = ForecastMetrics::from_timeline(&state.timeline);

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            table::show_results_table(ui, &state.timeline, settings);
            ui.add_space(12.0);

            if let Some(info) = &state.store_info {
                panels::show_store_info(ui, info);
                ui.add_space(12.0);
            }

            chart::show_forecast_chart(ui, &state.timeline, settings);
            ui.add_space(12.0);

            panels::show_metrics(ui, &metrics, settings);

            if let Some(summary) = &state.summary {
                ui.add_space(12.0);
                panels::show_insight(ui, summary);
            }
        });
}
