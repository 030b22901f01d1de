// src/ui/controls.rs
use eframe::egui;

use crate::config::Settings;
use crate::state::{AppState, Event};

const NO_STORE: &str = "Select store";

fn horizon_label(horizon: u32, period_name: &str) -> String {
    if horizon == 1 {
        format!("{} {}", horizon, period_name)
    } else {
        format!("{} {}s", horizon, period_name)
    }
}

pub fn show_controls(
    ui: &mut egui::Ui,
    state: &AppState,
    settings: &Settings,
    events: &mut Vec<Event>,
) {
    ui.horizontal(|ui| {
        ui.strong("Store:");

        let selected_text = match (state.selected_entry(), &state.selected_store) {
            (Some(entry), _) => entry.label(),
            (None, Some(id)) => id.to_string(),
            (None, None) => NO_STORE.to_string(),
        };

        egui::ComboBox::from_id_source("store_select")
            .width(240.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if ui.selectable_label(state.selected_store.is_none(), NO_STORE).clicked()
                    && state.selected_store.is_some()
                {
                    events.push(Event::StoreSelected(None));
                }
                for entry in &state.stores {
                    let selected = state.selected_store.as_ref() == Some(entry.id());
                    if ui.selectable_label(selected, entry.label()).clicked() && !selected {
                        events.push(Event::StoreSelected(Some(entry.id().clone())));
                    }
                }
            });

        ui.add_space(12.0);
        ui.strong("Horizon:");

        egui::ComboBox::from_id_source("horizon_select")
            .selected_text(horizon_label(state.horizon, &settings.period_name))
            .show_ui(ui, |ui| {
                for horizon in &settings.horizons {
                    let label = horizon_label(*horizon, &settings.period_name);
                    if ui.selectable_label(state.horizon == *horizon, label).clicked() {
                        events.push(Event::HorizonSelected(*horizon));
                    }
                }
            });

        ui.add_space(12.0);
        if ui.button("Get Forecast").clicked() {
            events.push(Event::ForecastRequested);
        }

        if state.forecast_pending {
            ui.spinner();
            ui.label("Forecasting…");
        } else if state.explanation_pending {
            ui.spinner();
            ui.label("Generating insight…");
        }

        if let Some(updated) = state.last_updated {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("Updated {}", updated.format("%H:%M:%S")));
            });
        }
    });
}

pub fn show_error(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<Event>) {
    if let Some(error) = &state.error {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error.as_str());
            if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                events.push(Event::ErrorDismissed);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_label_pluralizes() {
        assert_eq!(horizon_label(8, "week"), "8 weeks");
        assert_eq!(horizon_label(1, "month"), "1 month");
    }
}
