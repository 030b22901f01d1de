// src/app.rs
use eframe::egui;
use std::sync::Arc;
use tracing::debug;

use crate::api::{ApiWorker, ForecastApi};
use crate::config::Settings;
use crate::state::{self, AppState, Event};
use crate::ui;

pub struct ForecastApp {
    state: AppState,
    settings: Settings,
    worker: ApiWorker,
}

impl ForecastApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, api: Arc<dyn ForecastApi>) -> Self {
        let mut app = Self {
            state: AppState::new(&settings),
            settings,
            worker: ApiWorker::new(api, Some(cc.egui_ctx.clone())),
        };
        app.dispatch(Event::Started);
        app
    }

    fn dispatch(&mut self, event: Event) {
        let current = std::mem::take(&mut self.state);
        let (next, requests) = state::reduce(current, event);
        self.state = next;

        for request in requests {
            debug!("Submitting {} request", request.name());
            self.worker.submit(request);
        }
    }
}

impl eframe::App for ForecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.worker.drain() {
            self.dispatch(event);
        }

        let mut events = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("📊 Liquor Sales Forecast");
            ui.add_space(6.0);
            ui::show_controls(ui, &self.state, &self.settings, &mut events);
            ui::show_error(ui, &self.state, &mut events);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::show_results(ui, &self.state, &self.settings);
        });

        for event in events {
            self.dispatch(event);
        }
    }
}
