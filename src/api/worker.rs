// src/api/worker.rs
use eframe::egui;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::{io, thread};
use tracing::{debug, warn};

use super::{execute, failure, ApiError, ForecastApi};
use crate::state::{Event, Request};

/// Runs requests off the UI thread and hands their events back through a
/// channel drained once per frame.
///
/// Every request gets its own thread and nothing is ever cancelled; stale
/// answers are filtered by generation in the reducer.
pub struct ApiWorker {
    api: Arc<dyn ForecastApi>,
    tx: Sender<Event>,
    rx: Receiver<Event>,
    repaint: Option<egui::Context>,
}

impl ApiWorker {
    pub fn new(api: Arc<dyn ForecastApi>, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { api, tx, rx, repaint }
    }

    pub fn submit(&self, request: Request) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let name = request.name();
        let pending = request.clone();

        let spawned = thread::Builder::new()
            .name(format!("api-{}", name))
            .spawn(move || {
                let event = execute(api.as_ref(), request);
                if tx.send(event).is_err() {
                    debug!("UI closed before {} response arrived", name);
                    return;
                }
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });

        if let Err(e) = spawned {
            self.report_unstarted(&pending, e);
        }
    }

    // The reducer is waiting on this request, so it still gets a reply.
    fn report_unstarted(&self, request: &Request, error: io::Error) {
        warn!("Failed to start {} request thread: {}", request.name(), error);
        let _ = self.tx.send(failure(request, ApiError::Worker(error)));
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }

    /// Events that arrived since the last call, without blocking.
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }
}
