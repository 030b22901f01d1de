// src/state/mod.rs
use chrono::{DateTime, Local};
use tracing::debug;

use crate::api::{ApiError, ExplainReply, ExplainRequest, PredictRequest, PredictResponse};
use crate::config::Settings;
use crate::model::{StoreEntry, StoreId, StoreInfo, TimelinePoint};

pub mod messages;

/// Everything that can happen to the dashboard.
#[derive(Debug)]
pub enum Event {
    Started,
    StoresLoaded(Vec<StoreEntry>),
    StoresFailed(ApiError),
    StoreSelected(Option<StoreId>),
    HorizonSelected(u32),
    ForecastRequested,
    ForecastSucceeded {
        generation: u64,
        response: PredictResponse,
        received_at: DateTime<Local>,
    },
    ForecastFailed {
        generation: u64,
        error: ApiError,
    },
    ExplanationReceived {
        generation: u64,
        reply: ExplainReply,
    },
    ExplanationFailed {
        generation: u64,
        error: ApiError,
    },
    ErrorDismissed,
}

/// Outgoing calls a transition asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadStores,
    Predict { generation: u64, body: PredictRequest },
    Explain { generation: u64, body: ExplainRequest },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::LoadStores => "stores",
            Request::Predict { .. } => "predict",
            Request::Explain { .. } => "explain",
        }
    }
}

/// Snapshot of the dashboard; only `reduce` produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    // Store directory
    pub stores: Vec<StoreEntry>,
    pub stores_requested: bool,

    // Form controls
    pub selected_store: Option<StoreId>,
    pub horizon: u32,

    // Latest forecast
    pub timeline: Vec<TimelinePoint>,
    pub store_info: Option<StoreInfo>,
    pub summary: Option<String>,
    pub last_updated: Option<DateTime<Local>>,

    pub error: Option<String>,

    // Bumped by every accepted forecast request; replies tagged with an
    // older generation are dropped.
    pub generation: u64,
    pub forecast_pending: bool,
    pub explanation_pending: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            stores: Vec::new(),
            stores_requested: false,
            selected_store: None,
            horizon: settings.default_horizon,
            timeline: Vec::new(),
            store_info: None,
            summary: None,
            last_updated: None,
            error: None,
            generation: 0,
            forecast_pending: false,
            explanation_pending: false,
        }
    }

    pub fn selected_entry(&self) -> Option<&StoreEntry> {
        let selected = self.selected_store.as_ref()?;
        self.stores.iter().find(|entry| entry.id() == selected)
    }

    pub fn has_results(&self) -> bool {
        !self.timeline.is_empty()
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping reply for generation {} (current is {})",
                generation, self.generation
            );
            return false;
        }
        true
    }
}

/// Maps the explainer's answer to the text shown in the insight panel.
pub fn summary_message(reply: &ExplainReply) -> String {
    match reply {
        ExplainReply::Status(500) => messages::EXPLANATION_UNAVAILABLE.to_string(),
        ExplainReply::Status(status) => messages::explanation_status_failed(*status),
        ExplainReply::Summary(Some(summary)) if !summary.trim().is_empty() => {
            summary.trim().to_string()
        }
        ExplainReply::Summary(_) => messages::NO_EXPLANATION.to_string(),
    }
}

/// Applies one event to a state snapshot, returning the next snapshot and the
/// requests it asks for.
pub fn reduce(state: AppState, event: Event) -> (AppState, Vec<Request>) {
    let mut next = state;
    let mut requests = Vec::new();

    match event {
        Event::Started => {
            if !next.stores_requested {
                next.stores_requested = true;
                requests.push(Request::LoadStores);
            }
        }
        Event::StoresLoaded(stores) => {
            next.stores = stores;
        }
        Event::StoresFailed(_) => {
            next.stores.clear();
            next.error = Some(messages::STORE_LIST_FAILED.to_string());
        }
        Event::StoreSelected(store) => {
            next.selected_store = store;
            next.store_info = None;
        }
        Event::HorizonSelected(horizon) => {
            next.horizon = horizon;
        }
        Event::ForecastRequested => {
            let store = match next.selected_store.clone() {
                Some(store) if !store.is_blank() => store,
                _ => {
                    next.error = Some(messages::NO_STORE_SELECTED.to_string());
                    return (next, requests);
                }
            };

            next.error = None;
            next.summary = None;
            next.timeline.clear();
            next.store_info = None;
            next.generation += 1;
            next.forecast_pending = true;
            next.explanation_pending = false;

            requests.push(Request::Predict {
                generation: next.generation,
                body: PredictRequest {
                    store,
                    weeks: next.horizon,
                },
            });
        }
        Event::ForecastSucceeded {
            generation,
            response,
            received_at,
        } => {
            if !next.is_current(generation) {
                return (next, requests);
            }
            next.forecast_pending = false;

            if response.timeline.is_empty() {
                next.error = Some(messages::NO_FORECAST.to_string());
                return (next, requests);
            }

            next.timeline = response.timeline;
            next.store_info = response.store_info;
            next.last_updated = Some(received_at);
            next.explanation_pending = true;

            requests.push(Request::Explain {
                generation,
                body: ExplainRequest {
                    timeline: next.timeline.clone(),
                },
            });
        }
        Event::ForecastFailed { generation, .. } => {
            if next.is_current(generation) {
                next.forecast_pending = false;
                next.error = Some(messages::BACKEND_ERROR.to_string());
            }
        }
        Event::ExplanationReceived { generation, reply } => {
            if next.is_current(generation) {
                next.explanation_pending = false;
                next.summary = Some(summary_message(&reply));
            }
        }
        Event::ExplanationFailed { generation, .. } => {
            if next.is_current(generation) {
                next.explanation_pending = false;
                next.summary = Some(messages::EXPLANATION_FAILED.to_string());
            }
        }
        Event::ErrorDismissed => {
            next.error = None;
        }
    }

    (next, requests)
}
