// src/api/mod.rs
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{StoreEntry, StoreId, StoreInfo, TimelinePoint};
use crate::state::{Event, Request};

pub mod http;
pub mod worker;

pub use http::HttpForecastApi;
pub use worker::ApiWorker;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not start request: {0}")]
    Worker(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoresResponse {
    #[serde(default)]
    pub stores: Vec<StoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub store: StoreId,
    pub weeks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
    #[serde(default)]
    pub store_info: Option<StoreInfo>,
    /// Set by the backend instead of a timeline when it rejects a request.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainRequest {
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ExplainBody {
    #[serde(default)]
    summary: Option<String>,
}

/// What the explainer answered: a summary on success, or only a status code.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainReply {
    Summary(Option<String>),
    Status(u16),
}

/// The three endpoints of the forecast service.
pub trait ForecastApi: Send + Sync {
    fn stores(&self) -> Result<StoresResponse, ApiError>;
    fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError>;
    fn explain(&self, request: &ExplainRequest) -> Result<ExplainReply, ApiError>;
}

pub fn decode_stores(body: &str) -> Result<StoresResponse, ApiError> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_predict(body: &str) -> Result<PredictResponse, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Non-2xx explainer responses have no body contract, so only the status is kept.
pub fn decode_explain(status: u16, body: &str) -> Result<ExplainReply, ApiError> {
    if !(200..300).contains(&status) {
        return Ok(ExplainReply::Status(status));
    }
    let body: ExplainBody = serde_json::from_str(body)?;
    Ok(ExplainReply::Summary(body.summary))
}

/// Event reporting that `request` ended without an answer from the service.
pub fn failure(request: &Request, error: ApiError) -> Event {
    match request {
        Request::LoadStores => Event::StoresFailed(error),
        Request::Predict { generation, .. } => Event::ForecastFailed {
            generation: *generation,
            error,
        },
        Request::Explain { generation, .. } => Event::ExplanationFailed {
            generation: *generation,
            error,
        },
    }
}

/// Runs one request against the service and turns the outcome into an event.
pub fn execute(api: &dyn ForecastApi, request: Request) -> Event {
    match request {
        Request::LoadStores => match api.stores() {
            Ok(response) => {
                info!("Loaded {} stores", response.stores.len());
                Event::StoresLoaded(response.stores)
            }
            Err(error) => {
                warn!("Failed to load stores: {}", error);
                Event::StoresFailed(error)
            }
        },
        Request::Predict { generation, body } => {
            info!("Requesting {}-period forecast for store {}", body.weeks, body.store);
            match api.predict(&body) {
                Ok(response) => {
                    if let Some(message) = &response.error {
                        warn!("Forecast backend reported: {}", message);
                    }
                    Event::ForecastSucceeded {
                        generation,
                        response,
                        received_at: Local::now(),
                    }
                }
                Err(error) => {
                    warn!("Forecast request failed: {}", error);
                    Event::ForecastFailed { generation, error }
                }
            }
        }
        Request::Explain { generation, body } => match api.explain(&body) {
            Ok(reply) => {
                if let ExplainReply::Status(status) = reply {
                    warn!("Explanation request returned status {}", status);
                }
                Event::ExplanationReceived { generation, reply }
            }
            Err(error) => {
                warn!("Explanation request failed: {}", error);
                Event::ExplanationFailed { generation, error }
            }
        },
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeApi;
    use super::*;

    #[test]
    fn test_decode_stores_tolerates_error_body() {
        let response = decode_stores(r#"{"error": "features.csv not loaded"}"#).unwrap();
        assert!(response.stores.is_empty());
        assert!(decode_stores("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_decode_accepts_float_encoded_integers() {
        let response = decode_stores(r#"{"stores": ["S1", 2633.0]}"#).unwrap();
        assert_eq!(response.stores.len(), 2);
        assert_eq!(response.stores[1].id(), &StoreId::Number(2633));

        let response = decode_predict(
            r#"{"timeline": [{"week": 1.0, "type": "forecast", "value": 10, "upper": 12, "lower": 8}],
                "store_info": {"store_number": 2633.0}}"#,
        )
        .unwrap();
        assert_eq!(response.timeline[0].week, Some(1));
        assert_eq!(response.store_info.unwrap().store_number, Some(StoreId::Number(2633)));
    }

    #[test]
    fn test_decode_predict_with_store_info() {
        let response = decode_predict(
            r#"{
                "timeline": [{"week": 1, "type": "actual", "value": 10}],
                "store_info": {"store_number": 2633, "city": "Ames", "county": "Story",
                               "avg_sales": 1200.5, "peak_month": "May 2023", "peak_value": 2000}
            }"#,
        )
        .unwrap();

        assert_eq!(response.timeline.len(), 1);
        let info = response.store_info.unwrap();
        assert_eq!(info.city.as_deref(), Some("Ames"));
        assert_eq!(info.peak_value, Some(2000.0));
    }

    #[test]
    fn test_decode_predict_missing_timeline() {
        let response = decode_predict(r#"{"error": "No data found for store 9"}"#).unwrap();
        assert!(response.timeline.is_empty());
        assert_eq!(response.error.as_deref(), Some("No data found for store 9"));
    }

    #[test]
    fn test_decode_explain_branches_on_status() {
        assert_eq!(
            decode_explain(200, r#"{"summary": "Up next month."}"#).unwrap(),
            ExplainReply::Summary(Some("Up next month.".to_string()))
        );
        assert_eq!(decode_explain(200, "{}").unwrap(), ExplainReply::Summary(None));
        assert_eq!(decode_explain(500, "not json").unwrap(), ExplainReply::Status(500));
        assert_eq!(decode_explain(400, "").unwrap(), ExplainReply::Status(400));
        assert!(decode_explain(200, "not json").is_err());
    }

    #[test]
    fn test_predict_request_wire_shape() {
        let body = serde_json::to_value(PredictRequest {
            store: StoreId::from(2633),
            weeks: 8,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"store": 2633, "weeks": 8}));
    }

    #[test]
    fn test_execute_maps_outcomes_to_events() {
        let api = FakeApi::new();

        match execute(&api, Request::LoadStores) {
            Event::StoresLoaded(stores) => assert_eq!(stores.len(), 2),
            other => panic!("unexpected event {:?}", other),
        }

        let request = Request::Predict {
            generation: 7,
            body: PredictRequest { store: StoreId::from("S1"), weeks: 4 },
        };
        match execute(&api, request) {
            Event::ForecastSucceeded { generation, response, .. } => {
                assert_eq!(generation, 7);
                assert_eq!(response.timeline.len(), 3);
            }
            other => panic!("unexpected event {:?}", other),
        }

        let mut broken = FakeApi::new();
        broken.predict_body = "Internal Server Error".to_string();
        let request = Request::Predict {
            generation: 8,
            body: PredictRequest { store: StoreId::from("S1"), weeks: 4 },
        };
        assert!(matches!(
            execute(&broken, request),
            Event::ForecastFailed { generation: 8, error: ApiError::Decode(_) }
        ));
    }

    #[test]
    fn test_failure_keeps_request_generation() {
        let io_error = || std::io::Error::new(std::io::ErrorKind::WouldBlock, "no threads left");

        assert!(matches!(
            failure(&Request::LoadStores, ApiError::from(io_error())),
            Event::StoresFailed(ApiError::Worker(_))
        ));

        let predict = Request::Predict {
            generation: 3,
            body: PredictRequest { store: StoreId::from("S1"), weeks: 4 },
        };
        assert!(matches!(
            failure(&predict, ApiError::from(io_error())),
            Event::ForecastFailed { generation: 3, error: ApiError::Worker(_) }
        ));

        let explain = Request::Explain {
            generation: 5,
            body: ExplainRequest { timeline: Vec::new() },
        };
        assert!(matches!(
            failure(&explain, ApiError::from(io_error())),
            Event::ExplanationFailed { generation: 5, .. }
        ));
    }
}
