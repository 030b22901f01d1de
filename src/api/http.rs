// src/api/http.rs
use reqwest::blocking::Client;
use tracing::debug;

use super::{
    decode_explain, decode_predict, decode_stores, ApiError, ExplainReply, ExplainRequest,
    ForecastApi, PredictRequest, PredictResponse, StoresResponse,
};

/// Blocking client for the forecast service. Calls are made from worker
/// threads, never from the UI thread.
#[derive(Debug, Clone)]
pub struct HttpForecastApi {
    client: Client,
    base_url: String,
}

impl HttpForecastApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ForecastApi for HttpForecastApi {
    fn stores(&self) -> Result<StoresResponse, ApiError> {
        let url = self.endpoint("/api/stores");
        let response = self.client.get(&url).send()?;
        debug!("GET {} -> {}", url, response.status());
        decode_stores(&response.text()?)
    }

    fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        let url = self.endpoint("/api/predict");
        let response = self.client.post(&url).json(request).send()?;
        debug!("POST {} -> {}", url, response.status());
        decode_predict(&response.text()?)
    }

    fn explain(&self, request: &ExplainRequest) -> Result<ExplainReply, ApiError> {
        let url = self.endpoint("/api/explain_forecast");
        let response = self.client.post(&url).json(request).send()?;
        let status = response.status().as_u16();
        debug!("POST {} -> {}", url, status);
        decode_explain(status, &response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let api = HttpForecastApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.endpoint("/api/stores"), "http://localhost:8000/api/stores");
    }
}
