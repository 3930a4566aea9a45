//! Fetch adapters: exactly one network round trip per call.
//!
//! Decode path shared by every adapter: parse the body as JSON, reject a body
//! carrying a non-empty `error` field as a backend-domain failure (the backend
//! signals business errors inside 2xx JSON), then check the transport status,
//! then deserialize into the typed view model and validate it. No retries and
//! no request timeout: a console action fires once and the user re-triggers it
//! by hand.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{
    Diagnostics, ModelMetrics, OverviewStats, Prediction, PredictionRequest, ReingestReceipt,
};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

/// Optional query filter for the overview endpoint. Only the keys that are
/// set are serialized.
#[derive(Debug, Clone, Default)]
pub struct OverviewFilter {
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl OverviewFilter {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.category.is_none()
            && self.priority.is_none()
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(start) = &self.start {
            pairs.push(("start", start.as_str()));
        }
        if let Some(end) = &self.end {
            pairs.push(("end", end.as_str()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.as_str()));
        }
        if let Some(priority) = &self.priority {
            pairs.push(("priority", priority.as_str()));
        }
        pairs
    }
}

#[derive(Deserialize)]
struct TrainResponse {
    metrics: ModelMetrics,
}

#[derive(Deserialize)]
struct ReingestResponse {
    diagnostics: ReingestReceipt,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn overview(&self, filter: &OverviewFilter) -> Result<OverviewStats, FetchError> {
        let mut request = self.http.get(self.url("/stats/overview"));
        if !filter.is_empty() {
            request = request.query(&filter.query());
        }
        let response = request.send().await?;
        let stats: OverviewStats = decode_body(response).await?;
        stats.validate().map_err(FetchError::Invalid)?;
        Ok(stats)
    }

    pub async fn diagnostics(&self) -> Result<Diagnostics, FetchError> {
        let response = self.http.get(self.url("/diagnostics")).send().await?;
        decode_body(response).await
    }

    /// A non-success status here is the defined empty state (no model trained
    /// yet), never an error.
    pub async fn model_metrics(&self) -> Result<Option<ModelMetrics>, FetchError> {
        let response = self.http.get(self.url("/model/metrics")).send().await?;
        if !response.status().is_success() {
            debug!("model metrics not available yet: {}", response.status());
            return Ok(None);
        }
        let metrics: ModelMetrics = decode_body(response).await?;
        metrics.validate().map_err(FetchError::Invalid)?;
        Ok(Some(metrics))
    }

    pub async fn train(&self) -> Result<ModelMetrics, FetchError> {
        let response = self.http.post(self.url("/train")).send().await?;
        let envelope: TrainResponse = decode_body(response).await?;
        envelope.metrics.validate().map_err(FetchError::Invalid)?;
        Ok(envelope.metrics)
    }

    pub async fn reingest(&self) -> Result<ReingestReceipt, FetchError> {
        let response = self.http.post(self.url("/reingest")).send().await?;
        let envelope: ReingestResponse = decode_body(response).await?;
        Ok(envelope.diagnostics)
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, FetchError> {
        let response = self
            .http
            .post(self.url("/predict"))
            .json(request)
            .send()
            .await?;
        let prediction: Prediction = decode_body(response).await?;
        prediction.validate().map_err(FetchError::Invalid)?;
        Ok(prediction)
    }
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    let value: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(err) => {
            // A non-JSON error page is reported by its status; a non-JSON 2xx
            // body is a decode failure.
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            return Err(FetchError::Decode(err.to_string()));
        }
    };

    // The embedded error field wins over the status code so its message
    // survives verbatim.
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        if !message.is_empty() {
            return Err(FetchError::Backend(message.to_string()));
        }
    }

    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    serde_json::from_value(value).map_err(|err| FetchError::Decode(err.to_string()))
}
