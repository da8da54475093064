//! HuggingFace Inference API text classifier.
//!
//! # API Reference
//!
//! - Endpoint: `POST {endpoint}/{model}`
//! - Body: `{"inputs": "<text>"}`
//! - Response: `[[{"label": "joy", "score": 0.98}, ...]]` (one list per
//!   input); some deployments return the flat inner list instead
//! - Errors: `{"error": "..."}`, e.g. while a cold model is loading (503)

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::base::{ClassifierConfig, ClassifierError, ClassifierResult, LabelScore, TextClassifier};

/// Serverless inference base URL; the model id is appended.
pub const HUGGINGFACE_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Classifier backed by a hosted sequence-classification model.
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    url: String,
    api_token: Option<String>,
}

impl HuggingFaceClassifier {
    /// Creates a new classifier from configuration.
    pub fn new(config: &ClassifierConfig) -> ClassifierResult<Self> {
        let model = config.model.trim();
        if model.is_empty() {
            return Err(ClassifierError::InvalidConfiguration(
                "HuggingFace model id must not be empty".to_string(),
            ));
        }

        let base = config
            .endpoint
            .as_deref()
            .unwrap_or(HUGGINGFACE_INFERENCE_URL)
            .trim_end_matches('/');
        let url = format!("{base}/{model}");
        url::Url::parse(&url).map_err(|e| {
            ClassifierError::InvalidConfiguration(format!("Invalid classifier URL '{url}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                ClassifierError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url,
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Full inference URL for the configured model.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    async fn predict(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        let mut request = self.client.post(&self.url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Unavailable(format!("HTTP {status}: {body}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(format!("Body is not JSON: {e}")))?;

        let predictions = parse_predictions(payload)?;
        debug!(url = %self.url, count = predictions.len(), "HuggingFace predictions received");
        Ok(predictions)
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}

/// Extracts label scores from an inference response body.
///
/// Accepts the nested per-input shape (first input only) and the flat shape.
pub fn parse_predictions(payload: Value) -> ClassifierResult<Vec<LabelScore>> {
    if let Some(message) = payload.get("error").and_then(Value::as_str) {
        return Err(ClassifierError::Unavailable(message.to_string()));
    }

    let Value::Array(items) = payload else {
        return Err(ClassifierError::InvalidResponse(
            "Expected a JSON array of predictions".to_string(),
        ));
    };

    let flat = match items.first() {
        Some(Value::Array(_)) => match items.into_iter().next() {
            Some(first) => first,
            None => Value::Array(Vec::new()),
        },
        _ => Value::Array(items),
    };

    serde_json::from_value(flat)
        .map_err(|e| ClassifierError::InvalidResponse(format!("Malformed prediction list: {e}")))
}
