use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default HuggingFace model: six-way emotion head (sadness, joy, love,
/// anger, fear, surprise) fine-tuned from DistilBERT.
pub const DEFAULT_EMOTION_MODEL: &str = "bhadresh-savani/distilbert-base-uncased-emotion";

/// Default per-call timeout for remote classifiers.
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;

/// Errors raised by text-classification backends.
///
/// None of these abort a synthesis request: the adapter logs them and falls
/// back to a neutral classification.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Backend unreachable, timed out, or answered with an error status
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
    /// Backend answered but the payload could not be understood
    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),
    /// Backend could not be constructed from the configuration
    #[error("Invalid classifier configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for classifier backends.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// One raw prediction as reported by a backend.
///
/// Labels are kept verbatim; normalization into the closed emotion set
/// happens in the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Configuration for constructing a classifier backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Backend name (`huggingface`, `keyword`)
    pub provider: String,
    /// Model identifier for remote backends
    pub model: String,
    /// Base URL override; the model id is appended to it
    pub endpoint: Option<String>,
    /// Bearer token for remote backends
    pub api_token: Option<String>,
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: "keyword".to_string(),
            model: DEFAULT_EMOTION_MODEL.to_string(),
            endpoint: None,
            api_token: None,
            timeout_seconds: DEFAULT_CLASSIFIER_TIMEOUT_SECS,
        }
    }
}

/// An external text-classification capability.
///
/// Implementations must be shareable across concurrent requests: they are
/// built once and held behind an `Arc` without interior mutation.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Returns the backend's predictions for `text`, in any order.
    ///
    /// An empty vector means the backend had no opinion.
    async fn predict(&self, text: &str) -> ClassifierResult<Vec<LabelScore>>;

    /// Short backend identifier for logs.
    fn name(&self) -> &'static str;
}
