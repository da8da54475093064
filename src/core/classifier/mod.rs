//! Text classifier adapters.
//!
//! A [`TextClassifier`] backend produces raw `(label, score)` predictions;
//! [`EmotionClassifier`] turns them into a single normalized
//! [`ClassificationResult`](crate::core::emotion::ClassificationResult) and
//! absorbs backend failures.
//!
//! Backends:
//! - `huggingface`: hosted inference API (network, optional token)
//! - `keyword`: offline lexicon

pub mod adapter;
pub mod base;
pub mod huggingface;
pub mod keyword;

use std::sync::Arc;

pub use adapter::{EmotionClassifier, select_top};
pub use base::{
    ClassifierConfig, ClassifierError, ClassifierResult, DEFAULT_CLASSIFIER_TIMEOUT_SECS,
    DEFAULT_EMOTION_MODEL, LabelScore, TextClassifier,
};
pub use huggingface::{HUGGINGFACE_INFERENCE_URL, HuggingFaceClassifier};
pub use keyword::KeywordClassifier;

/// Builds a classifier backend by name.
///
/// Names are case-insensitive; `hf` and `hugging-face` are accepted aliases.
pub fn create_classifier(config: &ClassifierConfig) -> ClassifierResult<Arc<dyn TextClassifier>> {
    match config.provider.to_lowercase().as_str() {
        "huggingface" | "hugging-face" | "hugging_face" | "hf" => {
            Ok(Arc::new(HuggingFaceClassifier::new(config)?))
        }
        "keyword" | "keywords" | "lexicon" => Ok(Arc::new(KeywordClassifier::new())),
        other => Err(ClassifierError::InvalidConfiguration(format!(
            "Unsupported classifier provider: {other}. Supported providers: huggingface, keyword"
        ))),
    }
}

/// Lists the canonical backend names.
pub fn supported_classifiers() -> &'static [&'static str] {
    &["huggingface", "keyword"]
}
