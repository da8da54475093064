//! Normalizes backend predictions into a [`ClassificationResult`].

use std::sync::Arc;

use tracing::{debug, warn};

use super::base::{LabelScore, TextClassifier};
use crate::core::emotion::{ClassificationResult, EmotionLabel};

/// Wraps a [`TextClassifier`] and guarantees a result for every call.
///
/// Classification is best-effort: backend failures degrade to
/// `(neutral, 0.0)` instead of failing the request.
#[derive(Clone)]
pub struct EmotionClassifier {
    inner: Arc<dyn TextClassifier>,
}

impl EmotionClassifier {
    pub fn new(inner: Arc<dyn TextClassifier>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &'static str {
        self.inner.name()
    }

    /// Classifies `text` into the closed emotion set.
    ///
    /// Callers must not pass empty text; the pipeline rejects it upstream.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        match self.inner.predict(text).await {
            Ok(predictions) => {
                let result = select_top(&predictions);
                debug!(
                    backend = self.inner.name(),
                    predictions = predictions.len(),
                    label = %result.label(),
                    confidence = result.confidence(),
                    "Classified text"
                );
                result
            }
            Err(e) => {
                warn!(
                    backend = self.inner.name(),
                    error = %e,
                    "Emotion classification unavailable, falling back to neutral"
                );
                ClassificationResult::neutral()
            }
        }
    }
}

impl std::fmt::Debug for EmotionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionClassifier")
            .field("backend", &self.inner.name())
            .finish()
    }
}

/// Picks the highest-scoring prediction and normalizes it.
///
/// Non-finite scores rank lowest. An unrecognized label keeps its score but
/// maps to neutral.
pub fn select_top(predictions: &[LabelScore]) -> ClassificationResult {
    let sanitized = |score: f32| if score.is_finite() { score } else { f32::MIN };

    predictions
        .iter()
        .max_by(|a, b| sanitized(a.score).total_cmp(&sanitized(b.score)))
        .map(|top| ClassificationResult::new(EmotionLabel::normalize(&top.label), top.score))
        .unwrap_or_else(ClassificationResult::neutral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::base::{ClassifierError, ClassifierResult};
    use async_trait::async_trait;

    struct Fixed(ClassifierResult<Vec<LabelScore>>);

    #[async_trait]
    impl TextClassifier for Fixed {
        async fn predict(&self, _text: &str) -> ClassifierResult<Vec<LabelScore>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(ClassifierError::Unavailable(e.to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn adapter(result: ClassifierResult<Vec<LabelScore>>) -> EmotionClassifier {
        EmotionClassifier::new(Arc::new(Fixed(result)))
    }

    #[test]
    fn test_select_top_picks_highest_score() {
        let predictions = vec![
            LabelScore::new("sadness", 0.1),
            LabelScore::new("joy", 0.8),
            LabelScore::new("anger", 0.1),
        ];
        let result = select_top(&predictions);
        assert_eq!(result.label(), EmotionLabel::Joy);
        assert_eq!(result.confidence(), 0.8);
    }

    #[test]
    fn test_select_top_empty_is_neutral() {
        assert_eq!(select_top(&[]), ClassificationResult::neutral());
    }

    #[test]
    fn test_select_top_ignores_nan_scores() {
        let predictions = vec![LabelScore::new("anger", f32::NAN), LabelScore::new("fear", 0.4)];
        let result = select_top(&predictions);
        assert_eq!(result.label(), EmotionLabel::Fear);
    }

    #[test]
    fn test_select_top_normalizes_case() {
        let result = select_top(&[LabelScore::new("LOVE", 0.7)]);
        assert_eq!(result.label(), EmotionLabel::Love);
    }

    #[test]
    fn test_select_top_unknown_label_keeps_score() {
        let result = select_top(&[LabelScore::new("optimism", 0.66)]);
        assert_eq!(result.label(), EmotionLabel::Neutral);
        assert_eq!(result.confidence(), 0.66);
    }

    #[tokio::test]
    async fn test_classify_success() {
        let classifier = adapter(Ok(vec![LabelScore::new("joy", 0.95)]));
        let result = classifier.classify("I am so happy today!").await;
        assert_eq!(result.label(), EmotionLabel::Joy);
        assert_eq!(result.confidence(), 0.95);
    }

    #[tokio::test]
    async fn test_classify_failure_falls_back_to_neutral() {
        let classifier = adapter(Err(ClassifierError::Unavailable("down".into())));
        let result = classifier.classify("anything").await;
        assert_eq!(result, ClassificationResult::neutral());
    }

    #[tokio::test]
    async fn test_classify_clamps_out_of_range_score() {
        let classifier = adapter(Ok(vec![LabelScore::new("fear", 3.5)]));
        let result = classifier.classify("boo").await;
        assert_eq!(result.confidence(), 1.0);
    }
}
