//! Core emotion types for the empathy engine.
//!
//! The classifier emits free-form labels; everything downstream works on the
//! closed [`EmotionLabel`] set. Labels outside the set are never an error:
//! they collapse to [`EmotionLabel::Neutral`].

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Emotion Label Enum
// =============================================================================

/// The closed set of emotions that drive acoustic parameter selection.
///
/// The variants match the label vocabulary of the default text classifier
/// (`bhadresh-savani/distilbert-base-uncased-emotion`) plus `neutral`.
///
/// # Example
///
/// ```rust
/// use empathy_engine::core::emotion::EmotionLabel;
///
/// assert_eq!(EmotionLabel::parse("joy"), EmotionLabel::Joy);
/// assert_eq!(EmotionLabel::parse("optimism"), EmotionLabel::Neutral);
/// assert_eq!(EmotionLabel::Sadness.to_string(), "sadness");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    /// Happiness, delight
    Joy,
    /// Affection, warmth
    Love,
    /// Anger, frustration
    Anger,
    /// Sadness, grief
    Sadness,
    /// Fear, anxiety
    Fear,
    /// Surprise, astonishment
    Surprise,
    /// Disgust, revulsion
    Disgust,
    /// No particular emotion; also the fallback for unknown labels
    #[default]
    Neutral,
}

impl EmotionLabel {
    /// Returns every label in the closed set.
    #[inline]
    pub const fn all() -> &'static [EmotionLabel] {
        &[
            EmotionLabel::Joy,
            EmotionLabel::Love,
            EmotionLabel::Anger,
            EmotionLabel::Sadness,
            EmotionLabel::Fear,
            EmotionLabel::Surprise,
            EmotionLabel::Disgust,
            EmotionLabel::Neutral,
        ]
    }

    /// Returns the label as the lowercase string used by classifiers.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joy => "joy",
            EmotionLabel::Love => "love",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Neutral => "neutral",
        }
    }

    /// Looks up a label by its exact canonical spelling.
    ///
    /// Matching is case-sensitive: `"Joy"` is not in the set. Callers that
    /// hold raw classifier output should normalize it first (see
    /// [`EmotionLabel::normalize`]).
    ///
    /// # Example
    ///
    /// ```rust
    /// use empathy_engine::core::emotion::EmotionLabel;
    ///
    /// assert_eq!(EmotionLabel::from_str("fear"), Some(EmotionLabel::Fear));
    /// assert_eq!(EmotionLabel::from_str("FEAR"), None);
    /// assert_eq!(EmotionLabel::from_str(""), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "joy" => Some(EmotionLabel::Joy),
            "love" => Some(EmotionLabel::Love),
            "anger" => Some(EmotionLabel::Anger),
            "sadness" => Some(EmotionLabel::Sadness),
            "fear" => Some(EmotionLabel::Fear),
            "surprise" => Some(EmotionLabel::Surprise),
            "disgust" => Some(EmotionLabel::Disgust),
            "neutral" => Some(EmotionLabel::Neutral),
            _ => None,
        }
    }

    /// Total variant of [`EmotionLabel::from_str`]: unknown labels become
    /// [`EmotionLabel::Neutral`].
    #[inline]
    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Trims and lowercases raw classifier output before parsing it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use empathy_engine::core::emotion::EmotionLabel;
    ///
    /// assert_eq!(EmotionLabel::normalize("  JOY "), EmotionLabel::Joy);
    /// assert_eq!(EmotionLabel::normalize("LABEL_3"), EmotionLabel::Neutral);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw.trim().to_lowercase().as_str())
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Classification Result
// =============================================================================

/// The normalized output of the classifier adapter.
///
/// Produced once per input text and never mutated. `confidence` is always in
/// `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    label: EmotionLabel,
    confidence: f32,
}

impl ClassificationResult {
    /// Creates a result, clamping the confidence into `[0.0, 1.0]`.
    ///
    /// Non-finite confidences (NaN, infinities from a misbehaving backend)
    /// become `0.0`.
    pub fn new(label: EmotionLabel, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { label, confidence }
    }

    /// The `(neutral, 0.0)` result used whenever classification is unavailable.
    #[inline]
    pub const fn neutral() -> Self {
        Self {
            label: EmotionLabel::Neutral,
            confidence: 0.0,
        }
    }

    /// The detected emotion.
    #[inline]
    pub const fn label(&self) -> EmotionLabel {
        self.label
    }

    /// The classifier's confidence in `[0.0, 1.0]`.
    #[inline]
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::neutral()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (confidence={:.2})",
            self.label.as_str().to_uppercase(),
            self.confidence
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
