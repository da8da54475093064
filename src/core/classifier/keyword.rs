//! Offline lexicon classifier.
//!
//! Counts emotion cue words in the text. A cue preceded by a negator
//! ("not happy") is skipped. Scores are each label's share of all matched
//! cues, so they sum to 1.0 when anything matched; text with no cues yields
//! no predictions.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::base::{ClassifierResult, LabelScore, TextClassifier};
use crate::core::emotion::EmotionLabel;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("word pattern is valid"));

const NEGATORS: &[&str] = &["not", "no", "never", "don't", "isn't", "wasn't", "aren't"];

const LEXICON: &[(EmotionLabel, &[&str])] = &[
    (
        EmotionLabel::Joy,
        &[
            "happy", "glad", "great", "wonderful", "amazing", "excited", "fantastic", "delighted",
            "awesome", "yay", "joy", "thrilled", "cheerful", "excellent",
        ],
    ),
    (
        EmotionLabel::Love,
        &["love", "adore", "darling", "sweetheart", "cherish", "affection", "beloved", "dear"],
    ),
    (
        EmotionLabel::Anger,
        &[
            "angry", "furious", "hate", "annoyed", "outraged", "mad", "rage", "livid", "irritated",
            "unacceptable",
        ],
    ),
    (
        EmotionLabel::Sadness,
        &[
            "sad", "unhappy", "miserable", "depressed", "lonely", "cry", "crying", "grief",
            "heartbroken", "sorry", "lost", "gloomy",
        ],
    ),
    (
        EmotionLabel::Fear,
        &[
            "afraid", "scared", "terrified", "fear", "anxious", "nervous", "worried", "panic",
            "frightened", "dread",
        ],
    ),
    (
        EmotionLabel::Surprise,
        &["wow", "surprised", "unbelievable", "incredible", "shocked", "unexpected", "whoa", "astonished"],
    ),
    (
        EmotionLabel::Disgust,
        &["disgusting", "gross", "revolting", "nasty", "yuck", "sickening", "vile", "repulsive"],
    ),
];

static CUE_INDEX: Lazy<HashMap<&'static str, EmotionLabel>> = Lazy::new(|| {
    LEXICON
        .iter()
        .flat_map(|(label, words)| words.iter().map(move |w| (*w, *label)))
        .collect()
});

/// Lexicon-based classifier that runs without network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous scoring used by [`TextClassifier::predict`].
    pub fn score(&self, text: &str) -> Vec<LabelScore> {
        let lowered = text.to_lowercase();
        let mut counts: HashMap<EmotionLabel, usize> = HashMap::new();
        let mut previous: Option<&str> = None;

        for word in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
            let negated = previous.is_some_and(|p| NEGATORS.contains(&p));
            if !negated {
                if let Some(label) = CUE_INDEX.get(word) {
                    *counts.entry(*label).or_default() += 1;
                }
            }
            previous = Some(word);
        }

        let total: usize = counts.values().sum();
        if total == 0 {
            return Vec::new();
        }

        // Iterate the lexicon rather than the map for a stable output order.
        LEXICON
            .iter()
            .filter_map(|(label, _)| {
                counts
                    .get(label)
                    .map(|n| LabelScore::new(label.as_str(), *n as f32 / total as f32))
            })
            .collect()
    }
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn predict(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        Ok(self.score(text))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
