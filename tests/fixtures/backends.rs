//! Scripted backends
//!
//! In-process stand-ins for the classifier and the base synthesizer. Both
//! count calls, and the synthesizer records every `(text, slow)` it receives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use empathy_engine::core::classifier::{
    ClassifierError, ClassifierResult, LabelScore, TextClassifier,
};
use empathy_engine::core::tts::{SpeechSynthesizer, SynthesisError, SynthesisResult, SynthesizedAudio};

use super::audio_fixtures::{BASE_SECOND, TONE_HZ, tone_wav};

// =============================================================================
// Classifier
// =============================================================================

pub struct ScriptedClassifier {
    response: Result<Vec<LabelScore>, String>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    /// Always predicts `label` with `score`
    pub fn returning(label: &str, score: f32) -> Self {
        Self {
            response: Ok(vec![LabelScore::new(label, score)]),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails as if the backend were unreachable
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for ScriptedClassifier {
    async fn predict(&self, _text: &str) -> ClassifierResult<Vec<LabelScore>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(ClassifierError::Unavailable)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

// =============================================================================
// Synthesizer
// =============================================================================

/// Returns a WAV tone for every request.
///
/// The tone frequency can be chosen per text so that outputs of concurrent
/// requests can be told apart.
pub struct ToneSynthesizer {
    frames: usize,
    default_tone: f32,
    tones: HashMap<String, f32>,
    delay: Option<Duration>,
    failure: Option<String>,
    payload: Option<SynthesizedAudio>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, bool)>>,
}

impl ToneSynthesizer {
    pub fn new() -> Self {
        Self {
            frames: BASE_SECOND,
            default_tone: TONE_HZ,
            tones: HashMap::new(),
            delay: None,
            failure: None,
            payload: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tone_for(mut self, text: &str, frequency: f32) -> Self {
        self.tones.insert(text.to_string(), frequency);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Returns `audio` verbatim instead of a tone
    pub fn with_payload(mut self, audio: SynthesizedAudio) -> Self {
        self.payload = Some(audio);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every `(text, slow)` pair received so far
    pub fn requests(&self) -> Vec<(String, bool)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for ToneSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _language: &str,
        slow: bool,
    ) -> SynthesisResult<SynthesizedAudio> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((text.to_string(), slow));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(SynthesisError::Unavailable(message.clone()));
        }
        if let Some(audio) = &self.payload {
            return Ok(audio.clone());
        }

        let frequency = self.tones.get(text).copied().unwrap_or(self.default_tone);
        Ok(SynthesizedAudio::wav(tone_wav(self.frames, frequency)))
    }

    fn name(&self) -> &'static str {
        "tone"
    }
}
