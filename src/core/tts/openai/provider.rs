//! OpenAI speech backend.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/audio/speech`
//! - Models: tts-1, tts-1-hd, gpt-4o-mini-tts
//! - Output: mp3 at 24 kHz
//! - Speed: 0.25 to 4.0; the slow delivery uses 0.75

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::core::tts::base::{
    SpeechSynthesizer, SynthesisError, SynthesisResult, SynthesizedAudio, SynthesizerConfig,
};

/// Default API host.
pub const OPENAI_API_URL: &str = "https://api.openai.com";

/// Path of the speech endpoint below the host.
pub const OPENAI_SPEECH_PATH: &str = "/v1/audio/speech";

pub const DEFAULT_OPENAI_MODEL: &str = "tts-1";
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Speed used when the profile asks for slow delivery.
pub const SLOW_SPEED: f32 = 0.75;

/// Speech backend for OpenAI's Audio Speech API.
pub struct OpenAISpeech {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    voice: String,
}

impl OpenAISpeech {
    pub fn new(config: &SynthesizerConfig) -> SynthesisResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SynthesisError::InvalidConfiguration(
                    "OpenAI synthesis requires an API key (OPENAI_API_KEY)".to_string(),
                )
            })?;

        let base = config
            .endpoint
            .as_deref()
            .unwrap_or(OPENAI_API_URL)
            .trim_end_matches('/');
        let url = format!("{base}{OPENAI_SPEECH_PATH}");
        url::Url::parse(&url).map_err(|e| {
            SynthesisError::InvalidConfiguration(format!("Invalid OpenAI URL '{url}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                SynthesisError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url,
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            voice: config
                .voice
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_VOICE.to_string()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    /// JSON body for one request.
    pub fn request_body(&self, text: &str, slow: bool) -> serde_json::Value {
        json!({
            "model": self.model,
            "input": text,
            "voice": self.voice,
            "response_format": "mp3",
            "speed": if slow { SLOW_SPEED } else { 1.0 },
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        slow: bool,
    ) -> SynthesisResult<SynthesizedAudio> {
        // The API infers language from the text itself.
        debug!(language, model = %self.model, voice = %self.voice, "OpenAI speech request");

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(text, slow))
            .send()
            .await
            .map_err(|e| SynthesisError::Unavailable(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Unavailable(format!("HTTP {status}: {body}")));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Unavailable(format!("Failed to read audio: {e}")))?;
        Ok(SynthesizedAudio::mp3(data))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
