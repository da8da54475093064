use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::audio::DecodeError;

/// Default per-call HTTP timeout for synthesis backends.
pub const DEFAULT_SYNTHESIS_HTTP_TIMEOUT_SECS: u64 = 30;

/// Errors raised by the base speech synthesizer.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Backend unreachable or answered with an error
    #[error("Speech synthesis unavailable: {0}")]
    Unavailable(String),
    /// Backend answered without any audio
    #[error("Speech synthesis returned no audio: {0}")]
    EmptyAudio(String),
    /// Backend audio could not be decoded
    #[error("Failed to decode synthesized audio: {0}")]
    Decode(#[from] DecodeError),
    /// Backend could not be constructed from the configuration
    #[error("Invalid synthesizer configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Encoded audio exactly as a backend returned it.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Bytes,
    /// File extension understood by the decoder (`mp3`, `wav`)
    pub extension: &'static str,
}

impl SynthesizedAudio {
    pub fn mp3(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            extension: "mp3",
        }
    }

    pub fn wav(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            extension: "wav",
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Configuration for constructing a synthesis backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Backend name (`google`, `openai`)
    pub provider: String,
    /// Base URL override
    pub endpoint: Option<String>,
    /// API key for authenticated backends
    pub api_key: Option<String>,
    /// Voice id for backends that have voices
    pub voice: Option<String>,
    /// Model id for backends that have models
    pub model: Option<String>,
    /// Per-call HTTP timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            endpoint: None,
            api_key: None,
            voice: None,
            model: None,
            timeout_seconds: DEFAULT_SYNTHESIS_HTTP_TIMEOUT_SECS,
        }
    }
}

/// An external text-to-speech capability.
///
/// Rate is the only prosody control: `slow` selects a slower delivery. Pitch
/// and volume are applied afterwards by the transform engine.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` spoken in `language`.
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        slow: bool,
    ) -> SynthesisResult<SynthesizedAudio>;

    /// Short backend identifier for logs.
    fn name(&self) -> &'static str;
}
