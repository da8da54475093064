//! Base synthesis: backend call plus decoding into a [`RawAudioBuffer`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::base::{SpeechSynthesizer, SynthesisError, SynthesisResult, SynthesizedAudio};
use crate::core::audio::{RawAudioBuffer, decode_bytes, decode_file};

/// Wraps a [`SpeechSynthesizer`] and turns its output into PCM.
///
/// No retries happen here; a failed call fails the request.
#[derive(Clone)]
pub struct BaseSynthesizer {
    inner: Arc<dyn SpeechSynthesizer>,
}

impl BaseSynthesizer {
    pub fn new(inner: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { inner }
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.name()
    }

    /// Calls the backend and rejects empty payloads.
    pub async fn fetch(
        &self,
        text: &str,
        language: &str,
        use_slow_rate: bool,
    ) -> SynthesisResult<SynthesizedAudio> {
        debug!(
            backend = self.inner.name(),
            language,
            slow = use_slow_rate,
            chars = text.chars().count(),
            "Requesting base synthesis"
        );
        let audio = self.inner.synthesize(text, language, use_slow_rate).await?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio(format!(
                "{} returned a zero-length payload",
                self.inner.name()
            )));
        }
        debug!(
            backend = self.inner.name(),
            bytes = audio.data.len(),
            extension = audio.extension,
            "Base synthesis received"
        );
        Ok(audio)
    }

    /// Synthesizes and decodes in memory.
    ///
    /// For callers that do not need the payload on disk. [`Pipeline`] stages
    /// it in a scratch file with [`fetch`](Self::fetch) and
    /// [`decode_base_file`] instead. Decoding runs on the blocking pool.
    ///
    /// [`Pipeline`]: crate::core::pipeline::Pipeline
    pub async fn synthesize_base(
        &self,
        text: &str,
        language: &str,
        use_slow_rate: bool,
    ) -> SynthesisResult<RawAudioBuffer> {
        let audio = self.fetch(text, language, use_slow_rate).await?;
        let extension = audio.extension;
        let decoded =
            tokio::task::spawn_blocking(move || decode_bytes(audio.data.to_vec(), Some(extension)))
                .await
                .map_err(|e| SynthesisError::Unavailable(format!("Decode task failed: {e}")))??;
        ensure_frames(decoded)
    }
}

impl std::fmt::Debug for BaseSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseSynthesizer")
            .field("backend", &self.inner.name())
            .finish()
    }
}

/// Decodes base audio previously written to `path`.
pub fn decode_base_file(path: &Path) -> SynthesisResult<RawAudioBuffer> {
    ensure_frames(decode_file(path)?)
}

fn ensure_frames(buffer: RawAudioBuffer) -> SynthesisResult<RawAudioBuffer> {
    if buffer.frames() == 0 {
        return Err(SynthesisError::EmptyAudio(
            "synthesized audio decoded to zero frames".to_string(),
        ));
    }
    Ok(buffer)
}
