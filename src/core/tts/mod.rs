//! Base speech synthesizer adapters.
//!
//! A [`SpeechSynthesizer`] backend turns `(text, language, slow)` into encoded
//! audio; [`BaseSynthesizer`] validates and decodes it for the transform
//! engine.

pub mod adapter;
mod base;
pub mod google;
pub mod openai;

use std::collections::HashMap;
use std::sync::Arc;

pub use adapter::{BaseSynthesizer, decode_base_file};
pub use base::{
    DEFAULT_SYNTHESIS_HTTP_TIMEOUT_SECS, SpeechSynthesizer, SynthesisError, SynthesisResult,
    SynthesizedAudio, SynthesizerConfig,
};
pub use google::{GOOGLE_TRANSLATE_URL, GOOGLE_TTS_MAX_CHARS, GoogleTranslateTts};
pub use openai::{OPENAI_API_URL, OpenAISpeech};

/// Factory function to create a synthesis backend.
///
/// # Supported Providers
///
/// - `"google"` or `"gtts"` or `"google-translate"` - Google Translate web speech (no key)
/// - `"openai"` - OpenAI Audio Speech API (requires an API key)
pub fn create_synthesizer(config: &SynthesizerConfig) -> SynthesisResult<Arc<dyn SpeechSynthesizer>> {
    match config.provider.to_lowercase().as_str() {
        "google" | "gtts" | "google-translate" | "google_translate" => {
            Ok(Arc::new(GoogleTranslateTts::new(config)?))
        }
        "openai" | "open-ai" => Ok(Arc::new(OpenAISpeech::new(config)?)),
        other => Err(SynthesisError::InvalidConfiguration(format!(
            "Unsupported TTS provider: {other}. Supported providers: google, openai"
        ))),
    }
}

/// Returns a map of provider names to their default base URLs.
pub fn get_synthesizer_urls() -> HashMap<String, String> {
    let mut urls = HashMap::new();
    urls.insert("google".to_string(), GOOGLE_TRANSLATE_URL.to_string());
    urls.insert("openai".to_string(), OPENAI_API_URL.to_string());
    urls
}
