//! OpenAI speech backend module.
//!
//! # Example
//!
//! ```rust,ignore
//! use empathy_engine::core::tts::{OpenAISpeech, SpeechSynthesizer, SynthesizerConfig};
//!
//! let config = SynthesizerConfig {
//!     provider: "openai".to_string(),
//!     api_key: Some("sk-...".to_string()),
//!     voice: Some("nova".to_string()),
//!     ..Default::default()
//! };
//! let tts = OpenAISpeech::new(&config)?;
//! let audio = tts.synthesize("Hello, world!", "en", false).await?;
//! ```

mod provider;

pub use provider::{
    DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_VOICE, OPENAI_API_URL, OPENAI_SPEECH_PATH, OpenAISpeech,
    SLOW_SPEED,
};
