use std::path::PathBuf;

use super::utils::{env_parse, env_string};
use super::{ConfigError, EngineConfig, ServerSettings};
use crate::core::classifier::ClassifierConfig;
use crate::core::emotion::ProfileTable;
use crate::core::tts::SynthesizerConfig;

/// Builds a configuration from environment variables and defaults.
///
/// `.env` values are already in the environment by the time this runs (see
/// `main`). The classifier provider is left empty when `CLASSIFIER_PROVIDER`
/// is unset so that the default can be chosen after YAML has been applied.
pub(super) fn load_from_env() -> Result<EngineConfig, ConfigError> {
    let defaults = EngineConfig::default();
    let classifier_defaults = ClassifierConfig::default();
    let synthesizer_defaults = SynthesizerConfig::default();

    let classifier = ClassifierConfig {
        provider: env_string("CLASSIFIER_PROVIDER").unwrap_or_default(),
        model: env_string("CLASSIFIER_MODEL").unwrap_or(classifier_defaults.model),
        endpoint: env_string("CLASSIFIER_ENDPOINT"),
        api_token: env_string("HF_API_TOKEN"),
        timeout_seconds: env_parse("CLASSIFIER_TIMEOUT_SECONDS")?
            .unwrap_or(classifier_defaults.timeout_seconds),
    };

    let synthesizer = SynthesizerConfig {
        provider: env_string("TTS_PROVIDER").unwrap_or(synthesizer_defaults.provider),
        endpoint: env_string("TTS_ENDPOINT"),
        api_key: env_string("OPENAI_API_KEY"),
        voice: env_string("TTS_VOICE"),
        model: env_string("TTS_MODEL"),
        timeout_seconds: env_parse("TTS_TIMEOUT_SECONDS")?
            .unwrap_or(synthesizer_defaults.timeout_seconds),
    };

    let server = ServerSettings {
        host: env_string("HOST").unwrap_or(defaults.server.host),
        port: env_parse("PORT")?.unwrap_or(defaults.server.port),
        static_dir: env_string("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.server.static_dir),
        cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS"),
    };

    Ok(EngineConfig {
        language: env_string("LANGUAGE").unwrap_or(defaults.language),
        classifier,
        synthesizer,
        synthesis_timeout_seconds: env_parse("SYNTHESIS_TIMEOUT_SECONDS")?
            .unwrap_or(defaults.synthesis_timeout_seconds),
        temp_dir: env_string("TEMP_DIR").map(PathBuf::from),
        server,
        profiles: ProfileTable::standard(),
    })
}
