use std::path::PathBuf;

use super::utils::non_empty;
use super::yaml::{ProfileYaml, ProfilesYaml, YamlConfig};
use super::{ConfigError, EngineConfig, env};
use crate::core::emotion::{AcousticProfile, EmotionLabel, ProfileTable};

/// Provider chosen when none is configured and a HuggingFace token exists.
const TOKEN_DEFAULT_CLASSIFIER: &str = "huggingface";
/// Provider chosen when none is configured and there is no token.
const OFFLINE_DEFAULT_CLASSIFIER: &str = "keyword";

/// Merges environment configuration (base) with YAML overrides.
///
/// Any field present in YAML wins; everything else keeps the environment
/// value or default.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<EngineConfig, ConfigError> {
    let mut config = env::load_from_env()?;

    if let Some(yaml) = yaml {
        apply_yaml(&mut config, yaml);
    }

    resolve_classifier_provider(&mut config);
    Ok(config)
}

fn apply_yaml(config: &mut EngineConfig, yaml: YamlConfig) {
    if let Some(language) = non_empty(yaml.language) {
        config.language = language;
    }
    if let Some(timeout) = yaml.synthesis_timeout_seconds {
        config.synthesis_timeout_seconds = timeout;
    }
    if let Some(dir) = non_empty(yaml.temp_dir) {
        config.temp_dir = Some(PathBuf::from(dir));
    }

    if let Some(server) = yaml.server {
        if let Some(host) = non_empty(server.host) {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(dir) = non_empty(server.static_dir) {
            config.server.static_dir = PathBuf::from(dir);
        }
        if let Some(origins) = non_empty(server.cors_allowed_origins) {
            config.server.cors_allowed_origins = Some(origins);
        }
    }

    if let Some(classifier) = yaml.classifier {
        let target = &mut config.classifier;
        if let Some(provider) = non_empty(classifier.provider) {
            target.provider = provider;
        }
        if let Some(model) = non_empty(classifier.model) {
            target.model = model;
        }
        if let Some(endpoint) = non_empty(classifier.endpoint) {
            target.endpoint = Some(endpoint);
        }
        if let Some(token) = non_empty(classifier.api_token) {
            target.api_token = Some(token);
        }
        if let Some(timeout) = classifier.timeout_seconds {
            target.timeout_seconds = timeout;
        }
    }

    if let Some(synthesizer) = yaml.synthesizer {
        let target = &mut config.synthesizer;
        if let Some(provider) = non_empty(synthesizer.provider) {
            target.provider = provider;
        }
        if let Some(endpoint) = non_empty(synthesizer.endpoint) {
            target.endpoint = Some(endpoint);
        }
        if let Some(key) = non_empty(synthesizer.api_key) {
            target.api_key = Some(key);
        }
        if let Some(voice) = non_empty(synthesizer.voice) {
            target.voice = Some(voice);
        }
        if let Some(model) = non_empty(synthesizer.model) {
            target.model = Some(model);
        }
        if let Some(timeout) = synthesizer.timeout_seconds {
            target.timeout_seconds = timeout;
        }
    }

    if let Some(profiles) = yaml.profiles {
        apply_profiles(&mut config.profiles, &profiles);
    }
}

fn apply_profiles(table: &mut ProfileTable, overrides: &ProfilesYaml) {
    let rows = [
        (EmotionLabel::Joy, overrides.joy),
        (EmotionLabel::Love, overrides.love),
        (EmotionLabel::Anger, overrides.anger),
        (EmotionLabel::Sadness, overrides.sadness),
        (EmotionLabel::Fear, overrides.fear),
        (EmotionLabel::Surprise, overrides.surprise),
        (EmotionLabel::Disgust, overrides.disgust),
        (EmotionLabel::Neutral, overrides.neutral),
    ];
    for (label, row) in rows {
        if let Some(row) = row {
            table.set(label, overlay_profile(table.profile_for(label), row));
        }
    }
}

fn overlay_profile(base: AcousticProfile, row: ProfileYaml) -> AcousticProfile {
    AcousticProfile::new(
        row.use_slow_rate.unwrap_or(base.use_slow_rate),
        row.pitch_shift_semitones
            .unwrap_or(base.pitch_shift_semitones),
        row.volume_gain_db.unwrap_or(base.volume_gain_db),
    )
}

fn resolve_classifier_provider(config: &mut EngineConfig) {
    if config.classifier.provider.trim().is_empty() {
        config.classifier.provider = if config.classifier.api_token.is_some() {
            TOKEN_DEFAULT_CLASSIFIER
        } else {
            OFFLINE_DEFAULT_CLASSIFIER
        }
        .to_string();
    }
}
