//! Configuration for the Empathy Engine
//!
//! Sources, highest priority first: YAML file, environment variables, `.env`
//! values (loaded into the environment by `main`), defaults. The merged result
//! is validated before it is handed out.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Applying YAML overrides on top of the environment
//! - `validation`: Post-merge checks
//! - `utils`: Environment parsing helpers
//!
//! # Example
//! ```rust,no_run
//! use empathy_engine::config::EngineConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Environment variables only
//! let config = EngineConfig::from_env()?;
//!
//! // YAML file on top of the environment
//! let config = EngineConfig::from_file(Path::new("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use yaml::{
    ClassifierYaml, ProfileYaml, ProfilesYaml, ServerYaml, SynthesizerYaml, YamlConfig,
};

use crate::core::classifier::ClassifierConfig;
use crate::core::emotion::ProfileTable;
use crate::core::pipeline::{MAX_TEXT_CHARS, PipelineOptions};
use crate::core::tts::SynthesizerConfig;

/// Default seconds allowed for one base synthesis call.
pub const DEFAULT_SYNTHESIS_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP front end settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory produced audio is written to and served from
    pub static_dir: PathBuf,
    /// Comma-separated list of allowed origins, or `*`. Same-origin when `None`.
    pub cors_allowed_origins: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: PathBuf::from("static"),
            cors_allowed_origins: None,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Language code handed to the base synthesizer
    pub language: String,
    pub classifier: ClassifierConfig,
    pub synthesizer: SynthesizerConfig,
    pub synthesis_timeout_seconds: u64,
    /// Scratch directory for intermediate audio; system temp when `None`
    pub temp_dir: Option<PathBuf>,
    pub server: ServerSettings,
    pub profiles: ProfileTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            classifier: ClassifierConfig::default(),
            synthesizer: SynthesizerConfig::default(),
            synthesis_timeout_seconds: DEFAULT_SYNTHESIS_TIMEOUT_SECONDS,
            temp_dir: None,
            server: ServerSettings::default(),
            profiles: ProfileTable::standard(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or the merged
    /// configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = merge::merge_config(None)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file on top of the environment.
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, an environment
    /// variable is malformed, or validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Loads from `path` when given, otherwise from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Server address in the form `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_seconds)
    }

    /// Options for a [`crate::core::pipeline::Pipeline`] built from this configuration.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            language: self.language.clone(),
            synthesis_timeout: self.synthesis_timeout(),
            temp_dir: self.temp_dir.clone(),
            profiles: self.profiles,
            max_text_chars: MAX_TEXT_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotion::{AcousticProfile, EmotionLabel};
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    const ENV_KEYS: &[&str] = &[
        "LANGUAGE",
        "CLASSIFIER_PROVIDER",
        "CLASSIFIER_MODEL",
        "CLASSIFIER_ENDPOINT",
        "CLASSIFIER_TIMEOUT_SECONDS",
        "HF_API_TOKEN",
        "TTS_PROVIDER",
        "TTS_ENDPOINT",
        "TTS_TIMEOUT_SECONDS",
        "OPENAI_API_KEY",
        "TTS_VOICE",
        "TTS_MODEL",
        "SYNTHESIS_TIMEOUT_SECONDS",
        "TEMP_DIR",
        "HOST",
        "PORT",
        "STATIC_DIR",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn cleanup_env_vars() {
        for key in ENV_KEYS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = EngineConfig::from_env().unwrap();

        assert_eq!(config.language, "en");
        assert_eq!(config.classifier.provider, "keyword");
        assert_eq!(config.synthesizer.provider, "google");
        assert_eq!(config.synthesis_timeout(), Duration::from_secs(30));
        assert_eq!(config.temp_dir, None);
        assert_eq!(config.address(), "0.0.0.0:5000");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(config.profiles, ProfileTable::standard());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_values() {
        cleanup_env_vars();
        unsafe {
            env::set_var("LANGUAGE", "de");
            env::set_var("TTS_PROVIDER", "openai");
            env::set_var("OPENAI_API_KEY", "sk-env");
            env::set_var("TTS_VOICE", "nova");
            env::set_var("SYNTHESIS_TIMEOUT_SECONDS", "12");
            env::set_var("TEMP_DIR", "/tmp/empathy-scratch");
            env::set_var("PORT", "8081");
        }

        let config = EngineConfig::from_env().unwrap();

        assert_eq!(config.language, "de");
        assert_eq!(config.synthesizer.provider, "openai");
        assert_eq!(config.synthesizer.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.synthesizer.voice.as_deref(), Some("nova"));
        assert_eq!(config.synthesis_timeout_seconds, 12);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp/empathy-scratch")));
        assert_eq!(config.server.port, 8081);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_hf_token_selects_huggingface() {
        cleanup_env_vars();
        unsafe {
            env::set_var("HF_API_TOKEN", "hf_env");
        }

        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.classifier.provider, "huggingface");
        assert_eq!(config.classifier.api_token.as_deref(), Some("hf_env"));

        unsafe {
            env::set_var("CLASSIFIER_PROVIDER", "keyword");
        }
        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.classifier.provider, "keyword");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        cleanup_env_vars();
        unsafe {
            env::set_var("PORT", "seventy");
        }

        let err = EngineConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_zero_timeout_rejected() {
        cleanup_env_vars();
        unsafe {
            env::set_var("SYNTHESIS_TIMEOUT_SECONDS", "0");
        }

        assert!(EngineConfig::from_env().is_err());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_only() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
language: "es"
server:
  host: "127.0.0.1"
  port: 8080
  static_dir: "public"
classifier:
  provider: "huggingface"
  endpoint: "http://localhost:9000/models"
synthesizer:
  provider: "openai"
  api_key: "sk-yaml"
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = EngineConfig::from_file(&config_path).unwrap();

        assert_eq!(config.language, "es");
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.server.static_dir, PathBuf::from("public"));
        assert_eq!(config.classifier.provider, "huggingface");
        assert_eq!(
            config.classifier.endpoint.as_deref(),
            Some("http://localhost:9000/models")
        );
        assert_eq!(config.synthesizer.api_key.as_deref(), Some("sk-yaml"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "server:\n  port: 9090\nsynthesizer:\n  voice: \"shimmer\"\n",
        )
        .unwrap();

        unsafe {
            env::set_var("PORT", "7000");
            env::set_var("HOST", "10.0.0.1");
            env::set_var("TTS_VOICE", "alloy");
        }

        let config = EngineConfig::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.synthesizer.voice.as_deref(), Some("shimmer"));
        // ENV value survives where YAML is silent
        assert_eq!(config.server.host, "10.0.0.1");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_profile_overrides() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "profiles:\n  anger:\n    pitch_shift_semitones: 3\n    volume_gain_db: 6.0\n",
        )
        .unwrap();

        let config = EngineConfig::from_file(&config_path).unwrap();

        assert_eq!(
            config.profiles.profile_for(EmotionLabel::Anger),
            AcousticProfile::new(false, 3, 6.0)
        );
        assert_eq!(
            config.profiles.profile_for(EmotionLabel::Sadness),
            ProfileTable::standard().sadness
        );
        assert_eq!(config.pipeline_options().profiles, config.profiles);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_profile_out_of_range() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "profiles:\n  joy:\n    pitch_shift_semitones: 40\n",
        )
        .unwrap();

        let err = EngineConfig::from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("joy"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let config_path = PathBuf::from("/nonexistent/config.yaml");
        let result = EngineConfig::from_file(&config_path);

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_load_without_path_uses_env() {
        cleanup_env_vars();
        unsafe {
            env::set_var("STATIC_DIR", "/srv/audio");
        }

        let config = EngineConfig::load(None).unwrap();
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/audio"));

        cleanup_env_vars();
    }

    #[test]
    fn test_pipeline_options() {
        let config = EngineConfig {
            language: "it".into(),
            synthesis_timeout_seconds: 5,
            temp_dir: Some(PathBuf::from("/tmp/x")),
            ..Default::default()
        };
        let options = config.pipeline_options();
        assert_eq!(options.language, "it");
        assert_eq!(options.synthesis_timeout, Duration::from_secs(5));
        assert_eq!(options.temp_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(options.max_text_chars, MAX_TEXT_CHARS);
    }
}
