use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// Every field is optional; anything left out falls back to the environment
/// or to defaults.
///
/// # Example YAML structure
/// ```yaml
/// language: "en"
/// synthesis_timeout_seconds: 30
/// temp_dir: "/var/tmp/empathy"
///
/// server:
///   host: "0.0.0.0"
///   port: 5000
///   static_dir: "static"
///   cors_allowed_origins: "https://example.com"
///
/// classifier:
///   provider: "huggingface"
///   model: "bhadresh-savani/distilbert-base-uncased-emotion"
///   api_token: "hf_..."
///   timeout_seconds: 10
///
/// synthesizer:
///   provider: "openai"
///   api_key: "sk-..."
///   voice: "nova"
///
/// profiles:
///   anger:
///     pitch_shift_semitones: 2
///     volume_gain_db: 5.0
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub language: Option<String>,
    pub synthesis_timeout_seconds: Option<u64>,
    pub temp_dir: Option<String>,
    pub server: Option<ServerYaml>,
    pub classifier: Option<ClassifierYaml>,
    pub synthesizer: Option<SynthesizerYaml>,
    pub profiles: Option<ProfilesYaml>,
}

/// HTTP front end settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<String>,
    /// Comma-separated origins, or `*`
    pub cors_allowed_origins: Option<String>,
}

/// Classifier backend settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ClassifierYaml {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Synthesizer backend settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SynthesizerYaml {
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub voice: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Per-label profile overrides
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilesYaml {
    pub joy: Option<ProfileYaml>,
    pub love: Option<ProfileYaml>,
    pub anger: Option<ProfileYaml>,
    pub sadness: Option<ProfileYaml>,
    pub fear: Option<ProfileYaml>,
    pub surprise: Option<ProfileYaml>,
    pub disgust: Option<ProfileYaml>,
    pub neutral: Option<ProfileYaml>,
}

/// One profile row; unset fields keep the built-in value
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct ProfileYaml {
    pub use_slow_rate: Option<bool>,
    pub pitch_shift_semitones: Option<i32>,
    pub volume_gain_db: Option<f32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&contents)
    }

    /// Parse configuration from YAML text
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
language: "fr"
synthesis_timeout_seconds: 45
temp_dir: "/tmp/empathy"
server:
  host: "127.0.0.1"
  port: 8080
  static_dir: "public"
  cors_allowed_origins: "*"
classifier:
  provider: "huggingface"
  model: "j-hartmann/emotion-english-distilroberta-base"
  endpoint: "http://localhost:9000/models"
  api_token: "hf_test"
  timeout_seconds: 5
synthesizer:
  provider: "openai"
  api_key: "sk-test"
  voice: "nova"
  model: "tts-1-hd"
profiles:
  joy:
    pitch_shift_semitones: 4
  sadness:
    use_slow_rate: false
    volume_gain_db: -6.0
"#;
        let config = YamlConfig::from_str(yaml).unwrap();

        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.synthesis_timeout_seconds, Some(45));

        let server = config.server.unwrap();
        assert_eq!(server.port, Some(8080));
        assert_eq!(server.cors_allowed_origins.as_deref(), Some("*"));

        let classifier = config.classifier.unwrap();
        assert_eq!(classifier.provider.as_deref(), Some("huggingface"));
        assert_eq!(classifier.timeout_seconds, Some(5));

        let synthesizer = config.synthesizer.unwrap();
        assert_eq!(synthesizer.voice.as_deref(), Some("nova"));

        let profiles = config.profiles.unwrap();
        assert_eq!(profiles.joy.unwrap().pitch_shift_semitones, Some(4));
        assert_eq!(profiles.joy.unwrap().volume_gain_db, None);
        assert_eq!(profiles.sadness.unwrap().use_slow_rate, Some(false));
        assert!(profiles.anger.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config = YamlConfig::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.profiles.is_none());
    }

    #[test]
    fn test_yaml_config_unknown_profile_label() {
        let yaml = "profiles:\n  happy:\n    pitch_shift_semitones: 2\n";
        assert!(matches!(
            YamlConfig::from_str(yaml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  port: 7000\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.server.unwrap().port, Some(7000));
    }

    #[test]
    fn test_from_file_not_found() {
        let result = YamlConfig::from_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "server: [unclosed").unwrap();

        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }
}
