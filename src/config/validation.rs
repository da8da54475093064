use url::Url;

use super::{ConfigError, EngineConfig};

/// Runs every check against a merged configuration.
pub(super) fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    validate_timeout("synthesis_timeout_seconds", config.synthesis_timeout_seconds)?;
    validate_timeout(
        "classifier.timeout_seconds",
        config.classifier.timeout_seconds,
    )?;
    validate_timeout(
        "synthesizer.timeout_seconds",
        config.synthesizer.timeout_seconds,
    )?;

    validate_endpoint("classifier.endpoint", config.classifier.endpoint.as_deref())?;
    validate_endpoint("synthesizer.endpoint", config.synthesizer.endpoint.as_deref())?;

    if config.language.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "language".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    validate_profiles(config)
}

fn validate_timeout(key: &str, seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn validate_endpoint(key: &str, endpoint: Option<&str>) -> Result<(), ConfigError> {
    let Some(endpoint) = endpoint else {
        return Ok(());
    };
    let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{endpoint}' is not a valid URL: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{endpoint}' must use http or https"),
        });
    }
    Ok(())
}

fn validate_profiles(config: &EngineConfig) -> Result<(), ConfigError> {
    let issues = config.profiles.validate();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(issues.join("; ")))
    }
}
