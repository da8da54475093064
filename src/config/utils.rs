use std::env;
use std::str::FromStr;

use super::ConfigError;

/// Reads an environment variable, treating blank values as unset.
pub(super) fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an environment variable.
///
/// Unset or blank yields `Ok(None)`; a value that does not parse is an error
/// naming the variable.
pub(super) fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("'{raw}': {e}"),
            }),
        None => Ok(None),
    }
}

/// Blank strings in YAML count as unset.
pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
