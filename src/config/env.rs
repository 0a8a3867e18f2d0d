use std::time::Duration;

use ::config::Map;
use humantime::parse_duration;

use crate::error::ConfigError;

const PREFIX: &str = "NOTICE";

/// Snapshot of the process environment.
///
/// Variables that are not valid unicode are skipped, unless they belong to
/// this program, in which case they are reported.
pub(super) fn process_vars() -> std::result::Result<Map<String, String>, ConfigError> {
    let mut vars = Map::new();
    for (key, value) in std::env::vars_os() {
        let Ok(key) = key.into_string() else {
            continue;
        };
        match value.into_string() {
            Ok(value) => {
                vars.insert(key, value);
            }
            Err(_) if key.starts_with(PREFIX) => {
                return Err(ConfigError::Other(format!(
                    "{key}: environment variable was not valid unicode"
                )));
            }
            Err(_) => {}
        }
    }
    Ok(vars)
}

pub(super) fn env_string(vars: &Map<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(super) fn env_parse<T>(
    vars: &Map<String, String>,
    key: &'static str,
) -> std::result::Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_string(vars, key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|err| ConfigError::InvalidField {
                    field: key,
                    message: err.to_string(),
                })
        })
        .transpose()
}

pub(super) fn env_duration(
    vars: &Map<String, String>,
    key: &'static str,
) -> std::result::Result<Option<Duration>, ConfigError> {
    env_string(vars, key)
        .map(|value| {
            parse_duration(&value).map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            })
        })
        .transpose()
}
