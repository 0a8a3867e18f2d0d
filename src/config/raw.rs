use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use ::config::Map;
use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_base_class, default_error_class, default_fallback_id, default_hide_after,
    default_hide_policy, default_primary_id, default_queue_bound, default_success_class,
};
use super::env::{env_duration, env_parse, env_string};
use super::{AppSettings, Config, HidePolicy, HumantimeDuration, NotifySettings};

/// File first, then nested `NOTICE__SECTION__KEY` variables taken from `vars`.
pub(super) fn load(
    path: impl AsRef<Path>,
    vars: &Map<String, String>,
) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("NOTICE")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        )
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) notify: RawNotify,
    #[serde(default)]
    pub(super) app: RawApp,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawNotify {
    #[serde(default = "default_hide_after")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) hide_after: Duration,
    #[serde(default = "default_hide_policy")]
    pub(super) hide_policy: String,
    #[serde(default = "default_base_class")]
    pub(super) base_class: String,
    #[serde(default = "default_success_class")]
    pub(super) success_class: String,
    #[serde(default = "default_error_class")]
    pub(super) error_class: String,
    #[serde(default = "default_primary_id")]
    pub(super) primary_id: String,
    #[serde(default = "default_fallback_id")]
    pub(super) fallback_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
}

impl Default for RawNotify {
    fn default() -> Self {
        Self {
            hide_after: default_hide_after(),
            hide_policy: default_hide_policy(),
            base_class: default_base_class(),
            success_class: default_success_class(),
            error_class: default_error_class(),
            primary_id: default_primary_id(),
            fallback_id: default_fallback_id(),
        }
    }
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            queue_bound: default_queue_bound(),
        }
    }
}

impl RawConfig {
    /// Flat `NOTICE_*` variables, applied over the file and nested layer.
    pub(super) fn apply_env_overrides(
        &mut self,
        vars: &Map<String, String>,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(hide_after) = env_duration(vars, "NOTICE_HIDE_AFTER")? {
            self.notify.hide_after = hide_after;
        }
        if let Some(policy) = env_string(vars, "NOTICE_HIDE_POLICY") {
            self.notify.hide_policy = policy;
        }
        if let Some(class) = env_string(vars, "NOTICE_BASE_CLASS") {
            self.notify.base_class = class;
        }
        if let Some(class) = env_string(vars, "NOTICE_SUCCESS_CLASS") {
            self.notify.success_class = class;
        }
        if let Some(class) = env_string(vars, "NOTICE_ERROR_CLASS") {
            self.notify.error_class = class;
        }
        if let Some(id) = env_string(vars, "NOTICE_PRIMARY_ID") {
            self.notify.primary_id = id;
        }
        if let Some(id) = env_string(vars, "NOTICE_FALLBACK_ID") {
            self.notify.fallback_id = id;
        }
        if let Some(bound) = env_parse::<usize>(vars, "NOTICE_QUEUE_BOUND")? {
            self.app.queue_bound = bound;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let RawConfig { notify, app } = self;

        if notify.hide_after.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "notify.hide_after",
                message: "delay must be greater than zero".to_string(),
            }
            .into());
        }
        let hide_policy = HidePolicy::from_str(&notify.hide_policy).map_err(|message| {
            ConfigError::InvalidField {
                field: "notify.hide_policy",
                message,
            }
        })?;

        validate_class("notify.base_class", &notify.base_class)?;
        validate_class("notify.success_class", &notify.success_class)?;
        validate_class("notify.error_class", &notify.error_class)?;
        if notify.success_class == notify.error_class {
            return Err(ConfigError::InvalidField {
                field: "notify.error_class",
                message: "success and error variants must differ".to_string(),
            }
            .into());
        }

        validate_id("notify.primary_id", &notify.primary_id)?;
        validate_id("notify.fallback_id", &notify.fallback_id)?;
        if notify.primary_id == notify.fallback_id {
            return Err(ConfigError::InvalidField {
                field: "notify.fallback_id",
                message: "fallback identifier must differ from the primary one".to_string(),
            }
            .into());
        }

        if app.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "app.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            notify: NotifySettings {
                hide_after: notify.hide_after,
                hide_policy,
                base_class: notify.base_class,
                success_class: notify.success_class,
                error_class: notify.error_class,
                primary_id: notify.primary_id,
                fallback_id: notify.fallback_id,
            },
            app: AppSettings {
                queue_bound: app.queue_bound,
            },
        })
    }
}

fn validate_class(field: &'static str, class: &str) -> std::result::Result<(), ConfigError> {
    if class.is_empty() || class.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidField {
            field,
            message: format!("`{class}` is not a single class name"),
        });
    }
    Ok(())
}

fn validate_id(field: &'static str, id: &str) -> std::result::Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            field,
            message: "identifier cannot be empty".to_string(),
        });
    }
    Ok(())
}
