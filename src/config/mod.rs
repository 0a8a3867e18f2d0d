use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::Result;
use crate::error::Error as NoticeError;
use crate::types::{Category, ClassList};

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub notify: NotifySettings,
    pub app: AppSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
    pub hide_after: Duration,
    pub hide_policy: HidePolicy,
    pub base_class: String,
    pub success_class: String,
    pub error_class: String,
    pub primary_id: String,
    pub fallback_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub queue_bound: usize,
}

/// What a new `display` does to hides scheduled by earlier calls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HidePolicy {
    /// Cancel the pending hide; only the latest message governs visibility.
    #[default]
    Replace,
    /// Leave earlier hides armed; each one hides the target when it fires.
    Overlap,
}

impl HidePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Overlap => "overlap",
        }
    }
}

impl Display for HidePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HidePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "cancel" => Ok(Self::Replace),
            "overlap" | "legacy" => Ok(Self::Overlap),
            other => Err(format!("unknown hide policy: {other}")),
        }
    }
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            hide_after: defaults::default_hide_after(),
            hide_policy: HidePolicy::default(),
            base_class: defaults::default_base_class(),
            success_class: defaults::default_success_class(),
            error_class: defaults::default_error_class(),
            primary_id: defaults::default_primary_id(),
            fallback_id: defaults::default_fallback_id(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            queue_bound: defaults::default_queue_bound(),
        }
    }
}

impl NotifySettings {
    /// Class assignment for `category`: the base class plus exactly one variant.
    #[must_use]
    pub fn classes_for(&self, category: Category) -> ClassList {
        let variant = match category {
            Category::Success => &self.success_class,
            Category::Error => &self.error_class,
        };
        ClassList {
            base: self.base_class.clone(),
            variant: variant.clone(),
            category,
        }
    }
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let vars = env::process_vars()?;
        Self::from_file_and_vars(path, &vars)
    }

    /// [`from_env_and_file`](Self::from_env_and_file) with an explicit set of
    /// environment variables instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env_and_file`](Self::from_env_and_file).
    pub fn from_file_and_vars(
        path: impl AsRef<Path>,
        vars: &::config::Map<String, String>,
    ) -> Result<Self> {
        let mut raw = raw::load(path, vars).map_err(NoticeError::from)?;
        raw.apply_env_overrides(vars).map_err(NoticeError::from)?;
        raw.validate_and_build()
    }
}
