//! Conversion settings.
//!
//! Settings come from defaults, the process environment, or a `.env` file.
//! They are read once when the factory registry is built.

use serde::{Deserialize, Serialize};

pub const ENV_DAY_FIRST: &str = "ALPHA_DAY_FIRST";
pub const ENV_NORMALIZE_PATCH_DATES: &str = "ALPHA_NORMALIZE_PATCH_DATES";
pub const ENV_CAST_ARGS: &str = "ALPHA_CAST_ARGS";
pub const ENV_USE_MODEL_CLASS_FACTORY: &str = "ALPHA_USE_MODEL_CLASS_FACTORY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorySettings {
    /// Reinterpret parsed timestamps with day and month swapped.
    pub day_first: bool,
    /// Turn ISO-8601 strings inside patch values into datetimes.
    pub normalize_patch_dates: bool,
    /// Cast scalar request arguments to their declared types.
    pub cast_args: bool,
    /// Rebuild record-shaped request arguments through the model class factory.
    pub use_model_class_factory: bool,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            day_first: false,
            normalize_patch_dates: true,
            cast_args: true,
            use_model_class_factory: true,
        }
    }
}

impl FactorySettings {
    /// Reads settings from the process environment, keeping defaults for
    /// unset or unparsable variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads `.env` (if present) before reading the environment.
    pub fn from_dotenv() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| match lookup(key) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(key, value = %raw, "Ignoring unparsable boolean setting");
                default
            }),
            None => default,
        };
        Self {
            day_first: flag(ENV_DAY_FIRST, defaults.day_first),
            normalize_patch_dates: flag(ENV_NORMALIZE_PATCH_DATES, defaults.normalize_patch_dates),
            cast_args: flag(ENV_CAST_ARGS, defaults.cast_args),
            use_model_class_factory: flag(
                ENV_USE_MODEL_CLASS_FACTORY,
                defaults.use_model_class_factory,
            ),
        }
    }

    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            day_first: self.day_first,
            normalize_patch_dates: self.normalize_patch_dates,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Options handed to every type factory call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    pub day_first: bool,
    pub normalize_patch_dates: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        FactorySettings::default().conversion_options()
    }
}
