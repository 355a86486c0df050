//! Process configuration loaded from environment variables.
//!
//! Unset (or blank) variables fall back to defaults; set-but-invalid values are
//! errors so misconfiguration is reported at startup instead of silently
//! replaced.

use core::fmt::Display;
use core::str::FromStr;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use pantry_core::FailurePolicy;
use pantry_inventory::RecipeRefreshPolicy;
use pantry_observability::{LogFormat, LogSettings};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key} ({value:?}): {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the OpenAI-compatible chat completions API.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl core::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PantryConfig {
    pub bind: SocketAddr,
    /// `None` when no API key is configured; recipe suggestions are disabled.
    pub openai: Option<OpenAiConfig>,
    pub recipe_refresh: RecipeRefreshPolicy,
    pub failure_policy: FailurePolicy,
    pub log: LogSettings,
}

impl PantryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai = match var("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAiConfig {
                api_key: api_key.trim().to_string(),
                base_url: var("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                timeout: Duration::from_secs(try_load(
                    &var,
                    "OPENAI_TIMEOUT_SECS",
                    DEFAULT_OPENAI_TIMEOUT_SECS,
                )?),
            }),
            None => {
                info!("OPENAI_API_KEY not set; recipe suggestions disabled");
                None
            }
        };

        let default_bind: SocketAddr = ([0, 0, 0, 0], 8080).into();

        Ok(Self {
            bind: try_load(&var, "PANTRY_BIND", default_bind)?,
            openai,
            recipe_refresh: try_load(&var, "PANTRY_RECIPE_REFRESH", RecipeRefreshPolicy::default())?,
            failure_policy: try_load(&var, "PANTRY_FAILURE_POLICY", FailurePolicy::default())?,
            log: LogSettings {
                format: try_load(&var, "PANTRY_LOG_FORMAT", LogFormat::default())?,
                ..LogSettings::default()
            },
        })
    }
}

fn try_load<T>(var: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + core::fmt::Debug,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!(key, default = ?default, "config value not set, using default");
            Ok(default)
        }
    }
}
