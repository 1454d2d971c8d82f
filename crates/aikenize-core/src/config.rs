//! Application configuration models.
//!
//! `AppConfig` comes from `config.toml`; `SecretConfig` from `secret.json`.
//! Both are plain data; loading lives in the infrastructure crate.

use serde::{Deserialize, Serialize};

use crate::error::{AikenizeError, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Inclusive range of sampling temperatures the Gemini API accepts.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Settings of the remote model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Low by default so repeated submissions of the same snippet converge.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Rejects settings the API would refuse or that make every call fail.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AikenizeError::config("model.name must not be empty"));
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(AikenizeError::config(format!(
                "model.temperature must be between {} and {}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                self.temperature
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AikenizeError::config("model.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// History behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Show the example record when nothing (or garbage) is persisted.
    #[serde(default = "default_true")]
    pub seed_on_empty: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            seed_on_empty: true,
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
}

fn default_model_name() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}
