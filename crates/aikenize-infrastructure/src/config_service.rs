//! Configuration loading.
//!
//! Reads `config.toml` and `secret.json` from the config directory and
//! resolves the Gemini API key.

use std::fs;
use std::path::Path;

use aikenize_core::config::{AppConfig, SecretConfig};
use aikenize_core::error::{AikenizeError, Result};

use crate::paths::AikenizePaths;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: AikenizePaths,
}

impl ConfigService {
    pub fn new(paths: AikenizePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AikenizePaths {
        &self.paths
    }

    /// Loads `config.toml`.
    ///
    /// A missing or blank file yields the defaults. A file that exists but
    /// cannot be parsed, or holds invalid model settings, is an error.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.paths.config_file()?;
        let Some(content) = read_optional(&path)? else {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        };

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            AikenizeError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.model.validate()?;
        Ok(config)
    }

    /// Loads `secret.json`; a missing file yields an empty config.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let path = self.paths.secret_file()?;
        let Some(content) = read_optional(&path)? else {
            return Ok(SecretConfig::default());
        };

        serde_json::from_str(&content).map_err(|e| {
            AikenizeError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolves the API key from the environment, then from secret.json.
    pub fn resolve_api_key(&self) -> Result<String> {
        let secrets = self.load_secrets()?;
        resolve_api_key_from(|name| std::env::var(name).ok(), &secrets).ok_or_else(|| {
            AikenizeError::config(format!(
                "Missing Gemini API key: set {} or add gemini.api_key to secret.json",
                API_KEY_ENV_VARS.join(" / ")
            ))
        })
    }
}

/// Picks the first non-blank key among the env vars and secret.json.
fn resolve_api_key_from(
    lookup: impl Fn(&str) -> Option<String>,
    secrets: &SecretConfig,
) -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .chain(secrets.gemini.iter().map(|gemini| gemini.api_key.clone()))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Reads `path`, treating a missing or blank file as absent.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
