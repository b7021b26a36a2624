//! Server configuration.
//!
//! Settings come from an optional TOML file (default under
//! `~/.config/modelarena/config.toml`); a missing file means defaults. The
//! API key never lives in the file, only in the environment.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::{default_catalog, ModelEntry};
use crate::error::ArenaError;

/// Environment variables checked for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["MODELARENA_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Address the server binds to.
    pub host: String,
    pub port: u16,
    /// Base URL of the OpenAI-compatible host serving every model.
    pub base_url: String,
    /// Model used for subjective judging; defaults to the first catalog entry.
    pub judge_model: Option<String>,
    /// Sampling temperature for the compared models.
    pub temperature: f32,
    /// Response length cap for the compared models.
    pub max_tokens: u32,
    /// Per-request timeout, seconds.
    pub timeout_seconds: Option<u64>,
    /// The comparison set with its cost table.
    pub models: Vec<ModelEntry>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "https://api.openai.com/v1".to_string(),
            judge_model: None,
            temperature: 0.7,
            max_tokens: 1024,
            timeout_seconds: Some(60),
            models: default_catalog(),
        }
    }
}

/// Loads configuration from `path_override`, the default location, or
/// defaults when no file exists.
pub fn load_config(path_override: Option<PathBuf>) -> Result<ArenaConfig, ArenaError> {
    let Some(path) = path_override.or_else(default_config_file) else {
        return Ok(ArenaConfig::default());
    };
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ArenaConfig::default()),
        Err(err) => Err(err.into()),
    }
}

/// Resolves the API key from the environment.
pub fn api_key() -> Result<String, ArenaError> {
    for var in API_KEY_VARS {
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
    }
    Err(ArenaError::AuthError(format!(
        "No API key found; set one of {}",
        API_KEY_VARS.join(", ")
    )))
}

fn default_config_file() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("modelarena").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_models_and_sane_bounds() {
        let config = ArenaConfig::default();
        assert!(!config.models.is_empty());
        assert!(config.temperature >= 0.0);
        assert!(config.max_tokens > 0);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ArenaConfig = toml::from_str(
            r#"
            port = 9000

            [[models]]
            id = "my-model"
            label = "My Model"
            cost_per_1k = 0.002
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.models[0].id, "my-model");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.port, ArenaConfig::default().port);
    }
}
