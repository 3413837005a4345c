//! `config.yaml` loading and CLI/config value resolution.
//!
//! The file is optional. When it is missing the tool warns and carries on
//! with built-in defaults; any other read or parse problem is an error.

use crate::types::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROMPT};
use serde::{Deserialize, Deserializer};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Settings read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Model used when `--model` is not given.
    #[serde(default = "default_model", deserialize_with = "model_or_default")]
    pub default_vlm_model: String,
    /// Ollama server address used when `--host`/`OLLAMA_HOST` are not set.
    #[serde(default)]
    pub ollama_host: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// A null or blank `default_vlm_model` counts as missing.
fn model_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let model = Option::<String>::deserialize(deserializer)?;
    Ok(model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(default_model))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_vlm_model: default_model(),
            ollama_host: None,
        }
    }
}

impl AppConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

/// Load configuration from `path`, falling back to defaults if it does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let config = AppConfig::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), model = %config.default_vlm_model, "loaded config file");

    Ok(config)
}

/// Explicit model wins over the configured default.
pub fn resolve_model(cli_model: Option<&str>, config: &AppConfig) -> String {
    cli_model
        .filter(|m| !m.is_empty())
        .or(Some(config.default_vlm_model.as_str()).filter(|m| !m.is_empty()))
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}

/// Explicit prompt wins over the generic description prompt.
pub fn resolve_prompt(cli_prompt: Option<&str>) -> String {
    cli_prompt
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PROMPT)
        .to_string()
}

/// Pick the server address: CLI/env first, then `ollama_host`, then the default.
pub fn resolve_endpoint(cli_host: Option<&str>, config: &AppConfig) -> String {
    let host = cli_host
        .filter(|h| !h.is_empty())
        .or(config.ollama_host.as_deref())
        .unwrap_or(DEFAULT_ENDPOINT);
    normalize_host(host)
}

/// Accept `host:port` as well as full URLs, the way `OLLAMA_HOST` is usually set.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
