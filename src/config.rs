//! Runtime configuration.
//!
//! Values come from a JSON document or from `AGENTDECK_*` environment
//! variables. Every field has a default, so an empty document is valid.
//!
//! Recognized environment variables:
//! - `AGENTDECK_LISTING_KEY`: collection key expected in listing payloads
//! - `AGENTDECK_CONTEXT_WINDOW`: characters of context around extracted metrics
//! - `AGENTDECK_DEFAULT_MODEL`: model identifier used by the agent catalog
//! - `AGENTDECK_LOG_LEVEL`: fallback filter when `RUST_LOG` is unset
//! - `AGENTDECK_TRANSLATION_ENABLED`: `true`/`false`, remote translation fallback
//! - `AGENTDECK_TRANSLATION_ENDPOINT`: remote translation endpoint
//! - `AGENTDECK_TRANSLATION_TIMEOUT_MS`: remote translation timeout

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Key under which listing payloads carry their records
    #[serde(default = "default_listing_key")]
    pub listing_key: String,

    /// Characters of context captured on each side of an extracted metric
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Model identifier assigned to catalog agents
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    /// Whether phrasebook misses may fall back to the remote service
    #[serde(default = "default_translation_enabled")]
    pub enabled: bool,

    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_translation_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_listing_key() -> String {
    "airbnbs".to_string()
}

fn default_context_window() -> usize {
    20
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_translation_enabled() -> bool {
    true
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_translation_timeout_ms() -> u64 {
    5_000
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_translation_enabled(),
            endpoint: default_translation_endpoint(),
            timeout_ms: default_translation_timeout_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_key: default_listing_key(),
            context_window: default_context_window(),
            default_model: default_model(),
            log_level: default_log_level(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    /// Build a config from an explicit variable map, layered over the defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(key) = vars.get("AGENTDECK_LISTING_KEY") {
            config.listing_key = key.clone();
        }
        if let Some(raw) = vars.get("AGENTDECK_CONTEXT_WINDOW") {
            config.context_window = parse_var("AGENTDECK_CONTEXT_WINDOW", raw)?;
        }
        if let Some(model) = vars.get("AGENTDECK_DEFAULT_MODEL") {
            config.default_model = model.clone();
        }
        if let Some(level) = vars.get("AGENTDECK_LOG_LEVEL") {
            config.log_level = level.clone();
        }
        if let Some(raw) = vars.get("AGENTDECK_TRANSLATION_ENABLED") {
            config.translation.enabled = parse_var("AGENTDECK_TRANSLATION_ENABLED", raw)?;
        }
        if let Some(endpoint) = vars.get("AGENTDECK_TRANSLATION_ENDPOINT") {
            config.translation.endpoint = endpoint.clone();
        }
        if let Some(raw) = vars.get("AGENTDECK_TRANSLATION_TIMEOUT_MS") {
            config.translation.timeout_ms = parse_var("AGENTDECK_TRANSLATION_TIMEOUT_MS", raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.listing_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "listing_key".to_string(),
                value: self.listing_key.clone(),
            });
        }
        if self.translation.enabled && self.translation.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "translation.timeout_ms".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}
