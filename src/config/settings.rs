//! Application settings loading from config.toml
//!
//! Every field has a default, so the bot runs without a config file at all. A file
//! that exists but cannot be parsed is an error rather than a silent fallback.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Menu ingestion service settings
    pub ingestion: IngestionSettings,
    /// Output settings for stats and logs
    pub display: DisplaySettings,
}

/// Settings for the generative-AI menu parser
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IngestionSettings {
    /// Model used for menu extraction
    pub model: String,
    /// Base URL of the Generative Language API
    pub api_base: String,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Settings controlling how much is shown in replies
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Number of meals shown by `/trending`
    pub top_meals: usize,
    /// Default number of entries shown by `/logs`
    pub log_limit: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            top_meals: 5,
            log_limit: 15,
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults if the file is missing.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `MEAL_BUDDY_CONFIG`, or from ./config.toml when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path =
        std::env::var("MEAL_BUDDY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings(path)
}
