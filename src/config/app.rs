//! Main application configuration
//!
//! This module defines the configuration structures for race-average,
//! including environment variable loading, TOML file loading and validation.

use crate::race::parser::parse_finish_time;
use crate::types::{RoundingMode, DEFAULT_RACE_START};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub race: RaceSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Race averaging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceSettings {
    /// Race start in `HH:MM XM, DAY n` form
    pub start: String,
    /// How exact `.5` averages are rounded
    pub rounding: RoundingMode,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "race-average".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            start: DEFAULT_RACE_START.to_string(),
            rounding: RoundingMode::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Values are not validated here; callers apply their own overrides and
    /// then run [`validate_config`] once.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Race settings
        if let Ok(start) = env::var("RACE_START") {
            self.race.start = start;
        }
        if let Ok(rounding) = env::var("ROUNDING_MODE") {
            self.race.rounding = rounding
                .parse()
                .map_err(|_| anyhow!("Invalid ROUNDING_MODE value: {}", rounding))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate race start
    parse_finish_time(&config.race.start)
        .map_err(|e| anyhow!("Invalid race start {:?}: {}", config.race.start, e))?;

    Ok(())
}
