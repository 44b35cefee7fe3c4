//! Main application configuration
//!
//! This module defines the top-level configuration for the balancer, including
//! environment variable overrides, TOML file loading, and validation.

use crate::config::{BalanceConfig, RatingConfig, SynergyLearningConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub balance: BalanceConfig,
    pub rating: RatingConfig,
    pub learning: SynergyLearningConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scrim-balancer".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SCRIM_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("SCRIM_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(top_k) = env::var("SCRIM_TOP_K") {
            self.balance.top_k = top_k
                .parse()
                .map_err(|_| anyhow!("Invalid SCRIM_TOP_K value: {}", top_k))?;
        }
        if let Ok(coefficient) = env::var("SCRIM_FORM_COEFFICIENT") {
            self.balance.skill.form_coefficient = coefficient
                .parse()
                .map_err(|_| anyhow!("Invalid SCRIM_FORM_COEFFICIENT value: {}", coefficient))?;
        }
        if let Ok(k_base) = env::var("SCRIM_K_BASE") {
            self.rating.k_base = k_base
                .parse()
                .map_err(|_| anyhow!("Invalid SCRIM_K_BASE value: {}", k_base))?;
        }
        if let Ok(rate) = env::var("SCRIM_SYNERGY_LEARNING_RATE") {
            self.learning.learning_rate = rate
                .parse()
                .map_err(|_| anyhow!("Invalid SCRIM_SYNERGY_LEARNING_RATE value: {}", rate))?;
        }
        if let Ok(enabled) = env::var("SCRIM_CONTRIBUTION_WEIGHTING") {
            self.rating.contribution_weighting = enabled.parse().map_err(|_| {
                anyhow!("Invalid SCRIM_CONTRIBUTION_WEIGHTING value: {}", enabled)
            })?;
        }
        Ok(())
    }
}

/// First log line of a run, naming the configured service
pub fn startup_banner(config: &AppConfig) -> String {
    format!("{} v{} starting", config.service.name, crate::VERSION)
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.balance.validate()?;
    config.rating.validate()?;
    config.learning.validate()?;

    Ok(())
}
