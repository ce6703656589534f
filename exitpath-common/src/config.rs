//! Configuration management for ExitPath services.
//!
//! All ExitPath services share a unified configuration file at
//! `~/.exitpath/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (EXITPATH_* prefix)
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `EXITPATH_LOG_LEVEL` → observability.log_level
//! - `EXITPATH_LOG_FORMAT` → observability.log_format
//! - `EXITPATH_DISCOUNT_RATE` → valuation.discount_rate
//! - `EXITPATH_PRIVATE_DISCOUNT` → valuation.private_company_discount

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".exitpath"),
        |dirs| dirs.home_dir().join(".exitpath"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration shared by all services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: "json" or "pretty"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Valuation Defaults Configuration
// ============================================================================

/// Deployment-level overrides for the valuation engine's default assumptions.
///
/// These feed `exitpath-engine`'s `EngineConfig`; per-request values supplied
/// by callers always take precedence over these defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSettings {
    /// Discount rate (WACC proxy) applied when a request does not supply one.
    /// Default: 0.15 (15%, typical for private companies)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Perpetual growth rate used for terminal value.
    /// Default: 0.03 (3%)
    #[serde(default = "default_terminal_growth")]
    pub terminal_growth: f64,

    /// Number of years of cash flow to project.
    /// Default: 5
    #[serde(default = "default_projection_years")]
    pub projection_years: usize,

    /// Illiquidity discount applied to public-market multiples.
    /// Default: 0.25 (25%)
    #[serde(default = "default_private_company_discount")]
    pub private_company_discount: f64,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            discount_rate: default_discount_rate(),
            terminal_growth: default_terminal_growth(),
            projection_years: default_projection_years(),
            private_company_discount: default_private_company_discount(),
        }
    }
}

fn default_discount_rate() -> f64 {
    0.15
}

fn default_terminal_growth() -> f64 {
    0.03
}

fn default_projection_years() -> usize {
    5
}

fn default_private_company_discount() -> f64 {
    0.25
}

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Unified configuration for ExitPath services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Valuation engine default assumptions
    #[serde(default)]
    pub valuation: ValuationSettings,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable fallbacks.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("EXITPATH_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("EXITPATH_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Ok(rate) = std::env::var("EXITPATH_DISCOUNT_RATE") {
            if let Ok(r) = rate.parse() {
                self.valuation.discount_rate = r;
            }
        }
        if let Ok(discount) = std::env::var("EXITPATH_PRIVATE_DISCOUNT") {
            if let Ok(d) = discount.parse() {
                self.valuation.private_company_discount = d;
            }
        }
    }

    /// Persist the configuration to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
        assert!((config.valuation.discount_rate - 0.15).abs() < f64::EPSILON);
        assert!((config.valuation.terminal_growth - 0.03).abs() < f64::EPSILON);
        assert_eq!(config.valuation.projection_years, 5);
        assert!((config.valuation.private_company_discount - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"valuation": {"discount_rate": 0.12}}"#).unwrap();
        assert!((config.valuation.discount_rate - 0.12).abs() < f64::EPSILON);
        assert!((config.valuation.terminal_growth - 0.03).abs() < f64::EPSILON);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.valuation.private_company_discount = 0.30;
        config.observability.log_format = "json".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!((loaded.valuation.private_company_discount - 0.30).abs() < f64::EPSILON);
        assert_eq!(loaded.observability.log_format, "json");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/exitpath/config.json");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        std::env::set_var("EXITPATH_DISCOUNT_RATE", "0.18");
        config.apply_env_overrides();
        std::env::remove_var("EXITPATH_DISCOUNT_RATE");
        assert!((config.valuation.discount_rate - 0.18).abs() < f64::EPSILON);
    }
}
