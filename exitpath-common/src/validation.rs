//! Configuration validation for ExitPath services.
//!
//! Provides validation logic for configuration fields to ensure
//! all required values are present and within valid ranges.

use thiserror::Error;

use crate::config::{Config, ObservabilityConfig, ValuationSettings};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration conflict: {reason}")]
    Conflict { reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if let Err(e) = self.valuation.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for ValuationSettings {
    fn validate(&self) -> ValidationResult<()> {
        if !(0.0..=1.0).contains(&self.discount_rate) || self.discount_rate == 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "valuation.discount_rate".into(),
                reason: "must be greater than 0 and at most 1".into(),
            });
        }

        if !(0.0..1.0).contains(&self.terminal_growth) {
            return Err(ValidationError::InvalidValue {
                field: "valuation.terminal_growth".into(),
                reason: "must be at least 0 and below 1".into(),
            });
        }

        if !(0.0..=1.0).contains(&self.private_company_discount) {
            return Err(ValidationError::InvalidValue {
                field: "valuation.private_company_discount".into(),
                reason: "must be between 0 and 1".into(),
            });
        }

        if self.projection_years == 0 {
            return Err(ValidationError::InvalidValue {
                field: "valuation.projection_years".into(),
                reason: "must be at least 1".into(),
            });
        }

        // Gordon Growth terminal value is undefined otherwise
        if self.discount_rate <= self.terminal_growth {
            return Err(ValidationError::Conflict {
                reason: format!(
                    "discount_rate ({}) must exceed terminal_growth ({})",
                    self.discount_rate, self.terminal_growth
                ),
            });
        }

        Ok(())
    }
}
