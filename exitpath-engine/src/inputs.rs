//! Financial input types and the normalization gate.
//!
//! Callers supply a [`RawFinancials`] with every figure optional.
//! [`RawFinancials::normalize`] is the single validation gate: it rejects
//! NaN/infinite and negative figures, bounds rates to [0, 1], and fills
//! defaults, so every calculator downstream can assume clean numbers.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, InvalidValueKind, Result};

// ============================================================================
// Market Multiple Types
// ============================================================================

/// Low/median/high band for a market multiple or rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultipleRange {
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

impl MultipleRange {
    pub fn new(low: f64, median: f64, high: f64) -> Self {
        Self { low, median, high }
    }
}

/// Industry reference multiples, looked up by the caller.
///
/// Any field may be absent; calculators skip what they cannot support.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryMultiples {
    /// Display name of the industry, e.g. "Software (SaaS)".
    pub name: Option<String>,
    /// EV/EBITDA band observed in comparable public companies.
    pub ev_ebitda: Option<MultipleRange>,
    /// EV/Revenue band.
    pub ev_revenue: Option<MultipleRange>,
    /// Price/Earnings band.
    pub pe: Option<MultipleRange>,
    /// Narrative rule-of-thumb guidance, e.g. "2-3x revenue for SaaS".
    pub rule_of_thumb: Option<String>,
    /// Fixed revenue multiplier backing the rule of thumb.
    pub rule_of_thumb_multiplier: Option<f64>,
}

impl IndustryMultiples {
    /// Whether any market multiple band is present.
    pub fn has_market_multiples(&self) -> bool {
        self.ev_ebitda.is_some() || self.ev_revenue.is_some() || self.pe.is_some()
    }
}

// ============================================================================
// Boundary Input
// ============================================================================

/// Caller-supplied financials, every figure optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFinancials {
    pub revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub net_income: Option<f64>,
    /// Free cash flow; defaults to 80% of EBITDA when absent.
    pub cash_flow: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    /// Illiquidity haircut override, 0-1.
    pub private_company_discount: Option<f64>,
    /// DCF discount rate override, 0-1.
    pub discount_rate: Option<f64>,
    /// Year-by-year growth rates for the projection horizon.
    pub growth_rates: Option<Vec<f64>>,
}

impl RawFinancials {
    /// Validate and default every figure, producing calculator-ready inputs.
    pub fn normalize(&self, config: &EngineConfig) -> Result<FinancialInputs> {
        let revenue = validate_non_negative(self.revenue.unwrap_or(0.0), "revenue")?;
        let ebitda = validate_non_negative(self.ebitda.unwrap_or(0.0), "ebitda")?;
        let net_income = validate_non_negative(self.net_income.unwrap_or(0.0), "net_income")?;
        let cash_flow = match self.cash_flow {
            Some(value) => validate_non_negative(value, "cash_flow")?,
            None => ebitda * 0.8,
        };
        let total_assets =
            validate_non_negative(self.total_assets.unwrap_or(0.0), "total_assets")?;
        let total_liabilities =
            validate_non_negative(self.total_liabilities.unwrap_or(0.0), "total_liabilities")?;
        let private_company_discount = match self.private_company_discount {
            Some(value) => validate_percentage(value, "private_company_discount")?,
            None => config.private_company_discount,
        };
        let discount_rate = match self.discount_rate {
            Some(value) => validate_percentage(value, "discount_rate")?,
            None => config.discount_rate,
        };
        let growth_rates = match &self.growth_rates {
            Some(rates) => {
                for (index, rate) in rates.iter().enumerate() {
                    if !rate.is_finite() {
                        return Err(EngineError::InvalidValue {
                            field: format!("growth_rates[{index}]"),
                            kind: InvalidValueKind::NotANumber,
                        });
                    }
                }
                rates.clone()
            }
            None => config.default_growth_rates.clone(),
        };

        Ok(FinancialInputs {
            revenue,
            ebitda,
            net_income,
            cash_flow,
            total_assets,
            total_liabilities,
            private_company_discount,
            discount_rate,
            growth_rates,
        })
    }
}

/// Validated, defaulted financials consumed by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub revenue: f64,
    pub ebitda: f64,
    pub net_income: f64,
    pub cash_flow: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub private_company_discount: f64,
    pub discount_rate: f64,
    pub growth_rates: Vec<f64>,
}

impl FinancialInputs {
    /// Book net worth: assets minus liabilities.
    pub fn net_assets(&self) -> f64 {
        self.total_assets - self.total_liabilities
    }
}

// ============================================================================
// Validators
// ============================================================================

/// Validate that a figure is finite and non-negative.
pub fn validate_non_negative(value: f64, field: &str) -> Result<f64> {
    if !value.is_finite() {
        Err(EngineError::InvalidValue {
            field: field.to_string(),
            kind: InvalidValueKind::NotANumber,
        })
    } else if value < 0.0 {
        Err(EngineError::InvalidValue {
            field: field.to_string(),
            kind: InvalidValueKind::Negative,
        })
    } else {
        Ok(value)
    }
}

/// Validate that a rate is finite and lies in [0, 1].
pub fn validate_percentage(value: f64, field: &str) -> Result<f64> {
    if !value.is_finite() {
        Err(EngineError::InvalidValue {
            field: field.to_string(),
            kind: InvalidValueKind::NotANumber,
        })
    } else if !(0.0..=1.0).contains(&value) {
        Err(EngineError::InvalidValue {
            field: field.to_string(),
            kind: InvalidValueKind::OutOfPercentageRange,
        })
    } else {
        Ok(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
