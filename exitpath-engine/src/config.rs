//! Engine configuration.
//!
//! Default financial assumptions applied when the caller does not supply
//! overrides. Embedding services load `exitpath_common::Config` at startup
//! and convert its valuation section into an [`EngineConfig`].

use serde::{Deserialize, Serialize};

use exitpath_common::ValuationSettings;

use crate::inputs::MultipleRange;
use crate::valuation::types::ValuationMethod;

/// Fixed weights for the comprehensive blend, renormalized over the methods
/// that actually produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub cca: f64,
    pub dcf: f64,
    pub capitalization: f64,
    pub nav: f64,
}

impl BlendWeights {
    /// Weight assigned to a method before renormalization. Methods outside
    /// the blend get zero.
    pub fn for_method(&self, method: ValuationMethod) -> f64 {
        match method {
            ValuationMethod::Cca => self.cca,
            ValuationMethod::Dcf => self.dcf,
            ValuationMethod::Capitalization => self.capitalization,
            ValuationMethod::Nav => self.nav,
            _ => 0.0,
        }
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            cca: 0.35,
            dcf: 0.35,
            capitalization: 0.20,
            nav: 0.10,
        }
    }
}

/// Default assumptions for the valuation calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Discount rate (WACC) used by DCF when the caller supplies none.
    pub discount_rate: f64,
    /// Terminal growth rate for the Gordon Growth terminal value.
    pub terminal_growth: f64,
    /// Number of projected years in DCF.
    pub projection_years: usize,
    /// Illiquidity haircut applied to public-market multiples.
    pub private_company_discount: f64,
    /// Declining default growth schedule for cash-flow projections.
    pub default_growth_rates: Vec<f64>,
    /// Capitalization-rate band used when no P/E data exists.
    pub default_cap_rates: MultipleRange,
    /// Comprehensive blend weights.
    pub blend_weights: BlendWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.15,
            terminal_growth: 0.03,
            projection_years: 5,
            private_company_discount: 0.25,
            default_growth_rates: vec![0.15, 0.12, 0.10, 0.08, 0.05],
            default_cap_rates: MultipleRange {
                low: 0.20,
                median: 0.25,
                high: 0.33,
            },
            blend_weights: BlendWeights::default(),
        }
    }
}

impl From<&ValuationSettings> for EngineConfig {
    fn from(settings: &ValuationSettings) -> Self {
        Self {
            discount_rate: settings.discount_rate,
            terminal_growth: settings.terminal_growth,
            projection_years: settings.projection_years,
            private_company_discount: settings.private_company_discount,
            ..Self::default()
        }
    }
}
