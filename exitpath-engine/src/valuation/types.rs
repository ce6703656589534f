//! Valuation request and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::inputs::{IndustryMultiples, MultipleRange, RawFinancials};

// ============================================================================
// Method Selectors
// ============================================================================

/// Valuation method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    /// Comparable company analysis.
    Cca,
    /// Discounted cash flow.
    Dcf,
    /// Capitalization of earnings.
    Capitalization,
    /// Net asset value.
    Nav,
    /// Industry rule of thumb.
    RuleOfThumb,
    /// Caller-supplied multiple.
    Manual,
    /// Weighted blend of the applicable methods.
    Comprehensive,
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cca => write!(f, "CCA"),
            Self::Dcf => write!(f, "DCF"),
            Self::Capitalization => write!(f, "Capitalization of Earnings"),
            Self::Nav => write!(f, "NAV"),
            Self::RuleOfThumb => write!(f, "Rule of Thumb"),
            Self::Manual => write!(f, "Manual Multiple"),
            Self::Comprehensive => write!(f, "Comprehensive"),
        }
    }
}

/// Which base metric a market multiple applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleBasis {
    EvEbitda,
    EvRevenue,
    Pe,
}

impl MultipleBasis {
    /// Name of the financial figure this basis multiplies.
    pub fn metric_name(self) -> &'static str {
        match self {
            Self::EvEbitda => "EBITDA",
            Self::EvRevenue => "revenue",
            Self::Pe => "net income",
        }
    }
}

impl std::fmt::Display for MultipleBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EvEbitda => write!(f, "EV/EBITDA"),
            Self::EvRevenue => write!(f, "EV/Revenue"),
            Self::Pe => write!(f, "P/E"),
        }
    }
}

// ============================================================================
// Per-Method Details
// ============================================================================

/// One CCA valuation column: a multiple tier applied to its base metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultipleColumn {
    pub basis: MultipleBasis,
    /// Median multiple used for the recommended figure.
    pub multiple: f64,
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcaDetails {
    /// Applicable columns in preference order.
    pub columns: Vec<MultipleColumn>,
    pub discount_applied: bool,
    /// Discount actually applied; zero when disabled.
    pub discount_rate: f64,
    pub reasoning: String,
}

/// One projected year in a DCF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    pub year: usize,
    pub cash_flow: f64,
    pub growth_rate: f64,
    pub discount_factor: f64,
    pub present_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfDetails {
    pub discount_rate: f64,
    pub terminal_growth: f64,
    pub projection_years: usize,
    pub projections: Vec<ProjectedYear>,
    pub pv_of_projections: f64,
    pub pv_of_terminal: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalizationDetails {
    pub normalized_earnings: f64,
    /// Median cap rate behind the recommended figure.
    pub cap_rate_used: f64,
    pub cap_rate_range: MultipleRange,
    pub reasoning: String,
}

/// A named fair-market-value adjustment applied on top of book value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAdjustment {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavDetails {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub adjustments: Vec<NamedAdjustment>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOfThumbDetails {
    pub multiplier: f64,
    /// Narrative guidance from the industry data, when present.
    pub guidance: Option<String>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualDetails {
    pub basis: MultipleBasis,
    pub multiple: f64,
    pub metric_value: f64,
    pub discount_applied: bool,
    pub discount_rate: f64,
    pub reasoning: String,
}

/// Typed per-method detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodDetails {
    Cca(CcaDetails),
    Dcf(DcfDetails),
    Capitalization(CapitalizationDetails),
    Nav(NavDetails),
    RuleOfThumb(RuleOfThumbDetails),
    Manual(ManualDetails),
}

// ============================================================================
// Results
// ============================================================================

/// A single method's point estimate and range.
///
/// Invariant: `low_range <= recommended <= high_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResult {
    pub method: ValuationMethod,
    pub recommended: f64,
    pub low_range: f64,
    pub high_range: f64,
    pub details: MethodDetails,
}

/// Comprehensive-mode output: the weighted blend plus per-method breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateValuation {
    /// The weighted average, the headline figure.
    pub recommended: f64,
    /// Minimum recommended value across blended methods.
    pub low_range: f64,
    /// Maximum recommended value across blended methods.
    pub high_range: f64,
    pub weighted_average: f64,
    pub simple_average: f64,
    pub methods_used: usize,
    /// Illiquidity discount applied to market multiples; zero when disabled.
    pub private_discount_applied: f64,
    /// Renormalized weights for the methods included in the blend.
    pub weights: BTreeMap<ValuationMethod, f64>,
    /// Every method that produced a result, including zero-valued ones
    /// excluded from the blend.
    pub methods: Vec<MethodResult>,
}

/// What a valuation request produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ValuationOutcome {
    Single(MethodResult),
    Comprehensive(AggregateValuation),
}

impl ValuationOutcome {
    /// Headline value regardless of mode.
    pub fn recommended(&self) -> f64 {
        match self {
            Self::Single(result) => result.recommended,
            Self::Comprehensive(aggregate) => aggregate.recommended,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A full valuation request at the library boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    #[serde(default)]
    pub financials: RawFinancials,
    #[serde(default = "default_method")]
    pub method: ValuationMethod,
    #[serde(default)]
    pub industry: Option<IndustryMultiples>,
    /// Apply the private-company discount to market multiples.
    #[serde(default = "default_true")]
    pub apply_discount: bool,
    /// Flat capitalization rate override.
    #[serde(default)]
    pub cap_rate: Option<f64>,
    /// Fair-market-value adjustments for the NAV method.
    #[serde(default)]
    pub nav_adjustments: Vec<NamedAdjustment>,
    /// Required for the manual method.
    #[serde(default)]
    pub manual_multiple: Option<f64>,
    /// Required for the manual method.
    #[serde(default)]
    pub manual_multiple_type: Option<MultipleBasis>,
}

impl Default for ValuationRequest {
    fn default() -> Self {
        Self {
            financials: RawFinancials::default(),
            method: default_method(),
            industry: None,
            apply_discount: true,
            cap_rate: None,
            nav_adjustments: Vec::new(),
            manual_multiple: None,
            manual_multiple_type: None,
        }
    }
}

fn default_method() -> ValuationMethod {
    ValuationMethod::Comprehensive
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Tests
// ============================================================================
