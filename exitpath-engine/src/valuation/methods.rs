//! The valuation engine and its single-method calculators.
//!
//! Each calculator produces a [`MethodResult`] with a point estimate, a
//! range, and a typed detail payload explaining how the figure was reached.
//! Methods that cannot run on the given financials either return `None`
//! (when the aggregator may simply skip them) or a typed error (when the
//! caller asked for that method directly).

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::inputs::{FinancialInputs, IndustryMultiples, MultipleRange};
use crate::valuation::types::{
    CapitalizationDetails, CcaDetails, DcfDetails, ManualDetails, MethodDetails, MethodResult,
    MultipleBasis, MultipleColumn, NamedAdjustment, NavDetails, ProjectedYear, RuleOfThumbDetails,
    ValuationMethod,
};

// ============================================================================
// Engine
// ============================================================================

/// Multi-method business valuation engine.
pub struct ValuationEngine {
    pub(crate) config: EngineConfig,
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Market methods
    // ------------------------------------------------------------------

    /// Comparable company analysis.
    ///
    /// Applies public-market multiples to the matching financial metric,
    /// discounted for private-company illiquidity. Returns `None` when no
    /// multiple has a positive base metric to work with.
    pub fn cca(
        &self,
        inputs: &FinancialInputs,
        industry: Option<&IndustryMultiples>,
        apply_discount: bool,
    ) -> Option<MethodResult> {
        let industry = industry?;
        let discount = effective_discount(inputs, apply_discount);

        // Preference order: EV/EBITDA, then EV/Revenue, then P/E.
        let candidates = [
            (MultipleBasis::EvEbitda, industry.ev_ebitda, inputs.ebitda),
            (MultipleBasis::EvRevenue, industry.ev_revenue, inputs.revenue),
            (MultipleBasis::Pe, industry.pe, inputs.net_income),
        ];

        let mut columns = Vec::new();
        for (basis, range, metric) in candidates {
            let Some(range) = range else { continue };
            if metric <= 0.0 {
                continue;
            }
            columns.push(MultipleColumn {
                basis,
                multiple: range.median,
                low: metric * range.low * (1.0 - discount),
                median: metric * range.median * (1.0 - discount),
                high: metric * range.high * (1.0 - discount),
            });
        }

        let preferred = *columns.first()?;
        Some(MethodResult {
            method: ValuationMethod::Cca,
            recommended: preferred.median,
            low_range: preferred.low,
            high_range: preferred.high,
            details: MethodDetails::Cca(CcaDetails {
                columns,
                discount_applied: discount > 0.0,
                discount_rate: discount,
                reasoning: "CCA uses market multiples from comparable public companies, \
                            adjusted for private company illiquidity."
                    .to_string(),
            }),
        })
    }

    // ------------------------------------------------------------------
    // Income methods
    // ------------------------------------------------------------------

    /// Discounted cash flow over the configured projection horizon.
    pub fn dcf(&self, inputs: &FinancialInputs) -> Result<MethodResult> {
        if inputs.cash_flow <= 0.0 {
            return Err(EngineError::MethodNotApplicable {
                method: ValuationMethod::Dcf,
                reason: "requires positive cash flow".to_string(),
            });
        }

        let discount_rate = inputs.discount_rate;
        let terminal_growth = self.config.terminal_growth;
        if discount_rate <= terminal_growth {
            return Err(EngineError::InvalidAssumptions {
                reason: format!(
                    "discount rate ({discount_rate}) must exceed terminal growth ({terminal_growth})"
                ),
            });
        }

        let years = self.config.projection_years;
        let rates: &[f64] = if inputs.growth_rates.is_empty() {
            &self.config.default_growth_rates
        } else {
            &inputs.growth_rates
        };
        // Years beyond the supplied growth schedule decay to 80% of the
        // last explicit rate.
        let padding = rates.last().map_or(0.05, |last| last * 0.8);

        let mut cash_flow = inputs.cash_flow;
        let mut projections = Vec::with_capacity(years);
        let mut pv_of_projections = 0.0;
        for year in 1..=years {
            let growth_rate = rates.get(year - 1).copied().unwrap_or(padding);
            cash_flow *= 1.0 + growth_rate;
            let discount_factor = (1.0 + discount_rate).powi(year as i32);
            let present_value = cash_flow / discount_factor;
            pv_of_projections += present_value;
            projections.push(ProjectedYear {
                year,
                cash_flow,
                growth_rate,
                discount_factor,
                present_value,
            });
        }

        // Gordon Growth terminal value on the final projected year.
        let terminal_value =
            cash_flow * (1.0 + terminal_growth) / (discount_rate - terminal_growth);
        let pv_of_terminal = terminal_value / (1.0 + discount_rate).powi(years as i32);
        let enterprise_value = pv_of_projections + pv_of_terminal;

        Ok(MethodResult {
            method: ValuationMethod::Dcf,
            recommended: enterprise_value,
            low_range: enterprise_value * 0.8,
            high_range: enterprise_value * 1.2,
            details: MethodDetails::Dcf(DcfDetails {
                discount_rate,
                terminal_growth,
                projection_years: years,
                projections,
                pv_of_projections,
                pv_of_terminal,
                reasoning: "DCF values future cash flows discounted to present value using WACC."
                    .to_string(),
            }),
        })
    }

    /// Capitalization of earnings.
    ///
    /// Divides normalized earnings by a capitalization rate taken from the
    /// caller override, inverted industry P/E multiples, or the configured
    /// defaults. Returns `None` when earnings are not positive.
    pub fn capitalization(
        &self,
        inputs: &FinancialInputs,
        industry: Option<&IndustryMultiples>,
        cap_rate: Option<f64>,
    ) -> Option<MethodResult> {
        let earnings = inputs.ebitda;
        if earnings <= 0.0 {
            return None;
        }

        let cap_rates = match cap_rate {
            Some(rate) if rate > 0.0 => MultipleRange::new(rate * 0.8, rate, rate * 1.2),
            _ => match industry.and_then(|i| i.pe) {
                Some(pe) => MultipleRange::new(
                    if pe.high > 0.0 { 1.0 / pe.high } else { 0.10 },
                    if pe.median > 0.0 { 1.0 / pe.median } else { 0.125 },
                    if pe.low > 0.0 { 1.0 / pe.low } else { 0.167 },
                ),
                None => self.config.default_cap_rates,
            },
        };

        Some(MethodResult {
            method: ValuationMethod::Capitalization,
            recommended: earnings / cap_rates.median,
            low_range: earnings / cap_rates.high,
            high_range: earnings / cap_rates.low,
            details: MethodDetails::Capitalization(CapitalizationDetails {
                normalized_earnings: earnings,
                cap_rate_used: cap_rates.median,
                cap_rate_range: cap_rates,
                reasoning:
                    "Capitalizes normalized earnings using industry-appropriate capitalization \
                     rate."
                        .to_string(),
            }),
        })
    }

    // ------------------------------------------------------------------
    // Asset methods
    // ------------------------------------------------------------------

    /// Net asset value: assets minus liabilities plus fair-market-value
    /// adjustments. Always produces a result, which may be negative.
    pub fn nav(&self, inputs: &FinancialInputs, adjustments: &[NamedAdjustment]) -> MethodResult {
        let adjustment_total: f64 = adjustments.iter().map(|a| a.amount).sum();
        let net_value = inputs.total_assets - inputs.total_liabilities + adjustment_total;

        // A negative net value flips the band endpoints.
        let low_range = (net_value * 0.85).min(net_value * 1.15);
        let high_range = (net_value * 0.85).max(net_value * 1.15);

        MethodResult {
            method: ValuationMethod::Nav,
            recommended: net_value,
            low_range,
            high_range,
            details: MethodDetails::Nav(NavDetails {
                total_assets: inputs.total_assets,
                total_liabilities: inputs.total_liabilities,
                adjustments: adjustments.to_vec(),
                reasoning: "NAV calculates net worth based on fair market value of assets minus \
                            liabilities."
                    .to_string(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Heuristic methods
    // ------------------------------------------------------------------

    /// Industry rule of thumb: revenue times the industry's customary
    /// multiplier.
    pub fn rule_of_thumb(
        &self,
        inputs: &FinancialInputs,
        industry: Option<&IndustryMultiples>,
    ) -> Result<MethodResult> {
        let multiplier = industry
            .and_then(|i| i.rule_of_thumb_multiplier)
            .ok_or_else(|| EngineError::MethodNotApplicable {
                method: ValuationMethod::RuleOfThumb,
                reason: "No multiplier provided for this industry".to_string(),
            })?;
        if inputs.revenue <= 0.0 {
            return Err(EngineError::MethodNotApplicable {
                method: ValuationMethod::RuleOfThumb,
                reason: "requires positive revenue".to_string(),
            });
        }

        let guidance = industry.and_then(|i| i.rule_of_thumb.clone());
        let reasoning = match &guidance {
            Some(rule) => format!("Industry rule of thumb: {rule}"),
            None => format!("Industry rule of thumb: {multiplier:.1}x revenue"),
        };

        let value = inputs.revenue * multiplier;
        Ok(MethodResult {
            method: ValuationMethod::RuleOfThumb,
            recommended: value,
            low_range: value * 0.8,
            high_range: value * 1.2,
            details: MethodDetails::RuleOfThumb(RuleOfThumbDetails {
                multiplier,
                guidance,
                reasoning,
            }),
        })
    }

    /// Applies a caller-supplied multiple to the matching financial metric.
    pub fn manual(
        &self,
        inputs: &FinancialInputs,
        basis: MultipleBasis,
        multiple: f64,
        apply_discount: bool,
    ) -> Result<MethodResult> {
        if !multiple.is_finite() || multiple <= 0.0 {
            return Err(EngineError::ManualMultipleInvalid {
                reason: "multiple must be a positive number".to_string(),
            });
        }

        let metric_value = market_metric(inputs, basis);
        if metric_value <= 0.0 {
            return Err(EngineError::MethodNotApplicable {
                method: ValuationMethod::Manual,
                reason: format!(
                    "no positive {} available for the {} multiple",
                    basis.metric_name(),
                    basis
                ),
            });
        }

        let discount = effective_discount(inputs, apply_discount);
        let base = metric_value * multiple;
        Ok(MethodResult {
            method: ValuationMethod::Manual,
            recommended: base * (1.0 - discount),
            low_range: base * 0.8 * (1.0 - discount),
            high_range: base * 1.2 * (1.0 - discount),
            details: MethodDetails::Manual(ManualDetails {
                basis,
                multiple,
                metric_value,
                discount_applied: discount > 0.0,
                discount_rate: discount,
                reasoning: format!(
                    "Applies a caller-supplied {basis} multiple of {multiple:.2} to current \
                     financials."
                ),
            }),
        })
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// The financial metric a market-multiple basis applies to.
fn market_metric(inputs: &FinancialInputs, basis: MultipleBasis) -> f64 {
    match basis {
        MultipleBasis::EvEbitda => inputs.ebitda,
        MultipleBasis::EvRevenue => inputs.revenue,
        MultipleBasis::Pe => inputs.net_income,
    }
}

/// The illiquidity haircut in effect for market-multiple methods.
fn effective_discount(inputs: &FinancialInputs, apply_discount: bool) -> f64 {
    if apply_discount {
        inputs.private_company_discount
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_inputs() -> FinancialInputs {
        FinancialInputs {
            revenue: 5_000_000.0,
            ebitda: 1_000_000.0,
            net_income: 600_000.0,
            cash_flow: 500_000.0,
            total_assets: 2_000_000.0,
            total_liabilities: 800_000.0,
            private_company_discount: 0.25,
            discount_rate: 0.15,
            growth_rates: vec![0.15, 0.12, 0.10, 0.08, 0.05],
        }
    }

    fn make_test_industry() -> IndustryMultiples {
        IndustryMultiples {
            name: Some("Professional Services".to_string()),
            ev_ebitda: Some(MultipleRange::new(4.0, 6.0, 8.0)),
            ev_revenue: Some(MultipleRange::new(0.5, 1.0, 1.5)),
            pe: Some(MultipleRange::new(8.0, 12.0, 16.0)),
            rule_of_thumb: Some("1x annual revenue".to_string()),
            rule_of_thumb_multiplier: Some(1.0),
        }
    }

    #[test]
    fn test_cca_applies_median_multiple_with_discount() {
        let engine = ValuationEngine::new();
        let industry = make_test_industry();

        let result = engine
            .cca(&make_test_inputs(), Some(&industry), true)
            .unwrap();
        // 1M EBITDA * 6.0 median * 0.75 illiquidity factor.
        assert!((result.recommended - 4_500_000.0).abs() < 1e-6);
        assert!((result.low_range - 3_000_000.0).abs() < 1e-6);
        assert!((result.high_range - 6_000_000.0).abs() < 1e-6);

        let MethodDetails::Cca(details) = &result.details else {
            panic!("expected CCA details");
        };
        assert_eq!(details.columns.len(), 3);
        assert_eq!(details.columns[0].basis, MultipleBasis::EvEbitda);
        assert!(details.discount_applied);
    }

    #[test]
    fn test_cca_without_discount() {
        let engine = ValuationEngine::new();
        let industry = make_test_industry();

        let result = engine
            .cca(&make_test_inputs(), Some(&industry), false)
            .unwrap();
        assert!((result.recommended - 6_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_cca_falls_back_to_revenue_multiple() {
        let engine = ValuationEngine::new();
        let industry = IndustryMultiples {
            ev_revenue: Some(MultipleRange::new(0.5, 1.0, 1.5)),
            ..IndustryMultiples::default()
        };
        let mut inputs = make_test_inputs();
        inputs.ebitda = 0.0;

        let result = engine.cca(&inputs, Some(&industry), true).unwrap();
        // 5M revenue * 1.0 median * 0.75.
        assert!((result.recommended - 3_750_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_cca_requires_usable_multiple() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.ebitda = 0.0;
        inputs.revenue = 0.0;
        inputs.net_income = 0.0;

        assert!(engine
            .cca(&inputs, Some(&make_test_industry()), true)
            .is_none());
        assert!(engine.cca(&make_test_inputs(), None, true).is_none());
    }

    #[test]
    fn test_dcf_golden_value() {
        let engine = ValuationEngine::new();
        let result = engine.dcf(&make_test_inputs()).unwrap();

        // 500K cash flow at the default growth schedule, 15% WACC, 3%
        // terminal growth over 5 years.
        assert!((result.recommended - 5_717_706.92).abs() < 1.0);
        assert!((result.low_range - result.recommended * 0.8).abs() < 1e-6);
        assert!((result.high_range - result.recommended * 1.2).abs() < 1e-6);

        let MethodDetails::Dcf(details) = &result.details else {
            panic!("expected DCF details");
        };
        assert_eq!(details.projections.len(), 5);
        assert!((details.pv_of_projections - 2_289_568.22).abs() < 1.0);
        assert!((details.pv_of_terminal - 3_428_138.70).abs() < 1.0);
        // Year one: 575K discounted one year at 15% is exactly 500K.
        assert!((details.projections[0].present_value - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_dcf_rejects_non_positive_cash_flow() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.cash_flow = 0.0;

        let err = engine.dcf(&inputs).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MethodNotApplicable {
                method: ValuationMethod::Dcf,
                ..
            }
        ));
    }

    #[test]
    fn test_dcf_rejects_discount_rate_below_terminal_growth() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        // Below the default 3% terminal growth.
        inputs.discount_rate = 0.02;

        let err = engine.dcf(&inputs).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAssumptions { .. }));
    }

    #[test]
    fn test_capitalization_with_default_rates() {
        let engine = ValuationEngine::new();
        let result = engine
            .capitalization(&make_test_inputs(), None, None)
            .unwrap();

        // 1M earnings at the default 20%/25%/33% rate triple.
        assert!((result.recommended - 4_000_000.0).abs() < 1e-6);
        assert!((result.low_range - 1_000_000.0 / 0.33).abs() < 1e-6);
        assert!((result.high_range - 5_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_capitalization_inverts_pe_multiples() {
        let engine = ValuationEngine::new();
        let result = engine
            .capitalization(&make_test_inputs(), Some(&make_test_industry()), None)
            .unwrap();

        // Median cap rate 1/12, so 1M earnings value at 12M.
        assert!((result.recommended - 12_000_000.0).abs() < 1e-6);
        assert!((result.low_range - 8_000_000.0).abs() < 1e-6);
        assert!((result.high_range - 16_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_capitalization_flat_rate_override() {
        let engine = ValuationEngine::new();
        let result = engine
            .capitalization(&make_test_inputs(), Some(&make_test_industry()), Some(0.25))
            .unwrap();

        assert!((result.recommended - 4_000_000.0).abs() < 1e-6);
        assert!((result.low_range - 1_000_000.0 / 0.30).abs() < 1e-6);
        assert!((result.high_range - 5_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_capitalization_requires_positive_earnings() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.ebitda = 0.0;

        assert!(engine.capitalization(&inputs, None, None).is_none());
    }

    #[test]
    fn test_nav_subtracts_liabilities_and_applies_band() {
        let engine = ValuationEngine::new();
        let result = engine.nav(&make_test_inputs(), &[]);

        assert!((result.recommended - 1_200_000.0).abs() < 1e-6);
        assert!((result.low_range - 1_020_000.0).abs() < 1e-6);
        assert!((result.high_range - 1_380_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_nav_includes_adjustments() {
        let engine = ValuationEngine::new();
        let adjustments = vec![
            NamedAdjustment {
                name: "Real estate appreciation".to_string(),
                amount: 300_000.0,
            },
            NamedAdjustment {
                name: "Obsolete inventory".to_string(),
                amount: -100_000.0,
            },
        ];

        let result = engine.nav(&make_test_inputs(), &adjustments);
        assert!((result.recommended - 1_400_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_nav_negative_net_value_keeps_range_ordered() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.total_assets = 500_000.0;
        inputs.total_liabilities = 900_000.0;

        let result = engine.nav(&inputs, &[]);
        assert!((result.recommended - -400_000.0).abs() < 1e-6);
        assert!(result.low_range <= result.recommended);
        assert!(result.recommended <= result.high_range);
    }

    #[test]
    fn test_rule_of_thumb_uses_industry_multiplier() {
        let engine = ValuationEngine::new();
        let result = engine
            .rule_of_thumb(&make_test_inputs(), Some(&make_test_industry()))
            .unwrap();

        assert!((result.recommended - 5_000_000.0).abs() < 1e-6);
        let MethodDetails::RuleOfThumb(details) = &result.details else {
            panic!("expected rule-of-thumb details");
        };
        assert_eq!(details.reasoning, "Industry rule of thumb: 1x annual revenue");
    }

    #[test]
    fn test_rule_of_thumb_requires_multiplier() {
        let engine = ValuationEngine::new();
        let industry = IndustryMultiples::default();

        let err = engine
            .rule_of_thumb(&make_test_inputs(), Some(&industry))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::MethodNotApplicable {
                method: ValuationMethod::RuleOfThumb,
                ..
            }
        ));
        assert!(err.to_string().contains("No multiplier provided"));
    }

    #[test]
    fn test_rule_of_thumb_requires_positive_revenue() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.revenue = 0.0;

        assert!(engine
            .rule_of_thumb(&inputs, Some(&make_test_industry()))
            .is_err());
    }

    #[test]
    fn test_manual_applies_multiple_and_discount() {
        let engine = ValuationEngine::new();
        let result = engine
            .manual(&make_test_inputs(), MultipleBasis::EvEbitda, 5.0, true)
            .unwrap();

        // 1M EBITDA * 5.0 * 0.75.
        assert!((result.recommended - 3_750_000.0).abs() < 1e-6);
        assert!((result.low_range - 3_000_000.0).abs() < 1e-6);
        assert!((result.high_range - 4_500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_manual_rejects_bad_multiple() {
        let engine = ValuationEngine::new();
        let inputs = make_test_inputs();

        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = engine
                .manual(&inputs, MultipleBasis::EvRevenue, bad, true)
                .unwrap_err();
            assert!(matches!(err, EngineError::ManualMultipleInvalid { .. }));
        }
    }

    #[test]
    fn test_manual_requires_positive_metric() {
        let engine = ValuationEngine::new();
        let mut inputs = make_test_inputs();
        inputs.net_income = 0.0;

        let err = engine
            .manual(&inputs, MultipleBasis::Pe, 10.0, true)
            .unwrap_err();
        assert!(err.to_string().contains("net income"));
    }
}
