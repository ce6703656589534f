//! Request dispatch and the comprehensive weighted blend.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::inputs::{FinancialInputs, IndustryMultiples};
use crate::valuation::methods::ValuationEngine;
use crate::valuation::types::{
    AggregateValuation, ValuationMethod, ValuationOutcome, ValuationRequest,
};

impl ValuationEngine {
    /// Runs a full valuation request: normalizes the raw financials, then
    /// dispatches to the requested method or the comprehensive blend.
    pub fn run(&self, request: &ValuationRequest) -> Result<ValuationOutcome> {
        let inputs = request.financials.normalize(&self.config)?;
        let industry = request.industry.as_ref();

        let outcome = match request.method {
            ValuationMethod::Comprehensive => ValuationOutcome::Comprehensive(
                self.comprehensive(&inputs, industry, request.apply_discount)?,
            ),
            ValuationMethod::Cca => {
                let result = self
                    .cca(&inputs, industry, request.apply_discount)
                    .ok_or_else(|| EngineError::MethodNotApplicable {
                        method: ValuationMethod::Cca,
                        reason: "requires positive EBITDA, revenue, or net income and matching \
                                 industry multiples"
                            .to_string(),
                    })?;
                ValuationOutcome::Single(result)
            }
            ValuationMethod::Dcf => ValuationOutcome::Single(self.dcf(&inputs)?),
            ValuationMethod::Capitalization => {
                let result = self
                    .capitalization(&inputs, industry, request.cap_rate)
                    .ok_or_else(|| EngineError::MethodNotApplicable {
                        method: ValuationMethod::Capitalization,
                        reason: "requires positive EBITDA".to_string(),
                    })?;
                ValuationOutcome::Single(result)
            }
            ValuationMethod::Nav => {
                ValuationOutcome::Single(self.nav(&inputs, &request.nav_adjustments))
            }
            ValuationMethod::RuleOfThumb => {
                ValuationOutcome::Single(self.rule_of_thumb(&inputs, industry)?)
            }
            ValuationMethod::Manual => {
                let multiple = request.manual_multiple.ok_or_else(|| {
                    EngineError::ManualMultipleInvalid {
                        reason: "manual method requires a multiple".to_string(),
                    }
                })?;
                let basis = request.manual_multiple_type.ok_or_else(|| {
                    EngineError::ManualMultipleInvalid {
                        reason: "manual method requires a multiple type".to_string(),
                    }
                })?;
                ValuationOutcome::Single(self.manual(
                    &inputs,
                    basis,
                    multiple,
                    request.apply_discount,
                )?)
            }
        };
        Ok(outcome)
    }

    /// Blends every applicable method into a weighted valuation.
    ///
    /// Methods gate on their base metric, so sparse financials degrade
    /// gracefully to whatever subset still applies. Weights cover only the
    /// methods that produced a positive value and are renormalized to sum
    /// to one.
    pub fn comprehensive(
        &self,
        inputs: &FinancialInputs,
        industry: Option<&IndustryMultiples>,
        apply_discount: bool,
    ) -> Result<AggregateValuation> {
        let discount = if apply_discount {
            inputs.private_company_discount
        } else {
            0.0
        };

        let mut methods = Vec::new();
        if inputs.ebitda > 0.0 && industry.is_some() {
            if let Some(result) = self.cca(inputs, industry, apply_discount) {
                methods.push(result);
            }
        }
        if inputs.cash_flow > 0.0 {
            match self.dcf(inputs) {
                Ok(result) => methods.push(result),
                Err(e) => debug!(error = %e, "DCF excluded from blend"),
            }
        }
        if inputs.ebitda > 0.0 {
            if let Some(result) = self.capitalization(inputs, industry, None) {
                methods.push(result);
            }
        }
        if inputs.total_assets > 0.0 {
            methods.push(self.nav(inputs, &[]));
        }

        let mut weights = BTreeMap::new();
        for result in &methods {
            if result.recommended > 0.0 {
                weights.insert(
                    result.method,
                    self.config.blend_weights.for_method(result.method),
                );
            } else {
                debug!(method = %result.method, "Method excluded from blend");
            }
        }

        let total: f64 = weights.values().sum();
        if weights.is_empty() || total <= 0.0 {
            return Err(EngineError::NoApplicableMethod);
        }
        for weight in weights.values_mut() {
            *weight /= total;
        }

        let mut weighted_average = 0.0;
        let mut simple_sum = 0.0;
        let mut low_range = f64::INFINITY;
        let mut high_range = f64::NEG_INFINITY;
        for result in &methods {
            let Some(weight) = weights.get(&result.method) else {
                continue;
            };
            weighted_average += result.recommended * weight;
            simple_sum += result.recommended;
            low_range = low_range.min(result.recommended);
            high_range = high_range.max(result.recommended);
        }
        let methods_used = weights.len();
        let simple_average = simple_sum / methods_used as f64;

        info!(weighted_average, methods_used, "Comprehensive valuation blended");

        Ok(AggregateValuation {
            recommended: weighted_average,
            low_range,
            high_range,
            weighted_average,
            simple_average,
            methods_used,
            private_discount_applied: discount,
            weights,
            methods,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{IndustryMultiples, MultipleRange, RawFinancials};
    use crate::valuation::types::MultipleBasis;

    fn make_test_financials() -> RawFinancials {
        RawFinancials {
            revenue: Some(5_000_000.0),
            ebitda: Some(1_000_000.0),
            net_income: Some(600_000.0),
            cash_flow: Some(500_000.0),
            total_assets: Some(2_000_000.0),
            total_liabilities: Some(800_000.0),
            ..RawFinancials::default()
        }
    }

    fn make_test_industry() -> IndustryMultiples {
        IndustryMultiples {
            ev_ebitda: Some(MultipleRange::new(4.0, 6.0, 8.0)),
            ev_revenue: Some(MultipleRange::new(0.5, 1.0, 1.5)),
            pe: Some(MultipleRange::new(8.0, 12.0, 16.0)),
            ..IndustryMultiples::default()
        }
    }

    fn make_test_request() -> ValuationRequest {
        ValuationRequest {
            financials: make_test_financials(),
            industry: Some(make_test_industry()),
            ..ValuationRequest::default()
        }
    }

    #[test]
    fn test_comprehensive_blends_all_four_methods() {
        let engine = ValuationEngine::new();
        let outcome = engine.run(&make_test_request()).unwrap();

        let ValuationOutcome::Comprehensive(aggregate) = outcome else {
            panic!("expected comprehensive outcome");
        };
        assert_eq!(aggregate.methods_used, 4);
        assert_eq!(aggregate.methods.len(), 4);

        // CCA 4.5M, DCF ~5.72M, capitalization 12M, NAV 1.2M.
        assert!((aggregate.low_range - 1_200_000.0).abs() < 1e-6);
        assert!((aggregate.high_range - 12_000_000.0).abs() < 1e-6);

        let weight_sum: f64 = aggregate.weights.values().sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);
        assert!((aggregate.weighted_average - 6_096_197.42).abs() < 1.0);
        assert_eq!(aggregate.recommended, aggregate.weighted_average);
        assert!(aggregate.low_range <= aggregate.recommended);
        assert!(aggregate.recommended <= aggregate.high_range);
    }

    #[test]
    fn test_comprehensive_renormalizes_weights_for_missing_methods() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: RawFinancials {
                ebitda: Some(1_000_000.0),
                cash_flow: Some(500_000.0),
                ..RawFinancials::default()
            },
            industry: None,
            ..ValuationRequest::default()
        };

        let ValuationOutcome::Comprehensive(aggregate) = engine.run(&request).unwrap() else {
            panic!("expected comprehensive outcome");
        };
        // No industry data and no assets, so only DCF and capitalization.
        assert_eq!(aggregate.methods_used, 2);
        let weight_sum: f64 = aggregate.weights.values().sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);
        // DCF 0.35 and capitalization 0.20 renormalize to 7/11 and 4/11.
        let dcf_weight = aggregate.weights[&ValuationMethod::Dcf];
        assert!((dcf_weight - 0.35 / 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_comprehensive_degrades_to_nav_only() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: RawFinancials {
                total_assets: Some(2_000_000.0),
                total_liabilities: Some(500_000.0),
                ..RawFinancials::default()
            },
            ..ValuationRequest::default()
        };

        let ValuationOutcome::Comprehensive(aggregate) = engine.run(&request).unwrap() else {
            panic!("expected comprehensive outcome");
        };
        assert_eq!(aggregate.methods_used, 1);
        assert!((aggregate.weights[&ValuationMethod::Nav] - 1.0).abs() < 1e-9);
        assert!((aggregate.recommended - 1_500_000.0).abs() < 1e-6);
        assert_eq!(aggregate.low_range, aggregate.high_range);
    }

    #[test]
    fn test_comprehensive_with_no_applicable_method() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: RawFinancials::default(),
            ..ValuationRequest::default()
        };

        let err = engine.run(&request).unwrap_err();
        assert_eq!(err, EngineError::NoApplicableMethod);
    }

    #[test]
    fn test_comprehensive_excludes_negative_nav_from_blend() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: RawFinancials {
                ebitda: Some(1_000_000.0),
                cash_flow: Some(500_000.0),
                total_assets: Some(400_000.0),
                total_liabilities: Some(900_000.0),
                ..RawFinancials::default()
            },
            industry: None,
            ..ValuationRequest::default()
        };

        let ValuationOutcome::Comprehensive(aggregate) = engine.run(&request).unwrap() else {
            panic!("expected comprehensive outcome");
        };
        // NAV ran but its negative value is excluded from the weights.
        assert_eq!(aggregate.methods.len(), 3);
        assert_eq!(aggregate.methods_used, 2);
        assert!(!aggregate.weights.contains_key(&ValuationMethod::Nav));
    }

    #[test]
    fn test_run_single_method_dispatch() {
        let engine = ValuationEngine::new();
        let mut request = make_test_request();
        request.method = ValuationMethod::Nav;
        request.nav_adjustments = vec![crate::valuation::types::NamedAdjustment {
            name: "Equipment revaluation".to_string(),
            amount: 200_000.0,
        }];

        let ValuationOutcome::Single(result) = engine.run(&request).unwrap() else {
            panic!("expected single outcome");
        };
        assert_eq!(result.method, ValuationMethod::Nav);
        assert!((result.recommended - 1_400_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_cca_without_industry_fails() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: make_test_financials(),
            method: ValuationMethod::Cca,
            industry: None,
            ..ValuationRequest::default()
        };

        let err = engine.run(&request).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MethodNotApplicable {
                method: ValuationMethod::Cca,
                ..
            }
        ));
    }

    #[test]
    fn test_run_manual_requires_multiple_and_type() {
        let engine = ValuationEngine::new();
        let mut request = make_test_request();
        request.method = ValuationMethod::Manual;

        let err = engine.run(&request).unwrap_err();
        assert!(matches!(err, EngineError::ManualMultipleInvalid { .. }));

        request.manual_multiple = Some(4.0);
        let err = engine.run(&request).unwrap_err();
        assert!(err.to_string().contains("multiple type"));

        request.manual_multiple_type = Some(MultipleBasis::EvEbitda);
        let ValuationOutcome::Single(result) = engine.run(&request).unwrap() else {
            panic!("expected single outcome");
        };
        assert!((result.recommended - 3_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_rejects_invalid_financials() {
        let engine = ValuationEngine::new();
        let request = ValuationRequest {
            financials: RawFinancials {
                revenue: Some(-5.0),
                ..RawFinancials::default()
            },
            ..ValuationRequest::default()
        };

        let err = engine.run(&request).unwrap_err();
        assert!(matches!(err, EngineError::InvalidValue { .. }));
    }
}
