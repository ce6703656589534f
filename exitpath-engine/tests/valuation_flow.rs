//! End-to-end integration tests for the valuation pipeline.
//!
//! Tests the complete request flow:
//! Raw financials → Normalization → Method dispatch → Blended outcome
//!
//! Fixtures model a profitable professional-services firm so every method
//! has something to work with.

use std::sync::Once;

use exitpath_engine::error::EngineError;
use exitpath_engine::inputs::{IndustryMultiples, MultipleRange, RawFinancials};
use exitpath_engine::valuation::types::{MethodDetails, MultipleBasis};
use exitpath_engine::valuation::{
    MultiYearFinancials, ValuationEngine, ValuationMethod, ValuationOutcome, ValuationRequest,
    YearlyFigures,
};

// ============================================================================
// Test Data Generators
// ============================================================================

static TRACING: Once = Once::new();

/// Install a test subscriber so engine spans and events render when a test
/// runs with --nocapture.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A profitable services firm with a clean balance sheet.
fn profitable_services_firm() -> RawFinancials {
    RawFinancials {
        revenue: Some(5_000_000.0),
        ebitda: Some(1_000_000.0),
        net_income: Some(600_000.0),
        cash_flow: Some(500_000.0),
        total_assets: Some(2_000_000.0),
        total_liabilities: Some(800_000.0),
        ..Default::default()
    }
}

fn services_industry() -> IndustryMultiples {
    IndustryMultiples {
        name: Some("Professional Services".to_string()),
        ev_ebitda: Some(MultipleRange::new(4.0, 6.0, 8.0)),
        ev_revenue: Some(MultipleRange::new(0.5, 1.0, 1.5)),
        pe: Some(MultipleRange::new(8.0, 12.0, 16.0)),
        rule_of_thumb: Some("1x annual revenue".to_string()),
        rule_of_thumb_multiplier: Some(1.0),
    }
}

fn growing_history() -> MultiYearFinancials {
    MultiYearFinancials {
        years: vec![
            YearlyFigures {
                year: 2021,
                revenue: 4_000_000.0,
                ebitda: 800_000.0,
                sde: 1_000_000.0,
                gross_profit: 2_400_000.0,
                total_assets: 2_000_000.0,
                total_liabilities: 800_000.0,
            },
            YearlyFigures {
                year: 2022,
                revenue: 4_500_000.0,
                ebitda: 900_000.0,
                sde: 1_100_000.0,
                gross_profit: 2_700_000.0,
                total_assets: 2_000_000.0,
                total_liabilities: 800_000.0,
            },
            YearlyFigures {
                year: 2023,
                revenue: 5_000_000.0,
                ebitda: 1_000_000.0,
                sde: 1_200_000.0,
                gross_profit: 3_000_000.0,
                total_assets: 2_000_000.0,
                total_liabilities: 800_000.0,
            },
        ],
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1.0,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Comprehensive Flow
// ============================================================================

#[test]
fn test_comprehensive_flow_blends_four_methods() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        industry: Some(services_industry()),
        ..Default::default()
    };

    let outcome = engine.run(&request).unwrap();
    let ValuationOutcome::Comprehensive(aggregate) = outcome else {
        panic!("comprehensive request must produce a comprehensive outcome");
    };

    assert_eq!(aggregate.methods_used, 4);
    assert_close(aggregate.recommended, 6_096_197.42);
    assert_close(aggregate.low_range, 1_200_000.0);
    assert_close(aggregate.high_range, 12_000_000.0);
    assert_close(aggregate.private_discount_applied, 0.25);

    let weight_total: f64 = aggregate.weights.values().sum();
    assert!((weight_total - 1.0).abs() < 1e-9);
}

#[test]
fn test_comprehensive_degrades_without_industry() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        ..Default::default()
    };

    let outcome = engine.run(&request).unwrap();
    let ValuationOutcome::Comprehensive(aggregate) = outcome else {
        panic!("comprehensive request must produce a comprehensive outcome");
    };

    // CCA needs industry multiples; DCF, capitalization, and NAV survive.
    assert_eq!(aggregate.methods_used, 3);
    assert!(!aggregate.weights.contains_key(&ValuationMethod::Cca));
    assert!(aggregate.recommended > 0.0);
}

#[test]
fn test_comprehensive_with_no_usable_financials() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest::default();

    let err = engine.run(&request).unwrap_err();
    assert!(matches!(err, EngineError::NoApplicableMethod));
    assert!(err.to_string().contains("at least revenue"));
}

// ============================================================================
// Single-Method Dispatch
// ============================================================================

#[test]
fn test_single_method_dispatch() {
    init_tracing();
    let engine = ValuationEngine::new();
    let base = ValuationRequest {
        financials: profitable_services_firm(),
        industry: Some(services_industry()),
        ..Default::default()
    };

    let nav = engine
        .run(&ValuationRequest {
            method: ValuationMethod::Nav,
            ..base.clone()
        })
        .unwrap();
    assert_close(nav.recommended(), 1_200_000.0);

    let dcf = engine
        .run(&ValuationRequest {
            method: ValuationMethod::Dcf,
            ..base.clone()
        })
        .unwrap();
    assert_close(dcf.recommended(), 5_717_706.92);

    let rule = engine
        .run(&ValuationRequest {
            method: ValuationMethod::RuleOfThumb,
            ..base
        })
        .unwrap();
    assert_close(rule.recommended(), 5_000_000.0);
}

#[test]
fn test_discount_toggle_changes_market_methods() {
    init_tracing();
    let engine = ValuationEngine::new();
    let discounted = ValuationRequest {
        financials: profitable_services_firm(),
        industry: Some(services_industry()),
        method: ValuationMethod::Cca,
        ..Default::default()
    };
    let undiscounted = ValuationRequest {
        apply_discount: false,
        ..discounted.clone()
    };

    let with_discount = engine.run(&discounted).unwrap();
    let without_discount = engine.run(&undiscounted).unwrap();

    assert_close(with_discount.recommended(), 4_500_000.0);
    assert_close(without_discount.recommended(), 6_000_000.0);
}

#[test]
fn test_manual_multiple_flow() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        method: ValuationMethod::Manual,
        manual_multiple: Some(4.0),
        manual_multiple_type: Some(MultipleBasis::EvEbitda),
        ..Default::default()
    };

    let outcome = engine.run(&request).unwrap();
    assert_close(outcome.recommended(), 3_000_000.0);

    let ValuationOutcome::Single(result) = outcome else {
        panic!("manual request must produce a single outcome");
    };
    let MethodDetails::Manual(details) = result.details else {
        panic!("manual result must carry manual details");
    };
    assert!(details.discount_applied);
    assert_close(details.metric_value, 1_000_000.0);
}

#[test]
fn test_manual_requires_multiple_and_basis() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        method: ValuationMethod::Manual,
        ..Default::default()
    };

    let err = engine.run(&request).unwrap_err();
    assert!(matches!(err, EngineError::ManualMultipleInvalid { .. }));
}

#[test]
fn test_cca_without_industry_is_rejected() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        method: ValuationMethod::Cca,
        ..Default::default()
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

// ============================================================================
// Validation Gate
// ============================================================================

#[test]
fn test_invalid_financials_rejected_before_dispatch() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: RawFinancials {
            revenue: Some(-1.0),
            ..Default::default()
        },
        ..Default::default()
    };

    let err = engine.run(&request).unwrap_err();
    assert!(matches!(err, EngineError::InvalidValue { .. }));
}

// ============================================================================
// JSON Boundary
// ============================================================================

#[test]
fn test_request_flows_from_json() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request: ValuationRequest = serde_json::from_str(
        r#"{"financials": {"ebitda": 1000000.0}, "method": "capitalization"}"#,
    )
    .unwrap();

    let outcome = engine.run(&request).unwrap();
    assert_close(outcome.recommended(), 4_000_000.0);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["mode"], "single");
    assert_eq!(json["method"], "capitalization");
}

#[test]
fn test_comprehensive_outcome_serializes_with_mode_tag() {
    init_tracing();
    let engine = ValuationEngine::new();
    let request = ValuationRequest {
        financials: profitable_services_firm(),
        industry: Some(services_industry()),
        ..Default::default()
    };

    let outcome = engine.run(&request).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["mode"], "comprehensive");
    assert_eq!(json["methods_used"], 4);
    assert!(json["weights"]["cca"].as_f64().is_some());
}

// ============================================================================
// Trend Analysis Flow
// ============================================================================

#[test]
fn test_trend_flow_with_industry_context() {
    init_tracing();
    let engine = ValuationEngine::new();
    let industry = services_industry();

    let report = engine.advanced(&growing_history(), Some(&industry)).unwrap();

    assert_eq!(report.years_analyzed, 3);
    assert!(report.weighted_valuation > 0.0);
    assert!(report.valuation_range.low <= report.valuation_range.high);

    let weight_total: f64 = report.weights.values().sum();
    assert!((weight_total - 1.0).abs() < 1e-9);

    let context = report.industry_context.expect("industry context");
    assert_eq!(context.name.as_deref(), Some("Professional Services"));
    let ev_ebitda = context.ev_ebitda.expect("ev_ebitda adjustment");
    assert_close(ev_ebitda.original, 6.0);
    assert_close(ev_ebitda.adjusted, 4.5);

    assert!(report.calculated_at <= chrono::Utc::now());
}

#[test]
fn test_trend_flow_requires_two_years() {
    init_tracing();
    let engine = ValuationEngine::new();
    let history = MultiYearFinancials {
        years: vec![YearlyFigures {
            year: 2023,
            revenue: 1_000_000.0,
            ..Default::default()
        }],
    };

    let err = engine.advanced(&history, None).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAssumptions { .. }));
    assert!(err.to_string().contains("at least 2 years"));
}
