//! Property-based invariant tests.
//!
//! Invariants that must hold across the engine:
//! - Comprehensive blend weights always renormalize to one
//! - The recommended value never leaves the method range
//! - DCF values fall as the discount rate rises
//! - Normalization rejects bad input with typed errors, never panics
//! - Questionnaire scoring is insertion-order independent

use proptest::prelude::*;

use exitpath_engine::error::EngineError;
use exitpath_engine::exit::{catalog, score_responses, QuestionId, QuizResponses};
use exitpath_engine::inputs::RawFinancials;
use exitpath_engine::valuation::{
    MultiYearFinancials, ValuationEngine, ValuationMethod, ValuationOutcome, ValuationRequest,
    YearlyFigures,
};

fn comprehensive_request(financials: RawFinancials) -> ValuationRequest {
    ValuationRequest {
        financials,
        ..Default::default()
    }
}

// ============================================================================
// Blend Invariants
// ============================================================================

proptest! {
    #[test]
    fn blend_weights_sum_to_one(
        revenue in 0.0..20_000_000.0f64,
        ebitda in 0.0..5_000_000.0f64,
        total_assets in 0.0..10_000_000.0f64,
        total_liabilities in 0.0..10_000_000.0f64,
    ) {
        let engine = ValuationEngine::new();
        let request = comprehensive_request(RawFinancials {
            revenue: Some(revenue),
            ebitda: Some(ebitda),
            total_assets: Some(total_assets),
            total_liabilities: Some(total_liabilities),
            ..Default::default()
        });

        match engine.run(&request) {
            Ok(ValuationOutcome::Comprehensive(aggregate)) => {
                let total: f64 = aggregate.weights.values().sum();
                prop_assert!((total - 1.0).abs() < 1e-9);
                prop_assert!(aggregate.methods_used >= 1);

                let slack = 1e-6 * (1.0 + aggregate.high_range.abs());
                prop_assert!(aggregate.recommended >= aggregate.low_range - slack);
                prop_assert!(aggregate.recommended <= aggregate.high_range + slack);
            }
            Ok(ValuationOutcome::Single(_)) => {
                prop_assert!(false, "comprehensive request produced a single outcome");
            }
            Err(err) => {
                // Only an empty blend is a legal failure for clean inputs.
                prop_assert!(matches!(err, EngineError::NoApplicableMethod));
            }
        }
    }

    #[test]
    fn trend_blend_weights_sum_to_one(
        years in prop::collection::vec(
            (
                2015i32..2025,
                1_000.0..10_000_000.0f64,
                0.0..3_000_000.0f64,
                1_000.0..3_000_000.0f64,
            ),
            2..6
        )
    ) {
        let engine = ValuationEngine::new();
        let history = MultiYearFinancials {
            years: years
                .into_iter()
                .map(|(year, revenue, ebitda, sde)| YearlyFigures {
                    year,
                    revenue,
                    ebitda,
                    sde,
                    ..Default::default()
                })
                .collect(),
        };

        let report = engine.advanced(&history, None).unwrap();

        let total: f64 = report.weights.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);

        let slack = 1e-6 * (1.0 + report.valuation_range.high.abs());
        prop_assert!(report.weighted_valuation >= report.valuation_range.low - slack);
        prop_assert!(report.weighted_valuation <= report.valuation_range.high + slack);
    }
}

// ============================================================================
// DCF Invariants
// ============================================================================

proptest! {
    #[test]
    fn dcf_value_falls_as_discount_rate_rises(
        cash_flow in 10_000.0..5_000_000.0f64,
        low_rate in 0.05..0.5f64,
        spread in 0.02..0.4f64,
    ) {
        let high_rate = (low_rate + spread).min(0.95);
        prop_assume!(high_rate - low_rate > 0.01);

        let engine = ValuationEngine::new();
        let value_at = |rate: f64| {
            let request = ValuationRequest {
                financials: RawFinancials {
                    cash_flow: Some(cash_flow),
                    discount_rate: Some(rate),
                    ..Default::default()
                },
                method: ValuationMethod::Dcf,
                ..Default::default()
            };
            engine.run(&request).map(|o| o.recommended())
        };

        let cheap_money = value_at(low_rate).unwrap();
        let dear_money = value_at(high_rate).unwrap();
        prop_assert!(
            cheap_money > dear_money,
            "{cheap_money} at {low_rate} should exceed {dear_money} at {high_rate}"
        );
    }
}

// ============================================================================
// Normalization Totality
// ============================================================================

proptest! {
    #[test]
    fn arbitrary_floats_never_panic(
        revenue in any::<f64>(),
        ebitda in any::<f64>(),
        cash_flow in any::<f64>(),
        discount in any::<f64>(),
    ) {
        let engine = ValuationEngine::new();
        let request = comprehensive_request(RawFinancials {
            revenue: Some(revenue),
            ebitda: Some(ebitda),
            cash_flow: Some(cash_flow),
            private_company_discount: Some(discount),
            ..Default::default()
        });

        // Comprehensive mode absorbs per-method failures, so the only
        // errors that may surface are input rejection and the empty blend.
        if let Err(err) = engine.run(&request) {
            let recoverable = matches!(
                err,
                EngineError::InvalidValue { .. } | EngineError::NoApplicableMethod
            );
            prop_assert!(recoverable, "unexpected error: {}", err);
        }
    }
}

// ============================================================================
// Scoring Invariants
// ============================================================================

proptest! {
    #[test]
    fn scoring_ignores_insertion_order(
        picks in prop::collection::vec((0usize..20, 0usize..5), 0..20)
    ) {
        // Keep one answer per question so both insertion orders carry the
        // same final mapping.
        let mut seen = std::collections::BTreeSet::new();
        let answers: Vec<(QuestionId, &str)> = picks
            .into_iter()
            .filter(|(q, _)| seen.insert(*q))
            .map(|(q, o)| {
                let id = QuestionId::ALL[q];
                (id, catalog::question(id).options[o].value)
            })
            .collect();

        let mut forward = QuizResponses::new();
        for (question, answer) in &answers {
            forward.set(*question, *answer);
        }
        let mut reverse = QuizResponses::new();
        for (question, answer) in answers.iter().rev() {
            reverse.set(*question, *answer);
        }

        prop_assert_eq!(score_responses(&forward), score_responses(&reverse));
    }

    #[test]
    fn scoreboard_always_covers_every_strategy(
        picks in prop::collection::vec((0usize..20, 0usize..5), 0..20)
    ) {
        let mut responses = QuizResponses::new();
        for (q, o) in picks {
            let id = QuestionId::ALL[q];
            responses.set(id, catalog::question(id).options[o].value);
        }

        let scores = score_responses(&responses);
        prop_assert_eq!(scores.len(), 14);
    }
}
