//! Multi-method business valuation.
//!
//! Six single-method calculators (CCA, DCF, capitalization of earnings,
//! NAV, rule of thumb, manual multiple) plus a comprehensive mode that
//! blends the applicable methods under fixed weights, and a trend-aware
//! engine over multi-year history.
//!
//! [`ValuationEngine`] is the entry point; [`ValuationEngine::run`] takes a
//! [`ValuationRequest`] and dispatches.

pub mod advanced;
pub mod methods;
pub mod types;

mod aggregator;

pub use advanced::{
    AdvancedReport, FinancialSummary, GrowthMetrics, Insight, InsightKind, MultiYearFinancials,
    TrendMethod, TrendMethodValue, ValuationRange, YearlyFigures,
};
pub use methods::ValuationEngine;
pub use types::{
    AggregateValuation, MethodDetails, MethodResult, MultipleBasis, NamedAdjustment,
    ValuationMethod, ValuationOutcome, ValuationRequest,
};
