//! ExitPath Valuation Engine
//!
//! This library estimates what a small business is worth and which exit
//! structure fits its owner. Several appraisal methods run side by side
//! and blend into a single weighted figure, and a strategic questionnaire
//! ranks fourteen exit structures by fit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     exitpath-engine (library)                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────────┐   │
//! │  │  Valuation    │  │  Multi-Year   │  │  Exit Strategy    │   │
//! │  │  Methods      │  │  Trend Engine │  │  Recommender      │   │
//! │  └───────────────┘  └───────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Method Blend
//! - Each applicable method (market multiples, DCF, capitalization, net
//!   assets) produces its own estimate
//! - Weights renormalize over the methods that actually produced value,
//!   so one missing input never zeroes the result
//! - A private-company discount haircuts market multiples
//!
//! ## Trend Analysis
//! - Two or more years of figures unlock growth-aware multiples
//! - CAGR, margins, and revenue volatility shift each multiple up or down
//! - Insights explain which factors moved the number
//!
//! ## Exit Fit
//! - Twenty strategic questions score fourteen exit structures
//! - Strategies above the viability bar are ranked first; otherwise the
//!   full field is ranked so callers always get an answer

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod exit;
pub mod inputs;
pub mod valuation;

pub use config::{BlendWeights, EngineConfig};
pub use error::{EngineError, InvalidValueKind, Result};
pub use exit::{recommend, score_responses, ExitRecommendations, ExitStrategy, QuizResponses};
pub use inputs::{FinancialInputs, IndustryMultiples, MultipleRange, RawFinancials};
pub use valuation::{
    AdvancedReport, AggregateValuation, MultiYearFinancials, ValuationEngine, ValuationMethod,
    ValuationOutcome, ValuationRequest,
};

/// Convenience imports for downstream crates.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{EngineError, Result};
    pub use crate::exit::{recommend, ExitRecommendations, QuestionId, QuizResponses};
    pub use crate::inputs::{IndustryMultiples, MultipleRange, RawFinancials};
    pub use crate::valuation::{
        AdvancedReport, MultiYearFinancials, ValuationEngine, ValuationOutcome, ValuationRequest,
        YearlyFigures,
    };
}
