//! Engine error taxonomy.
//!
//! Every failure the engine can produce is typed here. Bad numeric input is
//! rejected at the normalization gate before any calculator runs; per-method
//! applicability failures are recoverable and absorbed by the comprehensive
//! blend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::valuation::types::ValuationMethod;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Why a numeric input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidValueKind {
    /// NaN or infinite.
    NotANumber,
    /// Below zero where only non-negative figures make sense.
    Negative,
    /// A rate outside the [0, 1] range.
    OutOfPercentageRange,
}

impl std::fmt::Display for InvalidValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber => write!(f, "must be a valid number"),
            Self::Negative => write!(f, "must be non-negative"),
            Self::OutOfPercentageRange => write!(f, "must be between 0 and 1"),
        }
    }
}

/// Errors produced by the valuation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A numeric input failed validation at the normalization gate.
    #[error("{field} {kind}")]
    InvalidValue { field: String, kind: InvalidValueKind },

    /// A single calculator cannot run with the supplied inputs. Recovered by
    /// the comprehensive blend; surfaced when the method was requested
    /// directly.
    #[error("{method} is not applicable: {reason}")]
    MethodNotApplicable {
        method: ValuationMethod,
        reason: String,
    },

    /// Comprehensive mode found zero usable calculators.
    #[error("Unable to calculate valuation with provided data. Please provide at least revenue, EBITDA, or cash flow information.")]
    NoApplicableMethod,

    /// The manual method needs a positive multiple and a multiple type.
    #[error("Invalid manual multiple: {reason}")]
    ManualMultipleInvalid { reason: String },

    /// Assumptions that make the arithmetic meaningless, such as a discount
    /// rate at or below the terminal growth rate.
    #[error("Invalid valuation assumptions: {reason}")]
    InvalidAssumptions { reason: String },
}

impl From<EngineError> for exitpath_common::Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MethodNotApplicable { .. } => {
                exitpath_common::Error::Engine(err.to_string())
            }
            _ => exitpath_common::Error::InvalidInput(err.to_string()),
        }
    }
}
