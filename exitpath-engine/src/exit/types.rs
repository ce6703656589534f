//! Exit-strategy questionnaire and recommendation types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Strategies
// ============================================================================

/// The fourteen exit structures the scorer ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStrategy {
    StrategicSale,
    PeFullSale,
    PeRecap,
    IpoSpac,
    MergerEquals,
    Mbo,
    Esop,
    FamilySuccession,
    EmployeeCoop,
    MinoritySale,
    DividendRecap,
    RoyaltyLicensing,
    SpinOff,
    OrderlyLiquidation,
}

impl ExitStrategy {
    /// Every strategy, in catalog order.
    pub const ALL: [ExitStrategy; 14] = [
        Self::StrategicSale,
        Self::PeFullSale,
        Self::PeRecap,
        Self::IpoSpac,
        Self::MergerEquals,
        Self::Mbo,
        Self::Esop,
        Self::FamilySuccession,
        Self::EmployeeCoop,
        Self::MinoritySale,
        Self::DividendRecap,
        Self::RoyaltyLicensing,
        Self::SpinOff,
        Self::OrderlyLiquidation,
    ];
}

impl std::fmt::Display for ExitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(crate::exit::catalog::strategy_info(*self).name)
    }
}

// ============================================================================
// Questionnaire
// ============================================================================

/// The twenty questionnaire slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
    Q14,
    Q15,
    Q16,
    Q17,
    Q18,
    Q19,
    Q20,
}

impl QuestionId {
    /// Every question, in questionnaire order.
    pub const ALL: [QuestionId; 20] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
        Self::Q10,
        Self::Q11,
        Self::Q12,
        Self::Q13,
        Self::Q14,
        Self::Q15,
        Self::Q16,
        Self::Q17,
        Self::Q18,
        Self::Q19,
        Self::Q20,
    ];
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Answers keyed by question, holding the chosen option value.
///
/// Partial responses are valid: unanswered questions simply contribute no
/// points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponses {
    #[serde(flatten)]
    answers: BTreeMap<QuestionId, String>,
}

impl QuizResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one for the question.
    pub fn set(&mut self, question: QuestionId, answer: impl Into<String>) {
        self.answers.insert(question, answer.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, question: QuestionId, answer: impl Into<String>) -> Self {
        self.set(question, answer);
        self
    }

    pub fn answer(&self, question: QuestionId) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QuestionId::ALL.len()
    }

    /// Questions still without an answer, in order.
    pub fn missing(&self) -> Vec<QuestionId> {
        QuestionId::ALL
            .into_iter()
            .filter(|q| !self.answers.contains_key(q))
            .collect()
    }
}

// ============================================================================
// Results
// ============================================================================

/// Total points per strategy.
pub type StrategyScoreboard = BTreeMap<ExitStrategy, i32>;

/// One of the top recommendations, enriched with catalog detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStrategy {
    pub rank: usize,
    pub strategy: ExitStrategy,
    pub name: String,
    pub category: String,
    pub description: String,
    pub best_for: String,
    pub score: i32,
}

/// A scored strategy in the extended listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDetail {
    pub strategy: ExitStrategy,
    pub score: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub best_for: String,
}

/// Full scorer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRecommendations {
    /// Top three strategies, ranked.
    pub recommendations: Vec<RankedStrategy>,
    /// Up to ten ranked strategies with catalog detail. Covers only the
    /// viable set unless the fallback ranked the full field.
    pub detailed_results: Vec<StrategyDetail>,
    /// Every strategy's total, including non-viable ones.
    pub all_scores: StrategyScoreboard,
}

// ============================================================================
// Tests
// ============================================================================
