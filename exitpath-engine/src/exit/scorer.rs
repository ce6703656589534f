//! Questionnaire scoring and strategy ranking.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::exit::catalog::strategy_info;
use crate::exit::rules::{ScoreRule, SCORE_RULES};
use crate::exit::types::{
    ExitRecommendations, ExitStrategy, QuestionId, QuizResponses, RankedStrategy, StrategyDetail,
    StrategyScoreboard,
};

/// A strategy must score above this to count as viable.
const VIABILITY_THRESHOLD: i32 = 10;

/// How many strategies make the headline recommendation list.
const RECOMMENDATION_COUNT: usize = 3;

/// How many strategies are returned with full detail.
const DETAIL_COUNT: usize = 10;

static RULES_BY_QUESTION: Lazy<HashMap<QuestionId, Vec<&'static ScoreRule>>> = Lazy::new(|| {
    let mut index: HashMap<QuestionId, Vec<&'static ScoreRule>> = HashMap::new();
    for rule in SCORE_RULES {
        index.entry(rule.question).or_default().push(rule);
    }
    index
});

/// Compute the raw scoreboard for a set of responses.
///
/// Every strategy starts at zero. Unanswered questions and answer values
/// with no matching rule contribute nothing.
pub fn score_responses(responses: &QuizResponses) -> StrategyScoreboard {
    let mut scores: StrategyScoreboard = ExitStrategy::ALL.into_iter().map(|s| (s, 0)).collect();
    for question in QuestionId::ALL {
        let Some(answer) = responses.answer(question) else {
            continue;
        };
        let Some(rules) = RULES_BY_QUESTION.get(&question) else {
            continue;
        };
        let Some(rule) = rules.iter().find(|r| r.answer == answer) else {
            continue;
        };
        for (strategy, delta) in rule.adjustments {
            *scores.entry(*strategy).or_insert(0) += *delta;
        }
    }
    scores
}

/// Score responses and rank strategies into a recommendation report.
///
/// Strategies scoring above the viability bar are ranked first; if none
/// clears it the full field is ranked instead so callers always receive
/// recommendations. Ties keep strategy declaration order.
pub fn recommend(responses: &QuizResponses) -> ExitRecommendations {
    let scores = score_responses(responses);

    let mut sorted: Vec<(ExitStrategy, i32)> = scores.iter().map(|(s, v)| (*s, *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let viable: Vec<(ExitStrategy, i32)> = sorted
        .iter()
        .copied()
        .filter(|(_, score)| *score > VIABILITY_THRESHOLD)
        .collect();
    let ranked = if viable.is_empty() {
        debug!("No strategy cleared the viability bar, ranking all");
        sorted
    } else {
        viable
    };

    let recommendations = ranked
        .iter()
        .take(RECOMMENDATION_COUNT)
        .enumerate()
        .map(|(index, (strategy, score))| {
            let info = strategy_info(*strategy);
            RankedStrategy {
                rank: index + 1,
                strategy: *strategy,
                name: info.name.to_string(),
                category: info.category.to_string(),
                description: info.description.to_string(),
                best_for: info.best_for.to_string(),
                score: *score,
            }
        })
        .collect();

    let detailed_results = ranked
        .iter()
        .take(DETAIL_COUNT)
        .map(|(strategy, score)| {
            let info = strategy_info(*strategy);
            StrategyDetail {
                strategy: *strategy,
                score: *score,
                name: info.name.to_string(),
                category: info.category.to_string(),
                description: info.description.to_string(),
                best_for: info.best_for.to_string(),
            }
        })
        .collect();

    ExitRecommendations {
        recommendations,
        detailed_results,
        all_scores: scores,
    }
}

// ============================================================================
// Tests
// ============================================================================
