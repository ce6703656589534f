//! Exit strategy recommendation.
//!
//! A twenty-question strategic profile is scored against fourteen exit
//! structures. [`score_responses`] produces the raw scoreboard and
//! [`recommend`] turns it into a ranked report with catalog context.

pub mod catalog;
mod rules;
pub mod scorer;
pub mod types;

pub use catalog::{
    question, strategy_info, QuizOption, QuizQuestion, StrategyInfo, QUESTIONS, STRATEGIES,
};
pub use scorer::{recommend, score_responses};
pub use types::{
    ExitRecommendations, ExitStrategy, QuestionId, QuizResponses, RankedStrategy, StrategyDetail,
    StrategyScoreboard,
};
