//! Answer-to-score adjustment rules.
//!
//! Each rule maps one questionnaire answer to a set of score deltas. Not
//! every answer carries a rule; an unlisted answer leaves the scoreboard
//! untouched.

use crate::exit::types::{ExitStrategy, QuestionId};
use ExitStrategy::{
    DividendRecap, EmployeeCoop, Esop, FamilySuccession, IpoSpac, Mbo, MergerEquals, MinoritySale,
    OrderlyLiquidation, PeFullSale, PeRecap, RoyaltyLicensing, SpinOff, StrategicSale,
};
use QuestionId::{
    Q1, Q10, Q11, Q12, Q13, Q14, Q15, Q16, Q17, Q18, Q19, Q2, Q20, Q3, Q4, Q5, Q6, Q7, Q8, Q9,
};

/// Score adjustments triggered by one answer.
#[derive(Debug)]
pub(crate) struct ScoreRule {
    pub question: QuestionId,
    pub answer: &'static str,
    pub adjustments: &'static [(ExitStrategy, i32)],
}

/// The full rule table, grouped by question.
pub(crate) static SCORE_RULES: &[ScoreRule] = &[
    // Q1: primary exit goal
    ScoreRule {
        question: Q1,
        answer: "max_price",
        adjustments: &[(StrategicSale, 10), (PeFullSale, 8), (IpoSpac, 6)],
    },
    ScoreRule {
        question: Q1,
        answer: "preserve_legacy",
        adjustments: &[(Esop, 10), (FamilySuccession, 9), (EmployeeCoop, 8), (Mbo, 7)],
    },
    ScoreRule {
        question: Q1,
        answer: "support_team",
        adjustments: &[(Esop, 10), (EmployeeCoop, 9), (Mbo, 7)],
    },
    ScoreRule {
        question: Q1,
        answer: "quick_liquidity",
        adjustments: &[(StrategicSale, 9), (PeFullSale, 10), (DividendRecap, 7)],
    },
    ScoreRule {
        question: Q1,
        answer: "gradual_transition",
        adjustments: &[(PeRecap, 10), (MinoritySale, 9), (FamilySuccession, 7)],
    },
    // Q2: timeline
    ScoreRule {
        question: Q2,
        answer: "immediate",
        adjustments: &[(StrategicSale, 8), (DividendRecap, 7), (OrderlyLiquidation, 5)],
    },
    ScoreRule {
        question: Q2,
        answer: "near_term",
        adjustments: &[(PeFullSale, 8), (StrategicSale, 7), (Mbo, 6)],
    },
    ScoreRule {
        question: Q2,
        answer: "medium_term",
        adjustments: &[(PeRecap, 8), (MinoritySale, 7), (Esop, 7), (FamilySuccession, 6)],
    },
    ScoreRule {
        question: Q2,
        answer: "long_term",
        adjustments: &[(FamilySuccession, 9), (Esop, 8), (MinoritySale, 7), (IpoSpac, 6)],
    },
    ScoreRule {
        question: Q2,
        answer: "flexible",
        adjustments: &[(StrategicSale, 3), (PeFullSale, 3), (Mbo, 3), (MinoritySale, 3)],
    },
    // Q3: post-transaction involvement
    ScoreRule {
        question: Q3,
        answer: "not_important",
        adjustments: &[(StrategicSale, 8), (PeFullSale, 7), (OrderlyLiquidation, 5)],
    },
    ScoreRule {
        question: Q3,
        answer: "short_transition",
        adjustments: &[(PeFullSale, 8), (StrategicSale, 7), (Mbo, 6)],
    },
    ScoreRule {
        question: Q3,
        answer: "moderate",
        adjustments: &[(PeRecap, 9), (MinoritySale, 8), (FamilySuccession, 6)],
    },
    ScoreRule {
        question: Q3,
        answer: "very_important",
        adjustments: &[
            (PeRecap, 10),
            (MinoritySale, 9),
            (FamilySuccession, 8),
            (RoyaltyLicensing, 7),
        ],
    },
    ScoreRule {
        question: Q3,
        answer: "advisory",
        adjustments: &[(Mbo, 8), (Esop, 7), (FamilySuccession, 6)],
    },
    // Q4: revenue range
    ScoreRule {
        question: Q4,
        answer: "under_1m",
        adjustments: &[
            (FamilySuccession, 6),
            (Mbo, 5),
            (OrderlyLiquidation, 4),
            (IpoSpac, -10),
            (PeFullSale, -3),
        ],
    },
    ScoreRule {
        question: Q4,
        answer: "1m_5m",
        adjustments: &[
            (Mbo, 7),
            (StrategicSale, 6),
            (FamilySuccession, 5),
            (Esop, 5),
            (IpoSpac, -8),
        ],
    },
    ScoreRule {
        question: Q4,
        answer: "5m_20m",
        adjustments: &[
            (PeFullSale, 8),
            (StrategicSale, 8),
            (Esop, 7),
            (PeRecap, 6),
            (Mbo, 6),
        ],
    },
    ScoreRule {
        question: Q4,
        answer: "20m_50m",
        adjustments: &[
            (PeFullSale, 10),
            (StrategicSale, 9),
            (PeRecap, 8),
            (Esop, 7),
            (IpoSpac, 4),
        ],
    },
    ScoreRule {
        question: Q4,
        answer: "over_50m",
        adjustments: &[
            (StrategicSale, 10),
            (PeFullSale, 9),
            (IpoSpac, 8),
            (MergerEquals, 7),
            (PeRecap, 7),
        ],
    },
    // Q5: EBITDA margin
    ScoreRule {
        question: Q5,
        answer: "negative",
        adjustments: &[
            (OrderlyLiquidation, 8),
            (SpinOff, 5),
            (StrategicSale, -5),
            (PeFullSale, -5),
            (PeRecap, -5),
            (Mbo, -5),
            (Esop, -5),
        ],
    },
    ScoreRule {
        question: Q5,
        answer: "low",
        adjustments: &[(StrategicSale, 5), (SpinOff, 4), (MinoritySale, 4), (PeFullSale, -2)],
    },
    ScoreRule {
        question: Q5,
        answer: "moderate",
        adjustments: &[(PeFullSale, 7), (StrategicSale, 7), (Mbo, 6), (Esop, 6)],
    },
    ScoreRule {
        question: Q5,
        answer: "strong",
        adjustments: &[
            (PeFullSale, 10),
            (StrategicSale, 9),
            (PeRecap, 8),
            (Esop, 8),
            (DividendRecap, 7),
        ],
    },
    ScoreRule {
        question: Q5,
        answer: "very_strong",
        adjustments: &[
            (StrategicSale, 10),
            (PeFullSale, 10),
            (DividendRecap, 9),
            (PeRecap, 9),
            (Esop, 8),
        ],
    },
    // Q6: management depth
    ScoreRule {
        question: Q6,
        answer: "highly_capable",
        adjustments: &[(Mbo, 10), (Esop, 9), (PeFullSale, 8), (StrategicSale, 7)],
    },
    ScoreRule {
        question: Q6,
        answer: "mostly_capable",
        adjustments: &[(Mbo, 7), (Esop, 6), (PeRecap, 7), (MinoritySale, 6)],
    },
    ScoreRule {
        question: Q6,
        answer: "developing",
        adjustments: &[
            (PeRecap, 6),
            (MinoritySale, 6),
            (FamilySuccession, 5),
            (Mbo, -3),
            (Esop, -3),
        ],
    },
    ScoreRule {
        question: Q6,
        answer: "limited",
        adjustments: &[
            (StrategicSale, 5),
            (FamilySuccession, 4),
            (Mbo, -7),
            (Esop, -7),
            (PeFullSale, -3),
        ],
    },
    ScoreRule {
        question: Q6,
        answer: "none",
        adjustments: &[
            (StrategicSale, 6),
            (OrderlyLiquidation, 5),
            (Mbo, -10),
            (Esop, -10),
            (PeFullSale, -5),
        ],
    },
    // Q7: internal successor
    ScoreRule {
        question: Q7,
        answer: "yes_ready",
        adjustments: &[(FamilySuccession, 10), (Mbo, 7)],
    },
    ScoreRule {
        question: Q7,
        answer: "yes_training",
        adjustments: &[(FamilySuccession, 8), (Mbo, 5), (MinoritySale, 5)],
    },
    ScoreRule {
        question: Q7,
        answer: "maybe",
        adjustments: &[(FamilySuccession, 5), (Mbo, 4)],
    },
    ScoreRule {
        question: Q7,
        answer: "no",
        adjustments: &[(StrategicSale, 5), (PeFullSale, 5), (Esop, 4)],
    },
    ScoreRule {
        question: Q7,
        answer: "not_interested",
        adjustments: &[
            (StrategicSale, 6),
            (PeFullSale, 6),
            (Esop, 5),
            (FamilySuccession, -10),
        ],
    },
    // Q8: culture preservation
    ScoreRule {
        question: Q8,
        answer: "critical",
        adjustments: &[
            (Esop, 10),
            (EmployeeCoop, 9),
            (FamilySuccession, 7),
            (Mbo, 7),
            (StrategicSale, -5),
        ],
    },
    ScoreRule {
        question: Q8,
        answer: "very_important",
        adjustments: &[(Esop, 8), (Mbo, 7), (FamilySuccession, 6), (PeRecap, 5)],
    },
    ScoreRule {
        question: Q8,
        answer: "somewhat_important",
        adjustments: &[(Esop, 5), (Mbo, 5), (PeFullSale, 3)],
    },
    ScoreRule {
        question: Q8,
        answer: "not_priority",
        adjustments: &[(StrategicSale, 4), (PeFullSale, 4)],
    },
    ScoreRule {
        question: Q8,
        answer: "indifferent",
        adjustments: &[(StrategicSale, 5), (PeFullSale, 5), (OrderlyLiquidation, 3)],
    },
    // Q9: customer concentration
    ScoreRule {
        question: Q9,
        answer: "highly_diversified",
        adjustments: &[(PeFullSale, 8), (StrategicSale, 7), (Esop, 7), (IpoSpac, 6)],
    },
    ScoreRule {
        question: Q9,
        answer: "diversified",
        adjustments: &[(PeFullSale, 7), (StrategicSale, 6), (Esop, 6), (Mbo, 6)],
    },
    ScoreRule {
        question: Q9,
        answer: "moderate",
        adjustments: &[(StrategicSale, 5), (PeRecap, 5), (Mbo, 4)],
    },
    ScoreRule {
        question: Q9,
        answer: "concentrated",
        adjustments: &[(StrategicSale, 6), (MinoritySale, 4), (PeFullSale, -3), (Esop, -3)],
    },
    ScoreRule {
        question: Q9,
        answer: "highly_concentrated",
        adjustments: &[
            (StrategicSale, 5),
            (OrderlyLiquidation, 3),
            (PeFullSale, -5),
            (Esop, -5),
            (Mbo, -4),
        ],
    },
    // Q10: recurring revenue
    ScoreRule {
        question: Q10,
        answer: "high_recurring",
        adjustments: &[(PeFullSale, 10), (StrategicSale, 8), (Esop, 8), (DividendRecap, 7)],
    },
    ScoreRule {
        question: Q10,
        answer: "moderate_recurring",
        adjustments: &[(PeFullSale, 7), (StrategicSale, 6), (Esop, 6), (Mbo, 6)],
    },
    ScoreRule {
        question: Q10,
        answer: "some_recurring",
        adjustments: &[(StrategicSale, 5), (PeRecap, 5), (Mbo, 4)],
    },
    ScoreRule {
        question: Q10,
        answer: "low_recurring",
        adjustments: &[(StrategicSale, 4), (MinoritySale, 3), (PeFullSale, -2), (Esop, -2)],
    },
    ScoreRule {
        question: Q10,
        answer: "project_based",
        adjustments: &[
            (StrategicSale, 3),
            (OrderlyLiquidation, 2),
            (PeFullSale, -3),
            (Esop, -4),
        ],
    },
    // Q11: debt service capacity
    ScoreRule {
        question: Q11,
        answer: "strong",
        adjustments: &[(Mbo, 9), (Esop, 9), (DividendRecap, 8), (PeRecap, 7)],
    },
    ScoreRule {
        question: Q11,
        answer: "moderate",
        adjustments: &[(Mbo, 6), (Esop, 6), (DividendRecap, 5)],
    },
    ScoreRule {
        question: Q11,
        answer: "limited",
        adjustments: &[
            (StrategicSale, 4),
            (PeFullSale, 3),
            (Mbo, -3),
            (Esop, -3),
            (DividendRecap, -5),
        ],
    },
    ScoreRule {
        question: Q11,
        answer: "none",
        adjustments: &[
            (StrategicSale, 4),
            (FamilySuccession, 3),
            (Mbo, -7),
            (Esop, -7),
            (DividendRecap, -10),
        ],
    },
    ScoreRule {
        question: Q11,
        answer: "uncertain",
        adjustments: &[(StrategicSale, 2), (MinoritySale, 2)],
    },
    // Q12: seller financing appetite
    ScoreRule {
        question: Q12,
        answer: "no_cash_only",
        adjustments: &[
            (StrategicSale, 7),
            (PeFullSale, 7),
            (DividendRecap, 6),
            (Mbo, -5),
            (FamilySuccession, -3),
        ],
    },
    ScoreRule {
        question: Q12,
        answer: "small_portion",
        adjustments: &[(PeFullSale, 5), (StrategicSale, 4), (Mbo, 3)],
    },
    ScoreRule {
        question: Q12,
        answer: "moderate",
        adjustments: &[(Mbo, 7), (FamilySuccession, 6), (PeFullSale, 4)],
    },
    ScoreRule {
        question: Q12,
        answer: "substantial",
        adjustments: &[(Mbo, 9), (FamilySuccession, 8), (Esop, 5)],
    },
    ScoreRule {
        question: Q12,
        answer: "flexible",
        adjustments: &[(Mbo, 10), (FamilySuccession, 9), (Esop, 7), (EmployeeCoop, 6)],
    },
    // Q13: strategic assets
    ScoreRule {
        question: Q13,
        answer: "strong_ip",
        adjustments: &[
            (StrategicSale, 10),
            (IpoSpac, 7),
            (RoyaltyLicensing, 10),
            (MinoritySale, 6),
        ],
    },
    ScoreRule {
        question: Q13,
        answer: "proprietary",
        adjustments: &[
            (StrategicSale, 9),
            (PeFullSale, 7),
            (RoyaltyLicensing, 8),
            (MinoritySale, 6),
        ],
    },
    ScoreRule {
        question: Q13,
        answer: "strategic_assets",
        adjustments: &[(StrategicSale, 9), (MergerEquals, 6), (PeFullSale, 6)],
    },
    ScoreRule {
        question: Q13,
        answer: "some",
        adjustments: &[(StrategicSale, 5), (PeFullSale, 4)],
    },
    ScoreRule {
        question: Q13,
        answer: "commodity",
        adjustments: &[(Mbo, 4), (Esop, 4), (OrderlyLiquidation, 3), (StrategicSale, -3)],
    },
    // Q14: scalability
    ScoreRule {
        question: Q14,
        answer: "highly_scalable",
        adjustments: &[
            (IpoSpac, 10),
            (PeRecap, 9),
            (MinoritySale, 9),
            (StrategicSale, 7),
            (PeFullSale, 7),
        ],
    },
    ScoreRule {
        question: Q14,
        answer: "moderately_scalable",
        adjustments: &[(PeRecap, 7), (MinoritySale, 7), (StrategicSale, 6), (PeFullSale, 6)],
    },
    ScoreRule {
        question: Q14,
        answer: "steady_growth",
        adjustments: &[(Mbo, 6), (Esop, 6), (FamilySuccession, 5), (PeFullSale, 4)],
    },
    ScoreRule {
        question: Q14,
        answer: "mature",
        adjustments: &[(StrategicSale, 5), (DividendRecap, 5), (Mbo, 4), (OrderlyLiquidation, 3)],
    },
    ScoreRule {
        question: Q14,
        answer: "declining",
        adjustments: &[
            (OrderlyLiquidation, 8),
            (StrategicSale, 4),
            (IpoSpac, -5),
            (PeRecap, -5),
            (MinoritySale, -5),
            (PeFullSale, -5),
        ],
    },
    // Q15: strategic buyer landscape ("dont_know" carries no rule)
    ScoreRule {
        question: Q15,
        answer: "multiple_strategic",
        adjustments: &[(StrategicSale, 10), (MergerEquals, 7)],
    },
    ScoreRule {
        question: Q15,
        answer: "some_strategic",
        adjustments: &[(StrategicSale, 8), (MergerEquals, 5)],
    },
    ScoreRule {
        question: Q15,
        answer: "maybe",
        adjustments: &[(StrategicSale, 5), (PeFullSale, 3)],
    },
    ScoreRule {
        question: Q15,
        answer: "unlikely",
        adjustments: &[(Mbo, 5), (Esop, 5), (FamilySuccession, 4), (StrategicSale, -5)],
    },
    // Q16: diligence readiness
    ScoreRule {
        question: Q16,
        answer: "full_scrutiny",
        adjustments: &[(StrategicSale, 8), (PeFullSale, 8), (IpoSpac, 6)],
    },
    ScoreRule {
        question: Q16,
        answer: "standard",
        adjustments: &[(StrategicSale, 6), (PeFullSale, 6), (Mbo, 5)],
    },
    ScoreRule {
        question: Q16,
        answer: "light_preferred",
        adjustments: &[(FamilySuccession, 6), (Mbo, 5), (MinoritySale, 4)],
    },
    ScoreRule {
        question: Q16,
        answer: "concerns",
        adjustments: &[(FamilySuccession, 5), (Mbo, 4), (StrategicSale, -3), (PeFullSale, -3)],
    },
    ScoreRule {
        question: Q16,
        answer: "significant_concerns",
        adjustments: &[
            (OrderlyLiquidation, 4),
            (FamilySuccession, 3),
            (StrategicSale, -5),
            (PeFullSale, -5),
            (IpoSpac, -5),
            (Esop, -5),
        ],
    },
    // Q17: partner vs outright sale
    ScoreRule {
        question: Q17,
        answer: "prefer_partner",
        adjustments: &[(PeRecap, 10), (MinoritySale, 10), (StrategicSale, -5), (PeFullSale, -5)],
    },
    ScoreRule {
        question: Q17,
        answer: "open",
        adjustments: &[(PeRecap, 7), (MinoritySale, 7), (StrategicSale, 3), (PeFullSale, 3)],
    },
    ScoreRule {
        question: Q17,
        answer: "prefer_full_sale",
        adjustments: &[(StrategicSale, 7), (PeFullSale, 7), (Mbo, 5)],
    },
    ScoreRule {
        question: Q17,
        answer: "full_sale_only",
        adjustments: &[
            (StrategicSale, 9),
            (PeFullSale, 9),
            (Mbo, 7),
            (Esop, 7),
            (PeRecap, -5),
            (MinoritySale, -5),
        ],
    },
    ScoreRule {
        question: Q17,
        answer: "uncertain",
        adjustments: &[(PeRecap, 2), (MinoritySale, 2), (StrategicSale, 2)],
    },
    // Q18: tax sensitivity ("minor" carries no rule)
    ScoreRule {
        question: Q18,
        answer: "critical",
        adjustments: &[(Esop, 9), (FamilySuccession, 8), (PeRecap, 5)],
    },
    ScoreRule {
        question: Q18,
        answer: "very_important",
        adjustments: &[(Esop, 7), (FamilySuccession, 6), (PeRecap, 4)],
    },
    ScoreRule {
        question: Q18,
        answer: "important",
        adjustments: &[(Esop, 5), (FamilySuccession, 4)],
    },
    ScoreRule {
        question: Q18,
        answer: "not_concerned",
        adjustments: &[(StrategicSale, 3), (PeFullSale, 3)],
    },
    // Q19: post-transaction risk tolerance
    ScoreRule {
        question: Q19,
        answer: "no_tolerance",
        adjustments: &[
            (StrategicSale, 8),
            (PeFullSale, 8),
            (DividendRecap, 6),
            (PeRecap, -5),
            (MinoritySale, -3),
        ],
    },
    ScoreRule {
        question: Q19,
        answer: "minimal",
        adjustments: &[(PeFullSale, 6), (StrategicSale, 6), (Mbo, 4)],
    },
    ScoreRule {
        question: Q19,
        answer: "moderate",
        adjustments: &[(PeRecap, 7), (MinoritySale, 6), (Mbo, 5)],
    },
    ScoreRule {
        question: Q19,
        answer: "high",
        adjustments: &[(PeRecap, 9), (MinoritySale, 9), (IpoSpac, 6)],
    },
    ScoreRule {
        question: Q19,
        answer: "entrepreneur",
        adjustments: &[(MinoritySale, 10), (PeRecap, 10), (IpoSpac, 8), (RoyaltyLicensing, 7)],
    },
    // Q20: employee benefit
    ScoreRule {
        question: Q20,
        answer: "critical_priority",
        adjustments: &[(Esop, 10), (EmployeeCoop, 10), (Mbo, 7)],
    },
    ScoreRule {
        question: Q20,
        answer: "very_important",
        adjustments: &[(Esop, 8), (EmployeeCoop, 7), (Mbo, 6)],
    },
    ScoreRule {
        question: Q20,
        answer: "somewhat_important",
        adjustments: &[(Esop, 5), (Mbo, 4)],
    },
    ScoreRule {
        question: Q20,
        answer: "not_priority",
        adjustments: &[(StrategicSale, 3), (PeFullSale, 3)],
    },
    ScoreRule {
        question: Q20,
        answer: "no_employees",
        adjustments: &[
            (FamilySuccession, 4),
            (StrategicSale, 3),
            (Esop, -10),
            (EmployeeCoop, -10),
            (Mbo, -5),
        ],
    },
];

// ============================================================================
// Tests
// ============================================================================
