//! Questionnaire and strategy reference catalogs.
//!
//! Static data consumed by the scorer and exposed to callers that render
//! the questionnaire or explain a recommendation.

use serde::Serialize;

use crate::exit::types::{ExitStrategy, QuestionId};

/// One selectable answer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizOption {
    /// Stable key recorded in [`QuizResponses`](crate::exit::QuizResponses).
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// One questionnaire entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: [QuizOption; 5],
}

/// Catalog entry describing one exit structure.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StrategyInfo {
    pub strategy: ExitStrategy,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
}

/// Look up the catalog entry for a strategy.
pub fn strategy_info(strategy: ExitStrategy) -> &'static StrategyInfo {
    &STRATEGIES[strategy as usize]
}

/// Look up a questionnaire entry.
pub fn question(id: QuestionId) -> &'static QuizQuestion {
    &QUESTIONS[id as usize]
}

// ============================================================================
// Questionnaire
// ============================================================================

/// The twenty strategic questions, in presentation order.
pub static QUESTIONS: [QuizQuestion; 20] = [
    QuizQuestion {
        id: QuestionId::Q1,
        prompt: "What is your primary goal for exiting your business?",
        options: [
            QuizOption {
                value: "max_price",
                label: "Maximize sale price",
            },
            QuizOption {
                value: "preserve_legacy",
                label: "Preserve company legacy and culture",
            },
            QuizOption {
                value: "support_team",
                label: "Support and reward my team",
            },
            QuizOption {
                value: "quick_liquidity",
                label: "Quick liquidity/cash out",
            },
            QuizOption {
                value: "gradual_transition",
                label: "Gradual transition while staying involved",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q2,
        prompt: "What is your ideal timeline for exiting?",
        options: [
            QuizOption {
                value: "immediate",
                label: "As soon as possible (0-6 months)",
            },
            QuizOption {
                value: "near_term",
                label: "Near term (6-18 months)",
            },
            QuizOption {
                value: "medium_term",
                label: "Medium term (1-3 years)",
            },
            QuizOption {
                value: "long_term",
                label: "Long term (3-5+ years)",
            },
            QuizOption {
                value: "flexible",
                label: "Flexible, depends on the opportunity",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q3,
        prompt: "How important is staying involved post-transaction?",
        options: [
            QuizOption {
                value: "not_important",
                label: "Not important - I want a clean break",
            },
            QuizOption {
                value: "short_transition",
                label: "Short transition period (3-12 months)",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate involvement (1-3 years)",
            },
            QuizOption {
                value: "very_important",
                label: "Very important - I want to stay actively involved",
            },
            QuizOption {
                value: "advisory",
                label: "Advisory/board role only",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q4,
        prompt: "What is your annual revenue range?",
        options: [
            QuizOption {
                value: "under_1m",
                label: "Under $1M",
            },
            QuizOption {
                value: "1m_5m",
                label: "$1M - $5M",
            },
            QuizOption {
                value: "5m_20m",
                label: "$5M - $20M",
            },
            QuizOption {
                value: "20m_50m",
                label: "$20M - $50M",
            },
            QuizOption {
                value: "over_50m",
                label: "Over $50M",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q5,
        prompt: "What is your EBITDA margin?",
        options: [
            QuizOption {
                value: "negative",
                label: "Negative or break-even",
            },
            QuizOption {
                value: "low",
                label: "Low (0-10%)",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate (10-20%)",
            },
            QuizOption {
                value: "strong",
                label: "Strong (20-30%)",
            },
            QuizOption {
                value: "very_strong",
                label: "Very strong (30%+)",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q6,
        prompt: "Do you have a capable management team that can run the business without you?",
        options: [
            QuizOption {
                value: "highly_capable",
                label: "Yes, highly capable and ready",
            },
            QuizOption {
                value: "mostly_capable",
                label: "Mostly, with some training/support",
            },
            QuizOption {
                value: "developing",
                label: "Team is developing but not ready yet",
            },
            QuizOption {
                value: "limited",
                label: "Limited - I am heavily involved in operations",
            },
            QuizOption {
                value: "none",
                label: "No management team beyond me",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q7,
        prompt: "Is there a family member or internal successor interested in taking over?",
        options: [
            QuizOption {
                value: "yes_ready",
                label: "Yes, and they are ready now",
            },
            QuizOption {
                value: "yes_training",
                label: "Yes, but they need more training/experience",
            },
            QuizOption {
                value: "maybe",
                label: "Maybe, still exploring this option",
            },
            QuizOption {
                value: "no",
                label: "No clear internal successor",
            },
            QuizOption {
                value: "not_interested",
                label: "Family/team not interested in taking over",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q8,
        prompt: "How important is preserving your company culture and employee jobs?",
        options: [
            QuizOption {
                value: "critical",
                label: "Critical - top priority",
            },
            QuizOption {
                value: "very_important",
                label: "Very important",
            },
            QuizOption {
                value: "somewhat_important",
                label: "Somewhat important",
            },
            QuizOption {
                value: "not_priority",
                label: "Not a priority",
            },
            QuizOption {
                value: "indifferent",
                label: "Indifferent - focused on financial outcome",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q9,
        prompt: "What is your customer concentration like?",
        options: [
            QuizOption {
                value: "highly_diversified",
                label: "Highly diversified (no customer >5%)",
            },
            QuizOption {
                value: "diversified",
                label: "Diversified (largest customer 5-10%)",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate (largest customer 10-25%)",
            },
            QuizOption {
                value: "concentrated",
                label: "Concentrated (largest customer 25-50%)",
            },
            QuizOption {
                value: "highly_concentrated",
                label: "Highly concentrated (largest customer >50%)",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q10,
        prompt: "Does your business have strong recurring revenue or long-term contracts?",
        options: [
            QuizOption {
                value: "high_recurring",
                label: "Yes, 80%+ recurring/contracted revenue",
            },
            QuizOption {
                value: "moderate_recurring",
                label: "Moderate, 50-80% recurring",
            },
            QuizOption {
                value: "some_recurring",
                label: "Some recurring, 25-50%",
            },
            QuizOption {
                value: "low_recurring",
                label: "Low recurring, <25%",
            },
            QuizOption {
                value: "project_based",
                label: "Mostly project-based/one-time sales",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q11,
        prompt: "How much cash flow could the business support for debt service?",
        options: [
            QuizOption {
                value: "strong",
                label: "Strong - could service significant debt (2-3x EBITDA+)",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate - some debt capacity (1-2x EBITDA)",
            },
            QuizOption {
                value: "limited",
                label: "Limited - minimal debt capacity",
            },
            QuizOption {
                value: "none",
                label: "None - cash flow too variable",
            },
            QuizOption {
                value: "uncertain",
                label: "Uncertain - need to analyze",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q12,
        prompt: "Would you be willing to accept seller financing or an earn-out?",
        options: [
            QuizOption {
                value: "no_cash_only",
                label: "No - I need all cash at closing",
            },
            QuizOption {
                value: "small_portion",
                label: "Maybe a small portion (10-20%)",
            },
            QuizOption {
                value: "moderate",
                label: "Yes, moderate amount (20-40%)",
            },
            QuizOption {
                value: "substantial",
                label: "Yes, substantial (40-60%)",
            },
            QuizOption {
                value: "flexible",
                label: "Very flexible - helps get the deal done",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q13,
        prompt: "Does your business have unique IP, technology, or strategic assets?",
        options: [
            QuizOption {
                value: "strong_ip",
                label: "Yes, strong patents/IP portfolio",
            },
            QuizOption {
                value: "proprietary",
                label: "Yes, proprietary technology/processes",
            },
            QuizOption {
                value: "strategic_assets",
                label: "Yes, valuable customer relationships or strategic position",
            },
            QuizOption {
                value: "some",
                label: "Some differentiation but not strongly protected",
            },
            QuizOption {
                value: "commodity",
                label: "No, relatively commodity business",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q14,
        prompt: "How scalable is your business model?",
        options: [
            QuizOption {
                value: "highly_scalable",
                label: "Highly scalable - can grow rapidly with capital",
            },
            QuizOption {
                value: "moderately_scalable",
                label: "Moderately scalable with some investment",
            },
            QuizOption {
                value: "steady_growth",
                label: "Steady growth potential, not rapid scale",
            },
            QuizOption {
                value: "mature",
                label: "Mature/stable - limited growth potential",
            },
            QuizOption {
                value: "declining",
                label: "Declining market or business",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q15,
        prompt: "Are there strategic buyers (competitors, suppliers, customers) who might want your \
                 business?",
        options: [
            QuizOption {
                value: "multiple_strategic",
                label: "Yes, multiple obvious strategic buyers",
            },
            QuizOption {
                value: "some_strategic",
                label: "Yes, a few potential strategic buyers",
            },
            QuizOption {
                value: "maybe",
                label: "Maybe, would need to explore",
            },
            QuizOption {
                value: "unlikely",
                label: "Unlikely - niche business",
            },
            QuizOption {
                value: "dont_know",
                label: "Don't know",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q16,
        prompt: "What level of due diligence scrutiny are you comfortable with?",
        options: [
            QuizOption {
                value: "full_scrutiny",
                label: "Full scrutiny - books are clean and ready",
            },
            QuizOption {
                value: "standard",
                label: "Standard diligence - generally ready",
            },
            QuizOption {
                value: "light_preferred",
                label: "Prefer lighter diligence process",
            },
            QuizOption {
                value: "concerns",
                label: "Have concerns - some cleanup needed",
            },
            QuizOption {
                value: "significant_concerns",
                label: "Significant concerns - major cleanup needed",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q17,
        prompt: "Are you open to taking on a financial/growth partner versus selling outright?",
        options: [
            QuizOption {
                value: "prefer_partner",
                label: "Yes, prefer this - want to grow and exit later",
            },
            QuizOption {
                value: "open",
                label: "Open to it if terms are right",
            },
            QuizOption {
                value: "prefer_full_sale",
                label: "Prefer full sale but would consider",
            },
            QuizOption {
                value: "full_sale_only",
                label: "No, want full exit only",
            },
            QuizOption {
                value: "uncertain",
                label: "Uncertain - need to learn more",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q18,
        prompt: "How important are tax considerations in your exit strategy?",
        options: [
            QuizOption {
                value: "critical",
                label: "Critical - want to maximize after-tax proceeds",
            },
            QuizOption {
                value: "very_important",
                label: "Very important factor",
            },
            QuizOption {
                value: "important",
                label: "Important but not primary driver",
            },
            QuizOption {
                value: "minor",
                label: "Minor consideration",
            },
            QuizOption {
                value: "not_concerned",
                label: "Not concerned - focused on gross proceeds",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q19,
        prompt: "What is your tolerance for continued financial risk post-transaction?",
        options: [
            QuizOption {
                value: "no_tolerance",
                label: "None - want to de-risk completely",
            },
            QuizOption {
                value: "minimal",
                label: "Minimal - small earn-out ok",
            },
            QuizOption {
                value: "moderate",
                label: "Moderate - willing to keep some upside exposure",
            },
            QuizOption {
                value: "high",
                label: "High - comfortable with significant upside bet",
            },
            QuizOption {
                value: "entrepreneur",
                label: "Very high - entrepreneur mindset",
            },
        ],
    },
    QuizQuestion {
        id: QuestionId::Q20,
        prompt: "Do you have a strong relationship with your employees and want them to benefit \
                 from the exit?",
        options: [
            QuizOption {
                value: "critical_priority",
                label: "Yes, critical priority - want them to share in success",
            },
            QuizOption {
                value: "very_important",
                label: "Very important - would like to include them",
            },
            QuizOption {
                value: "somewhat_important",
                label: "Somewhat important",
            },
            QuizOption {
                value: "not_priority",
                label: "Not a priority - focused on my exit",
            },
            QuizOption {
                value: "no_employees",
                label: "Solo or very small team",
            },
        ],
    },
];

// ============================================================================
// Strategies
// ============================================================================

/// Catalog of the fourteen exit structures, indexed by [`ExitStrategy`]
/// discriminant.
pub static STRATEGIES: [StrategyInfo; 14] = [
    StrategyInfo {
        strategy: ExitStrategy::StrategicSale,
        name: "Strategic Sale (Competitor/Supplier/Customer)",
        category: "External - Full Exit",
        description: "Highest potential price due to synergies; heavier diligence, possible \
                      culture changes.",
        best_for: "Maximizing valuation through strategic value and synergies",
    },
    StrategyInfo {
        strategy: ExitStrategy::PeFullSale,
        name: "Financial Buyer (Private Equity) – Full Sale",
        category: "External - Full Exit",
        description: "Strong pricing and speed; may want current leadership to stay through \
                      transition.",
        best_for: "Quick liquidity with strong cash flow businesses",
    },
    StrategyInfo {
        strategy: ExitStrategy::PeRecap,
        name: "Recapitalization with PE (Second Bite)",
        category: "External - Partial Exit",
        description: "Take chips off the table now, stay to grow for a later, often larger, \
                      payout.",
        best_for: "De-risking while keeping significant upside potential",
    },
    StrategyInfo {
        strategy: ExitStrategy::IpoSpac,
        name: "Initial Public Offering (IPO) / SPAC",
        category: "External - Partial Exit",
        description: "Access to public capital and liquidity; costly, demanding, and only fits \
                      sizable, scalable firms.",
        best_for: "Large, scalable businesses with strong growth trajectory",
    },
    StrategyInfo {
        strategy: ExitStrategy::MergerEquals,
        name: "Merger-of-Equals",
        category: "External - Strategic",
        description: "Combine to unlock scale; governance and integration complexity can be high.",
        best_for: "Creating scale in fragmented industries",
    },
    StrategyInfo {
        strategy: ExitStrategy::Mbo,
        name: "Management Buyout (MBO)",
        category: "Internal - Full Succession",
        description: "Keeps continuity; financed via bank/SBA, mezzanine, or seller \
                      notes/earn-outs.",
        best_for: "Strong management team ready to take ownership",
    },
    StrategyInfo {
        strategy: ExitStrategy::Esop,
        name: "Employee Stock Ownership Plan (ESOP)",
        category: "Internal - Full Succession",
        description: "Tax-advantaged exit, preserves culture; works best with stable cash flow \
                      and payroll.",
        best_for: "Preserving culture with tax-advantaged liquidity",
    },
    StrategyInfo {
        strategy: ExitStrategy::FamilySuccession,
        name: "Family Succession",
        category: "Internal - Full Succession",
        description: "Preserve legacy and control tax outcomes; often uses trusts/entities, \
                      notes, or private annuities.",
        best_for: "Keeping business in the family with tax-efficient transfer",
    },
    StrategyInfo {
        strategy: ExitStrategy::EmployeeCoop,
        name: "Employee Ownership / Co-op",
        category: "Internal - Full Succession",
        description: "Mission/culture aligned alternative to ESOP with simpler governance in \
                      some cases.",
        best_for: "Mission-driven businesses focused on employee ownership",
    },
    StrategyInfo {
        strategy: ExitStrategy::MinoritySale,
        name: "Minority Equity Sale (Growth Investor)",
        category: "Partial - Liquidity",
        description: "Fund growth or de-risk; protect governance with strong shareholder terms.",
        best_for: "Raising growth capital while maintaining control",
    },
    StrategyInfo {
        strategy: ExitStrategy::DividendRecap,
        name: "Dividend Recapitalization",
        category: "Partial - Liquidity",
        description: "Borrow against the company to pay you a dividend; increases \
                      leverage—ensure debt capacity.",
        best_for: "Quick liquidity with strong, stable cash flows",
    },
    StrategyInfo {
        strategy: ExitStrategy::RoyaltyLicensing,
        name: "Royalty / Licensing / Franchising",
        category: "Partial - Liquidity",
        description: "Monetize IP/brand while retaining core ops; slower liquidity, but scalable.",
        best_for: "Strong IP or brand that can be licensed",
    },
    StrategyInfo {
        strategy: ExitStrategy::SpinOff,
        name: "Spin-off / Carve-out",
        category: "Restructuring",
        description: "Unlock value or simplify the business pre-exit.",
        best_for: "Complex businesses with separable divisions",
    },
    StrategyInfo {
        strategy: ExitStrategy::OrderlyLiquidation,
        name: "Orderly Liquidation of Assets",
        category: "Liquidation",
        description: "When going-concern value is weak; faster wind-down, typically lower total \
                      proceeds.",
        best_for: "Distressed situations or declining businesses",
    },
];

// ============================================================================
// Tests
// ============================================================================
