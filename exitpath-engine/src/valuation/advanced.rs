//! Trend-aware valuation over multi-year financial history.
//!
//! Where the single-year calculators work from a snapshot, this engine ties
//! multiples to observed growth, profitability, and stability across years.
//! Five methods run side by side and blend under size-dependent weights.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::inputs::IndustryMultiples;
use crate::valuation::methods::ValuationEngine;

// ============================================================================
// Input Types
// ============================================================================

/// One fiscal year of figures. Absent fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YearlyFigures {
    pub year: i32,
    pub revenue: f64,
    pub ebitda: f64,
    /// Seller's discretionary earnings.
    pub sde: f64,
    pub gross_profit: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
}

/// Multi-year financial history. Years may arrive in any order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiYearFinancials {
    pub years: Vec<YearlyFigures>,
}

// ============================================================================
// Report Types
// ============================================================================

/// The five trend-aware methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMethod {
    Sde,
    Ebitda,
    Revenue,
    Asset,
    Dcf,
}

impl std::fmt::Display for TrendMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sde => write!(f, "SDE Multiple"),
            Self::Ebitda => write!(f, "EBITDA Multiple"),
            Self::Revenue => write!(f, "Revenue Multiple"),
            Self::Asset => write!(f, "Asset-Based"),
            Self::Dcf => write!(f, "Discounted Cash Flow"),
        }
    }
}

/// One method's contribution to the trend blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendMethodValue {
    pub method: TrendMethod,
    pub value: f64,
    /// Multiple or adjustment factor applied to the base metric.
    pub multiple: Option<f64>,
    /// Figure the multiple was applied to.
    pub base_metric: f64,
    pub description: String,
}

/// Spread of the positive-valued methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRange {
    pub low: f64,
    pub high: f64,
    pub average: f64,
}

/// Compound annual growth rates, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub revenue_cagr: f64,
    pub ebitda_cagr: f64,
    pub sde_cagr: f64,
}

/// Latest-year and across-years figures backing the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub latest_year: i32,
    pub latest_revenue: f64,
    pub latest_ebitda: f64,
    pub latest_sde: f64,
    /// Latest-year EBITDA margin, percent.
    pub latest_ebitda_margin: f64,
    /// Means over the positive years of each series.
    pub average_revenue: f64,
    pub average_ebitda: f64,
    pub average_sde: f64,
    /// Mean margin over years with revenue.
    pub average_ebitda_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Warning,
    Negative,
}

/// A narrative observation about the business drawn from its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub category: String,
    pub message: String,
}

/// A public-market multiple before and after the illiquidity haircut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultipleAdjustment {
    pub original: f64,
    pub adjusted: f64,
}

/// Industry data as it entered the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryContext {
    pub name: Option<String>,
    pub ev_ebitda: Option<MultipleAdjustment>,
    pub ev_revenue: Option<MultipleAdjustment>,
    pub private_discount_applied: f64,
}

/// Full output of the trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedReport {
    /// Size-weighted blend of the positive-valued methods.
    pub weighted_valuation: f64,
    pub valuation_range: ValuationRange,
    pub methods: Vec<TrendMethodValue>,
    /// Renormalized weights for the methods included in the blend.
    pub weights: BTreeMap<TrendMethod, f64>,
    pub growth_metrics: GrowthMetrics,
    pub financial_summary: FinancialSummary,
    pub insights: Vec<Insight>,
    pub calculated_at: DateTime<Utc>,
    pub years_analyzed: usize,
    pub industry_context: Option<IndustryContext>,
}

// ============================================================================
// Engine
// ============================================================================

impl ValuationEngine {
    /// Runs the trend-aware analysis over at least two years of history.
    pub fn advanced(
        &self,
        history: &MultiYearFinancials,
        industry: Option<&IndustryMultiples>,
    ) -> Result<AdvancedReport> {
        if history.years.len() < 2 {
            return Err(EngineError::InvalidAssumptions {
                reason: format!(
                    "at least 2 years of financial data are required, got {}",
                    history.years.len()
                ),
            });
        }
        let discount_rate = self.config.discount_rate;
        let terminal_growth = self.config.terminal_growth;
        if discount_rate <= terminal_growth {
            return Err(EngineError::InvalidAssumptions {
                reason: format!(
                    "discount rate ({discount_rate}) must exceed terminal growth ({terminal_growth})"
                ),
            });
        }

        let mut years = history.years.clone();
        years.sort_by_key(|y| y.year);
        let latest = years[years.len() - 1];

        let revenues: Vec<f64> = years.iter().map(|y| y.revenue).collect();
        let ebitdas: Vec<f64> = years.iter().map(|y| y.ebitda).collect();
        let sdes: Vec<f64> = years.iter().map(|y| y.sde).collect();

        let growth_metrics = GrowthMetrics {
            revenue_cagr: cagr(&revenues),
            ebitda_cagr: cagr(&ebitdas),
            sde_cagr: cagr(&sdes),
        };

        // Mean margin over years with revenue; negative EBITDA years are
        // left out of the margin series.
        let margins: Vec<f64> = years
            .iter()
            .filter(|y| y.revenue > 0.0 && y.ebitda >= 0.0)
            .map(|y| y.ebitda / y.revenue * 100.0)
            .collect();
        let average_margin = if margins.is_empty() {
            0.0
        } else {
            margins.iter().mean()
        };

        let discount = self.config.private_company_discount;
        let industry_suffix = industry
            .and_then(|i| i.name.as_deref())
            .map(|name| format!(" (Industry: {name})"))
            .unwrap_or_default();

        let methods = vec![
            sde_method(&latest, &growth_metrics),
            ebitda_method(
                &latest,
                &growth_metrics,
                average_margin,
                industry,
                discount,
                &industry_suffix,
            ),
            revenue_method(
                &latest,
                &growth_metrics,
                average_margin,
                industry,
                discount,
                &industry_suffix,
            ),
            asset_method(&latest, average_margin),
            self.dcf_method(&latest, &growth_metrics),
        ];

        // Weight table keyed by business size, then restricted to the
        // methods that produced a positive value and renormalized.
        let base_weights = weight_table(latest.sde);
        let mut weights = BTreeMap::new();
        for entry in &methods {
            if entry.value > 0.0 {
                weights.insert(entry.method, base_weights[&entry.method]);
            } else {
                debug!(method = %entry.method, "Method excluded from trend blend");
            }
        }
        let total: f64 = weights.values().sum();
        let mut weighted_valuation = 0.0;
        if total > 0.0 {
            for weight in weights.values_mut() {
                *weight /= total;
            }
            for entry in &methods {
                if let Some(weight) = weights.get(&entry.method) {
                    weighted_valuation += entry.value * weight;
                }
            }
        }

        let positives: Vec<f64> = methods
            .iter()
            .map(|m| m.value)
            .filter(|v| *v > 0.0)
            .collect();
        let valuation_range = if positives.is_empty() {
            ValuationRange {
                low: 0.0,
                high: 0.0,
                average: 0.0,
            }
        } else {
            ValuationRange {
                low: positives.iter().copied().fold(f64::INFINITY, f64::min),
                high: positives.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                average: positives.iter().mean(),
            }
        };

        let financial_summary = FinancialSummary {
            latest_year: latest.year,
            latest_revenue: latest.revenue,
            latest_ebitda: latest.ebitda,
            latest_sde: latest.sde,
            latest_ebitda_margin: if latest.revenue > 0.0 {
                latest.ebitda / latest.revenue * 100.0
            } else {
                0.0
            },
            average_revenue: positive_mean(&revenues),
            average_ebitda: positive_mean(&ebitdas),
            average_sde: positive_mean(&sdes),
            average_ebitda_margin: average_margin,
        };

        let insights = build_insights(&growth_metrics, average_margin, latest.revenue, &revenues);

        let industry_context = industry.map(|i| IndustryContext {
            name: i.name.clone(),
            ev_ebitda: i.ev_ebitda.map(|r| MultipleAdjustment {
                original: r.median,
                adjusted: r.median * (1.0 - discount),
            }),
            ev_revenue: i.ev_revenue.map(|r| MultipleAdjustment {
                original: r.median,
                adjusted: r.median * (1.0 - discount),
            }),
            private_discount_applied: discount,
        });

        info!(
            weighted_valuation,
            years_analyzed = years.len(),
            "Trend valuation blended"
        );

        Ok(AdvancedReport {
            weighted_valuation,
            valuation_range,
            methods,
            weights,
            growth_metrics,
            financial_summary,
            insights,
            calculated_at: Utc::now(),
            years_analyzed: years.len(),
            industry_context,
        })
    }

    /// Simplified DCF: projects the latest SDE at its own CAGR over the
    /// configured horizon, with a Gordon Growth terminal value.
    fn dcf_method(&self, latest: &YearlyFigures, growth: &GrowthMetrics) -> TrendMethodValue {
        let discount_rate = self.config.discount_rate;
        let terminal_growth = self.config.terminal_growth;
        let horizon = self.config.projection_years;
        // 5% floor when historical growth is flat or negative.
        let annual_growth = if growth.sde_cagr > 0.0 {
            growth.sde_cagr / 100.0
        } else {
            0.05
        };

        let mut pv_of_projections = 0.0;
        for year in 1..=horizon {
            let projected = latest.sde * (1.0 + annual_growth).powi(year as i32);
            pv_of_projections += projected / (1.0 + discount_rate).powi(year as i32);
        }
        let terminal_cf =
            latest.sde * (1.0 + annual_growth).powi(horizon as i32) * (1.0 + terminal_growth);
        let terminal_value = terminal_cf / (discount_rate - terminal_growth);
        let pv_of_terminal = terminal_value / (1.0 + discount_rate).powi(horizon as i32);

        TrendMethodValue {
            method: TrendMethod::Dcf,
            value: pv_of_projections + pv_of_terminal,
            multiple: None,
            base_metric: latest.sde,
            description: format!(
                "DCF Method: {horizon}-year projection at {:.1}% growth",
                annual_growth * 100.0
            ),
        }
    }
}

// ============================================================================
// Method Calculators
// ============================================================================

fn sde_method(latest: &YearlyFigures, growth: &GrowthMetrics) -> TrendMethodValue {
    let growth_adjustment: f64 = if growth.sde_cagr > 20.0 {
        1.0
    } else if growth.sde_cagr > 10.0 {
        0.5
    } else if growth.sde_cagr > 0.0 {
        0.25
    } else {
        -0.5
    };
    let size_adjustment: f64 = if latest.sde > 2_000_000.0 {
        0.75
    } else if latest.sde > 1_000_000.0 {
        0.5
    } else if latest.sde > 500_000.0 {
        0.25
    } else {
        0.0
    };
    let multiple = (2.5 + growth_adjustment + size_adjustment).clamp(1.5, 5.0);

    TrendMethodValue {
        method: TrendMethod::Sde,
        value: latest.sde * multiple,
        multiple: Some(multiple),
        base_metric: latest.sde,
        description: format!(
            "SDE Multiple Method: {} × {multiple:.2}x",
            format_currency(latest.sde)
        ),
    }
}

fn ebitda_method(
    latest: &YearlyFigures,
    growth: &GrowthMetrics,
    average_margin: f64,
    industry: Option<&IndustryMultiples>,
    discount: f64,
    industry_suffix: &str,
) -> TrendMethodValue {
    let growth_adjustment = if growth.ebitda_cagr > 20.0 {
        2.0
    } else if growth.ebitda_cagr > 10.0 {
        1.0
    } else if growth.ebitda_cagr > 5.0 {
        0.5
    } else {
        0.0
    };
    let margin_adjustment = if average_margin > 25.0 {
        1.0
    } else if average_margin > 15.0 {
        0.5
    } else {
        0.0
    };

    let industry_base = industry
        .and_then(|i| i.ev_ebitda)
        .map(|r| r.median * (1.0 - discount))
        .filter(|base| *base > 0.0);
    let multiple = match industry_base {
        Some(base) => {
            (base + growth_adjustment + margin_adjustment).clamp(base * 0.5, base * 2.0)
        }
        None => (4.0 + growth_adjustment + margin_adjustment).clamp(3.0, 10.0),
    };

    TrendMethodValue {
        method: TrendMethod::Ebitda,
        value: latest.ebitda * multiple,
        multiple: Some(multiple),
        base_metric: latest.ebitda,
        description: format!(
            "EBITDA Multiple Method: {} × {multiple:.2}x{industry_suffix}",
            format_currency(latest.ebitda)
        ),
    }
}

fn revenue_method(
    latest: &YearlyFigures,
    growth: &GrowthMetrics,
    average_margin: f64,
    industry: Option<&IndustryMultiples>,
    discount: f64,
    industry_suffix: &str,
) -> TrendMethodValue {
    let industry_base = industry
        .and_then(|i| i.ev_revenue)
        .map(|r| r.median * (1.0 - discount))
        .filter(|base| *base > 0.0);

    let multiple = match industry_base {
        Some(base) => {
            // Adjustments scale with the industry base rather than being
            // absolute bumps.
            let profit_adjustment = if average_margin > 20.0 {
                base * 0.5
            } else if average_margin > 10.0 {
                base * 0.25
            } else {
                0.0
            };
            let growth_adjustment = if growth.revenue_cagr > 25.0 {
                base * 0.5
            } else if growth.revenue_cagr > 15.0 {
                base * 0.25
            } else {
                0.0
            };
            (base + profit_adjustment + growth_adjustment).clamp(base * 0.5, base * 3.0)
        }
        None => {
            let profit_adjustment: f64 = if average_margin > 20.0 {
                1.0
            } else if average_margin > 10.0 {
                0.5
            } else {
                0.0
            };
            let growth_adjustment: f64 = if growth.revenue_cagr > 25.0 {
                1.0
            } else if growth.revenue_cagr > 15.0 {
                0.5
            } else {
                0.0
            };
            (0.5 + profit_adjustment + growth_adjustment).clamp(0.3, 3.0)
        }
    };

    TrendMethodValue {
        method: TrendMethod::Revenue,
        value: latest.revenue * multiple,
        multiple: Some(multiple),
        base_metric: latest.revenue,
        description: format!(
            "Revenue Multiple Method: {} × {multiple:.2}x{industry_suffix}",
            format_currency(latest.revenue)
        ),
    }
}

fn asset_method(latest: &YearlyFigures, average_margin: f64) -> TrendMethodValue {
    let net_assets = latest.total_assets - latest.total_liabilities;
    // Profitable operations earn a premium over book value.
    let adjustment = if average_margin > 15.0 {
        1.5
    } else if average_margin > 5.0 {
        1.25
    } else {
        1.0
    };

    TrendMethodValue {
        method: TrendMethod::Asset,
        value: net_assets * adjustment,
        multiple: Some(adjustment),
        base_metric: net_assets,
        description: format!(
            "Asset-Based Method: {} × {adjustment:.2}x adjustment",
            format_currency(net_assets)
        ),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Compound annual growth rate in percent; zero when the series is too
/// short or its endpoints are not positive.
fn cagr(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let first = values[0];
    let last = values[values.len() - 1];
    if first <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    let periods = (values.len() - 1) as f64;
    ((last / first).powf(1.0 / periods) - 1.0) * 100.0
}

/// Mean of the positive entries, zero when there are none.
fn positive_mean(values: &[f64]) -> f64 {
    let positives: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positives.is_empty() {
        0.0
    } else {
        positives.iter().mean()
    }
}

fn weight_table(latest_sde: f64) -> BTreeMap<TrendMethod, f64> {
    let entries: [(TrendMethod, f64); 5] = if latest_sde < 500_000.0 {
        [
            (TrendMethod::Sde, 0.40),
            (TrendMethod::Ebitda, 0.20),
            (TrendMethod::Revenue, 0.15),
            (TrendMethod::Asset, 0.15),
            (TrendMethod::Dcf, 0.10),
        ]
    } else if latest_sde < 2_000_000.0 {
        [
            (TrendMethod::Sde, 0.25),
            (TrendMethod::Ebitda, 0.30),
            (TrendMethod::Revenue, 0.15),
            (TrendMethod::Asset, 0.10),
            (TrendMethod::Dcf, 0.20),
        ]
    } else {
        [
            (TrendMethod::Sde, 0.15),
            (TrendMethod::Ebitda, 0.35),
            (TrendMethod::Revenue, 0.15),
            (TrendMethod::Asset, 0.10),
            (TrendMethod::Dcf, 0.25),
        ]
    };
    entries.into_iter().collect()
}

fn build_insights(
    growth: &GrowthMetrics,
    average_margin: f64,
    latest_revenue: f64,
    revenues: &[f64],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if growth.revenue_cagr > 15.0 {
        insights.push(Insight {
            kind: InsightKind::Positive,
            category: "Growth".to_string(),
            message: format!(
                "Strong revenue growth of {:.1}% CAGR increases valuation multiples",
                growth.revenue_cagr
            ),
        });
    } else if growth.revenue_cagr < 0.0 {
        insights.push(Insight {
            kind: InsightKind::Negative,
            category: "Growth".to_string(),
            message: format!(
                "Declining revenue ({:.1}% CAGR) reduces valuation multiples",
                growth.revenue_cagr
            ),
        });
    }

    if average_margin > 20.0 {
        insights.push(Insight {
            kind: InsightKind::Positive,
            category: "Profitability".to_string(),
            message: format!(
                "Excellent EBITDA margin of {average_margin:.1}% demonstrates strong profitability"
            ),
        });
    } else if average_margin < 10.0 {
        insights.push(Insight {
            kind: InsightKind::Warning,
            category: "Profitability".to_string(),
            message: format!("EBITDA margin of {average_margin:.1}% is below industry average"),
        });
    }

    if latest_revenue > 10_000_000.0 {
        insights.push(Insight {
            kind: InsightKind::Positive,
            category: "Scale".to_string(),
            message: "Business size supports higher valuation multiples".to_string(),
        });
    }

    // Coefficient of variation over the positive revenue years.
    let valid_revenues: Vec<f64> = revenues.iter().copied().filter(|r| *r > 0.0).collect();
    let mut revenue_volatility = 0.0;
    if valid_revenues.len() > 1 {
        let mean = valid_revenues.iter().mean();
        if mean > 0.0 {
            revenue_volatility = valid_revenues.iter().std_dev() / mean;
        }
    }
    if revenue_volatility < 0.15 {
        insights.push(Insight {
            kind: InsightKind::Positive,
            category: "Stability".to_string(),
            message: "Consistent revenue trend increases buyer confidence".to_string(),
        });
    } else if revenue_volatility > 0.30 {
        insights.push(Insight {
            kind: InsightKind::Warning,
            category: "Stability".to_string(),
            message: "High revenue volatility may concern potential buyers".to_string(),
        });
    }

    insights
}

/// Dollar figure with thousands separators, e.g. `$1,234,567`.
fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}

// ============================================================================
// Tests
// ============================================================================
