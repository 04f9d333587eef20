//! Weighted aggregation of the thirteen KPI scores.
//!
//! The `Orchestrator` borrows a validated `WeightConfig`, runs every scorer
//! from the registry and folds the results into an overall score, per-tier
//! averages and the revenue-focus score (the Tier 1 average). A scorer that
//! fails contributes 0.0 and its error is kept in `scorer_errors`; only an
//! invalid config fails the aggregate as a whole.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{Kpi, PerformanceLevel, Thresholds, Tier, WeightConfig};
use crate::error::Result;
use crate::metrics::MetricSet;

use super::scorers::scorer_for;

/// Tier 1 KPIs scoring below this are revenue priorities.
const LOW_REVENUE_SCORE: f64 = 0.3;
const MAX_PRIORITY_ACTIONS: usize = 3;

/// One KPI's evaluated score.
#[derive(Debug, Clone)]
pub struct ScorerResult {
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    pub components: BTreeMap<&'static str, f64>,
    pub raw: BTreeMap<&'static str, f64>,
    pub performance_level: PerformanceLevel,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBreakdown {
    pub label: &'static str,
    pub kpis: Vec<Kpi>,
    pub total_weight: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateResult {
    pub creator_id: String,
    pub overall_score: f64,
    pub revenue_focus_score: f64,
    pub tier_breakdown: BTreeMap<Tier, TierBreakdown>,
    pub individual_scores: BTreeMap<Kpi, f64>,
    pub weighted_scores: BTreeMap<Kpi, f64>,
    pub weights: BTreeMap<Kpi, f64>,
    pub components: BTreeMap<Kpi, BTreeMap<&'static str, f64>>,
    pub raw_metrics: BTreeMap<Kpi, BTreeMap<&'static str, f64>>,
    pub performance_levels: BTreeMap<Kpi, PerformanceLevel>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scorer_errors: BTreeMap<Kpi, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AggregateResult {
    /// Fallback returned when aggregation cannot run at all.
    pub fn degraded(creator_id: &str, message: String) -> Self {
        Self {
            creator_id: creator_id.to_string(),
            error: Some(message),
            ..Self::default()
        }
    }

    pub fn score(&self, kpi: Kpi) -> f64 {
        self.individual_scores.get(&kpi).copied().unwrap_or(0.0)
    }

    pub fn weight(&self, kpi: Kpi) -> f64 {
        self.weights.get(&kpi).copied().unwrap_or(0.0)
    }

    pub fn tier_average(&self, tier: Tier) -> f64 {
        self.tier_breakdown
            .get(&tier)
            .map(|t| t.average_score)
            .unwrap_or(0.0)
    }
}

/// Weighted score against the equal-weight baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub new_weighted_score: f64,
    pub equal_weighted_score: f64,
    pub difference: f64,
    pub percentage_change: f64,
    pub revenue_focus_improvement: f64,
}

/// A KPI ranked by `score * weight`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiImpact {
    pub kpi: Kpi,
    pub score: f64,
    pub weight: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueInsights {
    pub current_revenue_score: f64,
    pub max_possible_revenue_score: f64,
    pub improvement_potential: f64,
    pub low_performance_kpis: Vec<KpiImpact>,
    pub priority_actions: Vec<KpiImpact>,
    pub tier_performance: BTreeMap<Tier, f64>,
    pub overall_performance: f64,
}

impl RevenueInsights {
    pub fn from_aggregate(agg: &AggregateResult) -> Self {
        let tier1 = Tier::Tier1.kpis();
        let mut low: Vec<KpiImpact> = tier1
            .iter()
            .map(|&kpi| KpiImpact {
                kpi,
                score: agg.score(kpi),
                weight: agg.weight(kpi),
                impact: agg.score(kpi) * agg.weight(kpi),
            })
            .filter(|k| k.score < LOW_REVENUE_SCORE)
            .collect();
        low.sort_by(|a, b| b.impact.total_cmp(&a.impact));

        let max_possible: f64 = tier1.iter().map(|&k| agg.weight(k)).sum();
        Self {
            current_revenue_score: agg.revenue_focus_score,
            max_possible_revenue_score: max_possible,
            improvement_potential: max_possible - agg.revenue_focus_score,
            priority_actions: low.iter().take(MAX_PRIORITY_ACTIONS).cloned().collect(),
            low_performance_kpis: low,
            tier_performance: Tier::ALL
                .iter()
                .map(|&t| (t, agg.tier_average(t)))
                .collect(),
            overall_performance: agg.overall_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierWeights {
    pub label: &'static str,
    pub kpis: Vec<Kpi>,
    pub total_weight: f64,
}

/// Tier membership and weights as configured.
#[derive(Debug, Clone, Serialize)]
pub struct WeightsOverview {
    pub weights: BTreeMap<Kpi, f64>,
    pub tiers: BTreeMap<Tier, TierWeights>,
    pub thresholds: Thresholds,
    pub max_recommendations: usize,
    pub min_confidence: f64,
}

/// Runs the scorer registry against one config.
pub struct Orchestrator<'a> {
    config: &'a WeightConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a WeightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a WeightConfig {
        self.config
    }

    /// Score one KPI. A failing scorer degrades to 0.0.
    pub fn score_kpi(&self, kpi: Kpi, metrics: &MetricSet) -> ScorerResult {
        let weight = self.config.weight(kpi);
        let (score, components, raw, error) = match scorer_for(kpi).evaluate(metrics) {
            Ok(b) => (b.score, b.components, b.raw, None),
            Err(e) => {
                warn!(%kpi, error = %e, "scorer failed, using 0.0");
                (0.0, BTreeMap::new(), BTreeMap::new(), Some(e.to_string()))
            }
        };
        debug!(%kpi, score, weight, "scored");
        ScorerResult {
            score,
            weight,
            weighted_score: score * weight,
            components,
            raw,
            performance_level: self.config.thresholds.level(score),
            error,
        }
    }

    pub fn try_aggregate(&self, metrics: &MetricSet) -> Result<AggregateResult> {
        self.config.validate()?;

        let mut agg = AggregateResult {
            creator_id: metrics.creator_id().to_string(),
            ..AggregateResult::default()
        };
        let mut tier_sums: BTreeMap<Tier, (f64, f64)> = BTreeMap::new();

        for kpi in Kpi::ALL {
            let r = self.score_kpi(kpi, metrics);
            let entry = tier_sums.entry(kpi.tier()).or_default();
            entry.0 += r.weighted_score;
            entry.1 += r.weight;

            agg.individual_scores.insert(kpi, r.score);
            agg.weighted_scores.insert(kpi, r.weighted_score);
            agg.weights.insert(kpi, r.weight);
            agg.components.insert(kpi, r.components);
            agg.raw_metrics.insert(kpi, r.raw);
            agg.performance_levels.insert(kpi, r.performance_level);
            if let Some(e) = r.error {
                agg.scorer_errors.insert(kpi, e);
            }
        }

        agg.overall_score = agg.weighted_scores.values().sum();
        for tier in Tier::ALL {
            let (weighted, weight) = tier_sums.get(&tier).copied().unwrap_or_default();
            let average_score = if weight > 0.0 { weighted / weight } else { 0.0 };
            agg.tier_breakdown.insert(
                tier,
                TierBreakdown {
                    label: tier.label(),
                    kpis: tier.kpis(),
                    total_weight: weight,
                    average_score,
                },
            );
        }
        agg.revenue_focus_score = agg.tier_average(Tier::Tier1);

        info!(
            creator = %agg.creator_id,
            overall = agg.overall_score,
            revenue_focus = agg.revenue_focus_score,
            "aggregate computed"
        );
        Ok(agg)
    }

    /// Like `try_aggregate`, but returns a degraded result on error.
    pub fn aggregate(&self, metrics: &MetricSet) -> AggregateResult {
        self.try_aggregate(metrics).unwrap_or_else(|e| {
            error!(error = %e, "aggregation failed");
            AggregateResult::degraded(metrics.creator_id(), e.to_string())
        })
    }

    /// Compare the tiered score against giving every KPI weight 1/13.
    pub fn compare_equal_weighting(&self, metrics: &MetricSet) -> Result<ComparisonResult> {
        let agg = self.try_aggregate(metrics)?;
        let equal_weight = 1.0 / Kpi::ALL.len() as f64;
        let equal_weighted_score: f64 = agg
            .individual_scores
            .values()
            .map(|s| s * equal_weight)
            .sum();
        let difference = agg.overall_score - equal_weighted_score;
        let percentage_change = if equal_weighted_score > 0.0 {
            difference / equal_weighted_score * 100.0
        } else {
            0.0
        };

        let tier1 = Tier::Tier1.kpis();
        let tier1_mean = tier1.iter().map(|&k| agg.score(k)).sum::<f64>() / tier1.len() as f64;

        Ok(ComparisonResult {
            new_weighted_score: agg.overall_score,
            equal_weighted_score,
            difference,
            percentage_change,
            revenue_focus_improvement: agg.revenue_focus_score - tier1_mean,
        })
    }

    pub fn revenue_insights(&self, metrics: &MetricSet) -> Result<RevenueInsights> {
        let agg = self.try_aggregate(metrics)?;
        Ok(RevenueInsights::from_aggregate(&agg))
    }

    pub fn weights_overview(&self) -> WeightsOverview {
        WeightsOverview {
            weights: self.config.weights.clone(),
            tiers: Tier::ALL
                .iter()
                .map(|&tier| {
                    let weights = TierWeights {
                        label: tier.label(),
                        kpis: tier.kpis(),
                        total_weight: self.config.tier_weight(tier),
                    };
                    (tier, weights)
                })
                .collect(),
            thresholds: self.config.thresholds,
            max_recommendations: self.config.max_recommendations,
            min_confidence: self.config.min_confidence,
        }
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
