//! Bottleneck → ranked recommendation pipeline.
//!
//! `Recommender::try_recommend` aggregates the metrics, scans for
//! bottlenecks, maps each to a template and ranks the results by
//! `(priority_score, expected_improvement)`. The list is cut to the
//! configured bound after sorting.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, info};

use crate::config::{Kpi, WeightConfig};
use crate::diagnose::bottleneck::{Bottleneck, Severity, find_bottlenecks};
use crate::error::{Error, Result};
use crate::metrics::MetricSet;
use crate::score::analyzer::{Orchestrator, RevenueInsights};

use super::templates::{Experiment, Level, success_metrics, template_for};

const BASE_CONFIDENCE: f64 = 0.8;
const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub title: &'static str,
    pub description: String,
    pub template: &'static str,
    pub priority_score: f64,
    pub expected_improvement: f64,
    pub confidence: f64,
    pub low_confidence: bool,
    pub cost_level: Level,
    pub severity: Severity,
    pub current_score: f64,
    pub target_score: f64,
    pub actions: &'static [&'static str],
    pub experiment: &'static Experiment,
    pub kpi_affected: Kpi,
    pub component: Option<&'static str>,
    pub effort_hours: u32,
    pub success_metrics: &'static [&'static str],
}

/// Everything computed on a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub creator_id: String,
    pub timestamp: String,
    pub overall_score: f64,
    pub revenue_focus_score: f64,
    pub scores: BTreeMap<Kpi, f64>,
    pub bottleneck_count: usize,
    pub insights: RevenueInsights,
    pub next_steps: Vec<String>,
}

/// Serializes as the full analysis plus recommendations, or as
/// `{"error": ..., "recommendations": []}` when the run failed.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub analysis: Option<Analysis>,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResult {
    pub fn degraded(message: String) -> Self {
        Self {
            error: Some(message),
            analysis: None,
            recommendations: Vec::new(),
        }
    }
}

pub struct Recommender<'a> {
    orchestrator: Orchestrator<'a>,
    max: usize,
}

impl<'a> Recommender<'a> {
    pub fn new(config: &'a WeightConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(config),
            max: config.max_recommendations,
        }
    }

    /// Override the configured bound for this recommender.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Build the recommendation for a single bottleneck.
    pub fn recommendation_for(&self, b: &Bottleneck) -> Recommendation {
        let template = template_for(b.kpi, b.component);
        let severity_factor = match b.severity {
            Severity::High => 2.0,
            Severity::Medium => 1.0,
        };
        let priority_score = template.priority.priority_weight()
            * (b.weight * 2.0)
            * ((1.0 - b.score) * 2.0)
            * severity_factor;
        let expected_improvement = template.base_improvement * (1.0 - b.score);
        let confidence = confidence(b);
        let target = b.component.unwrap_or("overall");

        Recommendation {
            id: format!("rec_{}_{target}", b.kpi),
            title: template.title,
            description: format!(
                "Improve {} in {}",
                b.component.unwrap_or("overall score"),
                b.kpi
            ),
            template: template.key,
            priority_score,
            expected_improvement,
            confidence,
            low_confidence: confidence < self.orchestrator.config().min_confidence,
            cost_level: template.cost,
            severity: b.severity,
            current_score: b.score,
            target_score: (b.score + expected_improvement).min(1.0),
            actions: template.actions,
            experiment: &template.experiment,
            kpi_affected: b.kpi,
            component: b.component,
            effort_hours: template.cost.effort_hours(),
            success_metrics: success_metrics(b.kpi),
        }
    }

    pub fn try_recommend(&self, metrics: &MetricSet) -> Result<RecommendationResult> {
        if self.max == 0 {
            return Err(Error::Config(
                "recommendations.max must be at least 1".to_string(),
            ));
        }
        let config = self.orchestrator.config();
        let agg = self.orchestrator.try_aggregate(metrics)?;
        let bottlenecks = find_bottlenecks(&agg, &config.thresholds);

        let mut recommendations: Vec<Recommendation> = bottlenecks
            .iter()
            .map(|b| self.recommendation_for(b))
            .collect();
        recommendations.sort_by(|a, b| {
            b.priority_score
                .total_cmp(&a.priority_score)
                .then(b.expected_improvement.total_cmp(&a.expected_improvement))
        });
        recommendations.truncate(self.max);

        info!(
            creator = %agg.creator_id,
            bottlenecks = bottlenecks.len(),
            recommendations = recommendations.len(),
            "recommendations generated"
        );

        let analysis = Analysis {
            creator_id: agg.creator_id.clone(),
            timestamp: metrics
                .timestamp
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            overall_score: agg.overall_score,
            revenue_focus_score: agg.revenue_focus_score,
            insights: RevenueInsights::from_aggregate(&agg),
            scores: agg.individual_scores,
            bottleneck_count: bottlenecks.len(),
            next_steps: next_steps(&recommendations),
        };
        Ok(RecommendationResult {
            error: None,
            analysis: Some(analysis),
            recommendations,
        })
    }

    /// Like `try_recommend`, but returns an empty degraded result on error.
    pub fn recommend(&self, metrics: &MetricSet) -> RecommendationResult {
        self.try_recommend(metrics).unwrap_or_else(|e| {
            error!(error = %e, "recommendation failed");
            RecommendationResult::degraded(e.to_string())
        })
    }
}

/// Confidence from severity and impact, capped at 0.95.
///
/// Impact is `score * weight`, so the weakest bottlenecks (score near 0)
/// get the lowest confidence.
fn confidence(b: &Bottleneck) -> f64 {
    let severity_factor = match b.severity {
        Severity::High => 1.2,
        Severity::Medium => 1.0,
    };
    let impact_factor = (b.impact * 10.0).min(1.5);
    (BASE_CONFIDENCE * severity_factor * impact_factor).min(MAX_CONFIDENCE)
}

/// Guidance text for the top one or two recommendations.
pub fn next_steps(recommendations: &[Recommendation]) -> Vec<String> {
    let Some(first) = recommendations.first() else {
        return vec!["No immediate actions required".to_string()];
    };
    let metric = first
        .success_metrics
        .first()
        .copied()
        .unwrap_or("overall_score");
    let mut steps = vec![
        format!(
            "1. Implement '{}' (Priority: {:.1})",
            first.title, first.priority_score
        ),
        format!("2. Set up A/B test: {}", first.experiment.kind),
        format!(
            "3. Monitor {metric} for {} days",
            first.experiment.duration_days
        ),
    ];
    if let Some(second) = recommendations.get(1) {
        steps.push(format!("4. Plan implementation of '{}'", second.title));
    }
    steps
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
