//! Bottleneck scan over KPI scores and their normalized components.
//!
//! Every KPI score and every component is checked against a rule. The
//! default rule flags values below the configured `low` threshold and marks
//! them high severity below 0.2. A small table overrides the cutoffs for
//! specific components and can scale the KPI weight when the bottleneck is
//! severe, which raises its impact and therefore its rank.

use serde::Serialize;

use crate::config::{Kpi, Thresholds};
use crate::score::analyzer::AggregateResult;

/// Default high-severity cutoff.
const HIGH_SEVERITY_BELOW: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// An underperforming KPI (component `None`) or KPI component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub kpi: Kpi,
    pub component: Option<&'static str>,
    pub score: f64,
    pub weight: f64,
    pub impact: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rule {
    flag_below: f64,
    high_below: f64,
    high_multiplier: f64,
    medium_multiplier: f64,
}

impl Rule {
    fn default_for(thresholds: &Thresholds) -> Self {
        Self {
            flag_below: thresholds.low,
            high_below: HIGH_SEVERITY_BELOW,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        }
    }

    fn multiplier(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high_multiplier,
            Severity::Medium => self.medium_multiplier,
        }
    }
}

/// Component-specific overrides of the default rule.
///
/// `abandonment_score` is `1 - cart_abandonment_rate`, so a rate above
/// 0.6 is flagged and above 0.7 is high severity.
const COMPONENT_RULES: &[(Kpi, &str, Rule)] = &[
    (
        Kpi::SalesPerformance,
        "conversion_score",
        Rule {
            flag_below: 0.5,
            high_below: 0.2,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        },
    ),
    (
        Kpi::ShopConversion,
        "abandonment_score",
        Rule {
            flag_below: 0.4,
            high_below: 0.3,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        },
    ),
    (
        Kpi::ShopConversion,
        "funnel_score",
        Rule {
            flag_below: 0.3,
            high_below: 0.2,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        },
    ),
    (
        Kpi::TiktokShop,
        "listing_score",
        Rule {
            flag_below: 0.5,
            high_below: 0.3,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        },
    ),
    (
        Kpi::ContentStrategy,
        "video_quality",
        Rule {
            flag_below: 0.4,
            high_below: 0.2,
            high_multiplier: 3.0,
            medium_multiplier: 2.0,
        },
    ),
    (
        Kpi::Engagement,
        "interaction_balance",
        Rule {
            flag_below: 0.5,
            high_below: 0.3,
            high_multiplier: 1.0,
            medium_multiplier: 1.0,
        },
    ),
];

fn rule_for(kpi: Kpi, component: Option<&str>, thresholds: &Thresholds) -> Rule {
    component
        .and_then(|c| {
            COMPONENT_RULES
                .iter()
                .find(|(k, name, _)| *k == kpi && *name == c)
                .map(|(_, _, rule)| *rule)
        })
        .unwrap_or_else(|| Rule::default_for(thresholds))
}

/// Scan an aggregate for bottlenecks, most impactful first.
///
/// Within a KPI the KPI-level score is checked before its components.
/// Equal impacts keep scan order.
pub fn find_bottlenecks(agg: &AggregateResult, thresholds: &Thresholds) -> Vec<Bottleneck> {
    let mut found = Vec::new();
    for kpi in Kpi::ALL {
        let Some(&score) = agg.individual_scores.get(&kpi) else {
            continue;
        };
        let weight = agg.weight(kpi);
        let components = agg
            .components
            .get(&kpi)
            .into_iter()
            .flat_map(|c| c.iter().map(|(name, v)| (Some(*name), *v)));

        for (component, value) in std::iter::once((None, score)).chain(components) {
            let rule = rule_for(kpi, component, thresholds);
            if value >= rule.flag_below {
                continue;
            }
            let severity = if value < rule.high_below {
                Severity::High
            } else {
                Severity::Medium
            };
            let weight = weight * rule.multiplier(severity);
            found.push(Bottleneck {
                kpi,
                component,
                score: value,
                weight,
                impact: value * weight,
                severity,
            });
        }
    }
    found.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    tracing::debug!(count = found.len(), "bottleneck scan complete");
    found
}

#[cfg(test)]
#[path = "bottleneck_test.rs"]
mod tests;
