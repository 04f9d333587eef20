//! Raw creator metrics and their documented defaults.
//!
//! A `MetricSet` is a flat name → number map built once per request. Absent
//! metrics resolve to the default in `METRIC_DEFAULTS`, so partial input
//! never fails scoring.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Every metric a scorer reads, with the value used when it is absent.
pub const METRIC_DEFAULTS: &[(&str, f64)] = &[
    // sales performance
    ("conversion_rate", 0.0),
    ("total_revenue", 0.0),
    ("avg_order_value", 0.0),
    ("target_revenue", 10_000.0),
    ("target_aov", 50.0),
    // shop conversion
    ("funnel_completion_rate", 0.0),
    ("cart_abandonment_rate", 1.0),
    ("checkout_success_rate", 0.0),
    // tiktok shop
    ("listing_quality", 0.0),
    ("product_velocity", 0.0),
    ("integration_seamlessness", 0.0),
    // engagement
    ("likes_ratio", 0.0),
    ("comments_ratio", 0.0),
    ("shares_ratio", 0.0),
    ("retention_rate", 0.0),
    ("avg_watch_time", 0.0),
    ("video_duration", 30.0),
    // growth
    ("engagement_growth_rate", 0.0),
    ("follower_growth_rate", 0.0),
    ("views_growth_rate", 0.0),
    // discovery
    ("hashtag_performance", 0.0),
    ("search_visibility", 0.0),
    ("recommendation_rate", 0.0),
    ("viral_potential", 0.0),
    // content strategy
    ("video_quality", 0.0),
    ("content_freshness", 0.0),
    ("posting_consistency", 0.0),
    ("content_diversity", 0.0),
    // audience fit
    ("target_demographic_match", 0.0),
    ("audience_engagement_quality", 0.0),
    ("follower_quality_score", 0.0),
    ("audience_retention", 0.0),
    // brand fit
    ("brand_alignment", 0.0),
    ("trust_score", 0.0),
    ("authenticity_score", 0.0),
    ("brand_consistency", 0.0),
    // trend fit
    ("trend_alignment", 0.0),
    ("timing_score", 0.0),
    ("trend_relevance", 0.0),
    // image
    ("image_quality", 0.0),
    ("lighting_score", 0.0),
    ("composition_score", 0.0),
    ("color_balance", 0.0),
    // reach
    ("total_reach", 0.0),
    ("unique_viewers", 0.0),
    ("impression_rate", 0.0),
    ("visibility_score", 0.0),
    ("target_reach", 10_000.0),
    // cost efficiency
    ("cost_per_acquisition", 100.0),
    ("cost_per_engagement", 1.0),
    ("cost_per_view", 0.1),
    ("roi_score", 0.0),
    ("target_cpa", 50.0),
    ("target_cpe", 0.5),
    ("target_cpv", 0.05),
];

/// Default for a metric name; unknown names default to 0.0.
pub fn default_for(key: &str) -> f64 {
    METRIC_DEFAULTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    values: BTreeMap<String, f64>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn with_creator(mut self, creator_id: &str) -> Self {
        self.creator_id = Some(creator_id.to_string());
        self
    }

    /// Value of `key`, or its documented default when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .copied()
            .unwrap_or_else(|| default_for(key))
    }

    pub fn creator_id(&self) -> &str {
        self.creator_id.as_deref().unwrap_or("unknown")
    }

    /// Parse a flat JSON object. `null` counts as absent; other
    /// non-numeric metric values are rejected.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidMetric {
                key: "<root>".to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        let mut set = Self::new();
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::String(s) if key == "creator_id" => set.creator_id = Some(s),
                Value::String(s) if key == "timestamp" => set.timestamp = Some(s),
                Value::Number(n) => {
                    let v = n.as_f64().ok_or_else(|| Error::InvalidMetric {
                        key: key.clone(),
                        reason: format!("{n} is not representable as f64"),
                    })?;
                    set.values.insert(key, v);
                }
                other => {
                    return Err(Error::InvalidMetric {
                        key,
                        reason: format!("expected a number, got {other}"),
                    });
                }
            }
        }
        Ok(set)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io("<stdin>", e))?;
        Self::from_json_str(&text)
    }

    /// Sample creator with a mix of healthy and weak areas: high cart
    /// abandonment, low video and image quality.
    pub fn demo() -> Self {
        DEMO_VALUES
            .iter()
            .fold(Self::new().with_creator("demo_creator_001"), |set, (key, value)| {
                set.with(key, *value)
            })
    }
}

const DEMO_VALUES: &[(&str, f64)] = &[
    ("conversion_rate", 0.05),
    ("total_revenue", 5000.0),
    ("avg_order_value", 45.0),
    ("funnel_completion_rate", 0.3),
    ("cart_abandonment_rate", 0.7),
    ("checkout_success_rate", 0.8),
    ("listing_quality", 0.6),
    ("product_velocity", 0.4),
    ("integration_seamlessness", 0.7),
    ("likes_ratio", 0.7),
    ("comments_ratio", 0.15),
    ("shares_ratio", 0.15),
    ("retention_rate", 0.6),
    ("avg_watch_time", 20.0),
    ("video_duration", 30.0),
    ("engagement_growth_rate", 0.1),
    ("follower_growth_rate", 0.05),
    ("views_growth_rate", 0.15),
    ("hashtag_performance", 0.4),
    ("search_visibility", 0.3),
    ("recommendation_rate", 0.02),
    ("viral_potential", 0.5),
    ("video_quality", 0.3),
    ("content_freshness", 0.6),
    ("posting_consistency", 0.7),
    ("content_diversity", 0.5),
    ("target_demographic_match", 0.6),
    ("audience_engagement_quality", 0.5),
    ("follower_quality_score", 0.4),
    ("audience_retention", 0.6),
    ("brand_alignment", 0.7),
    ("trust_score", 0.6),
    ("authenticity_score", 0.8),
    ("brand_consistency", 0.5),
    ("trend_alignment", 0.4),
    ("timing_score", 0.5),
    ("trend_relevance", 0.6),
    ("image_quality", 0.3),
    ("lighting_score", 0.4),
    ("composition_score", 0.5),
    ("color_balance", 0.6),
    ("total_reach", 5000.0),
    ("unique_viewers", 4000.0),
    ("impression_rate", 0.03),
    ("visibility_score", 0.5),
    ("cost_per_acquisition", 80.0),
    ("cost_per_engagement", 0.8),
    ("cost_per_view", 0.08),
    ("roi_score", 1.2),
];

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
