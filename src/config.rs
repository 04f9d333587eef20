//! Weight table, tier membership and shared thresholds.
//!
//! The default table is the tiered revenue-first weighting: Tier 1 (direct
//! revenue drivers) carries 55%, Tier 2 (revenue enablers) 32% and Tier 3
//! (general health, cost and reach) 13%. A TOML file may adjust weights
//! inside a tier, the performance thresholds and the recommendation bound;
//! tier totals are fixed.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tolerance used for every weight-sum check.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// One of the thirteen scored KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    SalesPerformance,
    ShopConversion,
    TiktokShop,
    Engagement,
    EngagementGrowth,
    Discovery,
    ContentStrategy,
    AudienceFit,
    BrandFit,
    TrendFit,
    ImageScore,
    ReachVisibility,
    CostEfficiency,
}

impl Kpi {
    pub const ALL: [Kpi; 13] = [
        Kpi::SalesPerformance,
        Kpi::ShopConversion,
        Kpi::TiktokShop,
        Kpi::Engagement,
        Kpi::EngagementGrowth,
        Kpi::Discovery,
        Kpi::ContentStrategy,
        Kpi::AudienceFit,
        Kpi::BrandFit,
        Kpi::TrendFit,
        Kpi::ImageScore,
        Kpi::ReachVisibility,
        Kpi::CostEfficiency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SalesPerformance => "sales_performance",
            Self::ShopConversion => "shop_conversion",
            Self::TiktokShop => "tiktok_shop",
            Self::Engagement => "engagement",
            Self::EngagementGrowth => "engagement_growth",
            Self::Discovery => "discovery",
            Self::ContentStrategy => "content_strategy",
            Self::AudienceFit => "audience_fit",
            Self::BrandFit => "brand_fit",
            Self::TrendFit => "trend_fit",
            Self::ImageScore => "image_score",
            Self::ReachVisibility => "reach_visibility",
            Self::CostEfficiency => "cost_efficiency",
        }
    }

    /// Static tier membership. Every KPI belongs to exactly one tier.
    pub fn tier(self) -> Tier {
        match self {
            Self::SalesPerformance | Self::ShopConversion | Self::TiktokShop => Tier::Tier1,
            Self::Engagement
            | Self::EngagementGrowth
            | Self::Discovery
            | Self::ContentStrategy
            | Self::AudienceFit
            | Self::BrandFit => Tier::Tier2,
            Self::TrendFit | Self::ImageScore | Self::ReachVisibility | Self::CostEfficiency => {
                Tier::Tier3
            }
        }
    }

    /// Weight in the default table.
    pub fn default_weight(self) -> f64 {
        match self {
            Self::SalesPerformance => 0.30,
            Self::ShopConversion => 0.15,
            Self::TiktokShop => 0.10,
            Self::Engagement => 0.10,
            Self::EngagementGrowth => 0.05,
            Self::Discovery => 0.04,
            Self::ContentStrategy => 0.06,
            Self::AudienceFit => 0.04,
            Self::BrandFit => 0.03,
            Self::TrendFit => 0.04,
            Self::ImageScore => 0.03,
            Self::ReachVisibility => 0.03,
            Self::CostEfficiency => 0.03,
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Tier1, Tier::Tier2, Tier::Tier3];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tier1 => "tier_1",
            Self::Tier2 => "tier_2",
            Self::Tier3 => "tier_3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Direct Revenue Drivers",
            Self::Tier2 => "Revenue Enablers",
            Self::Tier3 => "General Health",
        }
    }

    /// Total weight the tier must carry.
    pub fn budget(self) -> f64 {
        match self {
            Self::Tier1 => 0.55,
            Self::Tier2 => 0.32,
            Self::Tier3 => 0.13,
        }
    }

    /// KPIs in this tier, in table order.
    pub fn kpis(self) -> Vec<Kpi> {
        Kpi::ALL.into_iter().filter(|k| k.tier() == self).collect()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance bands: `< low` is low, `< medium` is medium, otherwise high.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 0.3,
            medium: 0.6,
            high: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceLevel {
    Low,
    Medium,
    High,
}

impl PerformanceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Thresholds {
    pub fn level(&self, score: f64) -> PerformanceLevel {
        if score < self.low {
            PerformanceLevel::Low
        } else if score < self.medium {
            PerformanceLevel::Medium
        } else {
            PerformanceLevel::High
        }
    }
}

/// Process-wide scoring configuration. Built once, then shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightConfig {
    pub weights: BTreeMap<Kpi, f64>,
    pub thresholds: Thresholds,
    pub max_recommendations: usize,
    pub min_confidence: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            weights: Kpi::ALL.iter().map(|k| (*k, k.default_weight())).collect(),
            thresholds: Thresholds::default(),
            max_recommendations: 3,
            min_confidence: 0.7,
        }
    }
}

impl WeightConfig {
    /// Weight of a KPI; 0.0 when the table lacks it (rejected by `validate`).
    pub fn weight(&self, kpi: Kpi) -> f64 {
        self.weights.get(&kpi).copied().unwrap_or(0.0)
    }

    pub fn tier_weight(&self, tier: Tier) -> f64 {
        tier.kpis().into_iter().map(|k| self.weight(k)).sum()
    }

    pub fn total_weight(&self) -> f64 {
        Kpi::ALL.iter().map(|k| self.weight(*k)).sum()
    }

    pub fn validate(&self) -> Result<()> {
        for kpi in Kpi::ALL {
            match self.weights.get(&kpi) {
                None => return Err(Error::Config(format!("missing weight for {kpi}"))),
                Some(w) if !w.is_finite() || *w < 0.0 => {
                    return Err(Error::Config(format!(
                        "weight for {kpi} must be a non-negative number, got {w}"
                    )));
                }
                Some(_) => {}
            }
        }
        for tier in Tier::ALL {
            let sum = self.tier_weight(tier);
            if (sum - tier.budget()).abs() > WEIGHT_EPSILON {
                return Err(Error::Config(format!(
                    "{tier} weights must sum to {:.2}, got {sum:.4}",
                    tier.budget()
                )));
            }
        }
        let total = self.total_weight();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(Error::Config(format!(
                "weights must sum to 1.0, got {total:.4}"
            )));
        }
        let t = &self.thresholds;
        let ordered = 0.0 <= t.low && t.low < t.medium && t.medium < t.high && t.high <= 1.0;
        if !ordered {
            return Err(Error::Config(format!(
                "thresholds must satisfy 0 <= low < medium < high <= 1, got {}/{}/{}",
                t.low, t.medium, t.high
            )));
        }
        if self.max_recommendations == 0 {
            return Err(Error::Config(
                "recommendations.max must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::Config(format!(
                "recommendations.min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }

    /// Default table overlaid with an optional TOML file, then validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path {
            let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            config.apply(toml::from_str(&text)?);
            tracing::debug!(path = %path.display(), "loaded config overrides");
        }
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(t) = file.thresholds {
            self.thresholds.low = t.low.unwrap_or(self.thresholds.low);
            self.thresholds.medium = t.medium.unwrap_or(self.thresholds.medium);
            self.thresholds.high = t.high.unwrap_or(self.thresholds.high);
        }
        if let Some(r) = file.recommendations {
            self.max_recommendations = r.max.unwrap_or(self.max_recommendations);
            self.min_confidence = r.min_confidence.unwrap_or(self.min_confidence);
        }
        self.weights.extend(file.weights);
    }
}

/// On-disk shape of a config override file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    thresholds: Option<ThresholdsFile>,
    recommendations: Option<RecommendationsFile>,
    #[serde(default)]
    weights: BTreeMap<Kpi, f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdsFile {
    low: Option<f64>,
    medium: Option<f64>,
    high: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendationsFile {
    max: Option<usize>,
    min_confidence: Option<f64>,
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
