//! The thirteen KPI scorers as a data-driven registry.
//!
//! Each scorer is a plain function from a `MetricSet` to a `Components`
//! list: named normalized parts with their intra-scorer weights, plus the
//! raw metric values they were derived from. The KPI score is the weighted
//! sum of the parts. Part weights of every scorer sum to 1.0.

use std::collections::BTreeMap;

use crate::config::Kpi;
use crate::error::{Error, Result};
use crate::metrics::MetricSet;

use super::normalize::{interaction_balance, normalize};

/// One weighted, normalized sub-score.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Part {
    name: &'static str,
    weight: f64,
    value: f64,
}

/// Builder for a scorer's parts and raw pass-through values.
#[derive(Debug, Clone, Default)]
pub struct Components {
    parts: Vec<Part>,
    raw: Vec<(&'static str, f64)>,
}

impl Components {
    fn new() -> Self {
        Self::default()
    }

    fn part(mut self, name: &'static str, weight: f64, value: f64) -> Self {
        self.parts.push(Part {
            name,
            weight,
            value,
        });
        self
    }

    fn raw(mut self, name: &'static str, value: f64) -> Self {
        self.raw.push((name, value));
        self
    }
}

/// Evaluated scorer output: the KPI score and its named components.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub score: f64,
    pub components: BTreeMap<&'static str, f64>,
    pub raw: BTreeMap<&'static str, f64>,
}

/// Registry entry: which KPI, and how to compute it.
pub struct ScorerDef {
    pub kpi: Kpi,
    pub compute: fn(&MetricSet) -> Components,
}

impl ScorerDef {
    /// Compute the score, rejecting any non-finite part.
    pub fn evaluate(&self, metrics: &MetricSet) -> Result<Breakdown> {
        let c = (self.compute)(metrics);
        if let Some(bad) = c.parts.iter().find(|p| !p.value.is_finite()) {
            return Err(Error::NonFinite {
                kpi: self.kpi,
                component: bad.name,
            });
        }
        let score: f64 = c.parts.iter().map(|p| p.weight * p.value).sum();
        Ok(Breakdown {
            score: score.clamp(0.0, 1.0),
            components: c.parts.iter().map(|p| (p.name, p.value)).collect(),
            raw: c.raw.into_iter().collect(),
        })
    }
}

/// All scorers, in `Kpi::ALL` order.
pub static SCORERS: [ScorerDef; 13] = [
    ScorerDef {
        kpi: Kpi::SalesPerformance,
        compute: sales_performance,
    },
    ScorerDef {
        kpi: Kpi::ShopConversion,
        compute: shop_conversion,
    },
    ScorerDef {
        kpi: Kpi::TiktokShop,
        compute: tiktok_shop,
    },
    ScorerDef {
        kpi: Kpi::Engagement,
        compute: engagement,
    },
    ScorerDef {
        kpi: Kpi::EngagementGrowth,
        compute: engagement_growth,
    },
    ScorerDef {
        kpi: Kpi::Discovery,
        compute: discovery,
    },
    ScorerDef {
        kpi: Kpi::ContentStrategy,
        compute: content_strategy,
    },
    ScorerDef {
        kpi: Kpi::AudienceFit,
        compute: audience_fit,
    },
    ScorerDef {
        kpi: Kpi::BrandFit,
        compute: brand_fit,
    },
    ScorerDef {
        kpi: Kpi::TrendFit,
        compute: trend_fit,
    },
    ScorerDef {
        kpi: Kpi::ImageScore,
        compute: image_score,
    },
    ScorerDef {
        kpi: Kpi::ReachVisibility,
        compute: reach_visibility,
    },
    ScorerDef {
        kpi: Kpi::CostEfficiency,
        compute: cost_efficiency,
    },
];

pub fn scorer_for(kpi: Kpi) -> &'static ScorerDef {
    &SCORERS[kpi as usize]
}

fn sales_performance(m: &MetricSet) -> Components {
    let conversion = m.get("conversion_rate");
    let revenue = m.get("total_revenue");
    let aov = m.get("avg_order_value");
    Components::new()
        .part("conversion_score", 0.4, normalize(conversion, 0.0, 0.1))
        .part(
            "revenue_score",
            0.4,
            normalize(revenue, 0.0, m.get("target_revenue")),
        )
        .part("aov_score", 0.2, normalize(aov, 0.0, m.get("target_aov")))
        .raw("conversion_rate", conversion)
        .raw("total_revenue", revenue)
        .raw("avg_order_value", aov)
}

fn shop_conversion(m: &MetricSet) -> Components {
    let funnel = m.get("funnel_completion_rate");
    let abandonment = m.get("cart_abandonment_rate");
    let checkout = m.get("checkout_success_rate");
    Components::new()
        .part("funnel_score", 0.5, normalize(funnel, 0.0, 1.0))
        .part("abandonment_score", 0.3, normalize(1.0 - abandonment, 0.0, 1.0))
        .part("checkout_score", 0.2, normalize(checkout, 0.0, 1.0))
        .raw("funnel_completion_rate", funnel)
        .raw("cart_abandonment_rate", abandonment)
        .raw("checkout_success_rate", checkout)
}

fn tiktok_shop(m: &MetricSet) -> Components {
    let listing = m.get("listing_quality");
    let velocity = m.get("product_velocity");
    let integration = m.get("integration_seamlessness");
    Components::new()
        .part("listing_score", 0.4, normalize(listing, 0.0, 1.0))
        .part("velocity_score", 0.35, normalize(velocity, 0.0, 1.0))
        .part("integration_score", 0.25, normalize(integration, 0.0, 1.0))
        .raw("listing_quality", listing)
        .raw("product_velocity", velocity)
        .raw("integration_seamlessness", integration)
}

fn engagement(m: &MetricSet) -> Components {
    let likes = m.get("likes_ratio");
    let comments = m.get("comments_ratio");
    let shares = m.get("shares_ratio");
    let retention = m.get("retention_rate");
    let watch = m.get("avg_watch_time");
    let duration = m.get("video_duration");
    let completion = if duration > 0.0 {
        (watch / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Components::new()
        .part(
            "interaction_balance",
            0.4,
            interaction_balance(likes, comments, shares),
        )
        .part("retention_score", 0.25, normalize(retention, 0.0, 1.0))
        .part("sharing_score", 0.25, normalize(shares, 0.0, 0.1))
        .part("watch_completion", 0.1, completion)
        .raw("likes_ratio", likes)
        .raw("comments_ratio", comments)
        .raw("shares_ratio", shares)
        .raw("retention_rate", retention)
        .raw("avg_watch_time", watch)
        .raw("video_duration", duration)
}

/// Growth rates are fractional changes. The ranges start below zero so a
/// shrinking account still separates from a collapsing one.
fn engagement_growth(m: &MetricSet) -> Components {
    let engagement = m.get("engagement_growth_rate");
    let followers = m.get("follower_growth_rate");
    let views = m.get("views_growth_rate");
    Components::new()
        .part("engagement_growth", 0.5, normalize(engagement, -0.5, 2.0))
        .part("follower_growth", 0.3, normalize(followers, -0.3, 1.0))
        .part("views_growth", 0.2, normalize(views, -0.5, 2.0))
        .raw("engagement_growth_rate", engagement)
        .raw("follower_growth_rate", followers)
        .raw("views_growth_rate", views)
}

fn discovery(m: &MetricSet) -> Components {
    let hashtag = m.get("hashtag_performance");
    let search = m.get("search_visibility");
    let recommendation = m.get("recommendation_rate");
    let viral = m.get("viral_potential");
    Components::new()
        .part("hashtag_score", 0.3, normalize(hashtag, 0.0, 1.0))
        .part("search_score", 0.3, normalize(search, 0.0, 1.0))
        .part(
            "recommendation_score",
            0.2,
            normalize(recommendation, 0.0, 0.1),
        )
        .part("viral_score", 0.2, normalize(viral, 0.0, 1.0))
        .raw("hashtag_performance", hashtag)
        .raw("search_visibility", search)
        .raw("recommendation_rate", recommendation)
        .raw("viral_potential", viral)
}

fn content_strategy(m: &MetricSet) -> Components {
    let quality = m.get("video_quality");
    let freshness = m.get("content_freshness");
    let consistency = m.get("posting_consistency");
    let diversity = m.get("content_diversity");
    Components::new()
        .part("video_quality", 0.4, normalize(quality, 0.0, 1.0))
        .part("content_freshness", 0.25, normalize(freshness, 0.0, 1.0))
        .part("posting_consistency", 0.2, normalize(consistency, 0.0, 1.0))
        .part("content_diversity", 0.15, normalize(diversity, 0.0, 1.0))
        .raw("raw_video_quality", quality)
        .raw("raw_content_freshness", freshness)
        .raw("raw_posting_consistency", consistency)
        .raw("raw_content_diversity", diversity)
}

fn audience_fit(m: &MetricSet) -> Components {
    let demographic = m.get("target_demographic_match");
    let quality = m.get("audience_engagement_quality");
    let followers = m.get("follower_quality_score");
    let retention = m.get("audience_retention");
    Components::new()
        .part("demographic_score", 0.3, normalize(demographic, 0.0, 1.0))
        .part("engagement_quality_score", 0.3, normalize(quality, 0.0, 1.0))
        .part("follower_quality", 0.2, normalize(followers, 0.0, 1.0))
        .part("retention_score", 0.2, normalize(retention, 0.0, 1.0))
        .raw("target_demographic_match", demographic)
        .raw("audience_engagement_quality", quality)
        .raw("follower_quality_score", followers)
        .raw("audience_retention", retention)
}

fn brand_fit(m: &MetricSet) -> Components {
    let alignment = m.get("brand_alignment");
    let trust = m.get("trust_score");
    let authenticity = m.get("authenticity_score");
    let consistency = m.get("brand_consistency");
    Components::new()
        .part("alignment_score", 0.3, normalize(alignment, 0.0, 1.0))
        .part("trust", 0.3, normalize(trust, 0.0, 1.0))
        .part("authenticity", 0.2, normalize(authenticity, 0.0, 1.0))
        .part("consistency", 0.2, normalize(consistency, 0.0, 1.0))
        .raw("brand_alignment", alignment)
        .raw("trust_score", trust)
        .raw("authenticity_score", authenticity)
        .raw("brand_consistency", consistency)
}

fn trend_fit(m: &MetricSet) -> Components {
    let alignment = m.get("trend_alignment");
    let timing = m.get("timing_score");
    let viral = m.get("viral_potential");
    let relevance = m.get("trend_relevance");
    Components::new()
        .part("alignment_score", 0.3, normalize(alignment, 0.0, 1.0))
        .part("timing", 0.3, normalize(timing, 0.0, 1.0))
        .part("viral", 0.2, normalize(viral, 0.0, 1.0))
        .part("relevance", 0.2, normalize(relevance, 0.0, 1.0))
        .raw("trend_alignment", alignment)
        .raw("timing_score", timing)
        .raw("viral_potential", viral)
        .raw("trend_relevance", relevance)
}

fn image_score(m: &MetricSet) -> Components {
    let quality = m.get("image_quality");
    let lighting = m.get("lighting_score");
    let composition = m.get("composition_score");
    let color = m.get("color_balance");
    Components::new()
        .part("quality", 0.4, normalize(quality, 0.0, 1.0))
        .part("lighting", 0.3, normalize(lighting, 0.0, 1.0))
        .part("composition", 0.2, normalize(composition, 0.0, 1.0))
        .part("color", 0.1, normalize(color, 0.0, 1.0))
        .raw("image_quality", quality)
        .raw("lighting_score", lighting)
        .raw("composition_score", composition)
        .raw("color_balance", color)
}

fn reach_visibility(m: &MetricSet) -> Components {
    let reach = m.get("total_reach");
    let unique = m.get("unique_viewers");
    let impressions = m.get("impression_rate");
    let visibility = m.get("visibility_score");
    let target = m.get("target_reach");
    Components::new()
        .part("reach_score", 0.3, normalize(reach, 0.0, target))
        .part("unique_score", 0.3, normalize(unique, 0.0, target))
        .part("impression", 0.2, normalize(impressions, 0.0, 0.1))
        .part("visibility", 0.2, normalize(visibility, 0.0, 1.0))
        .raw("total_reach", reach)
        .raw("unique_viewers", unique)
        .raw("impression_rate", impressions)
        .raw("visibility_score", visibility)
}

/// Costs are inverted into `target / actual` ratios: paying half the target
/// scores 2.0 before normalization onto 0..2.
fn cost_efficiency(m: &MetricSet) -> Components {
    let cpa = m.get("cost_per_acquisition");
    let cpe = m.get("cost_per_engagement");
    let cpv = m.get("cost_per_view");
    let roi = m.get("roi_score");
    let cpa_ratio = m.get("target_cpa") / cpa.max(0.01);
    let cpe_ratio = m.get("target_cpe") / cpe.max(0.01);
    let cpv_ratio = m.get("target_cpv") / cpv.max(0.001);
    Components::new()
        .part("cpa_score", 0.4, normalize(cpa_ratio, 0.0, 2.0))
        .part("cpe_score", 0.3, normalize(cpe_ratio, 0.0, 2.0))
        .part("cpv_score", 0.2, normalize(cpv_ratio, 0.0, 2.0))
        .part("roi", 0.1, normalize(roi, 0.0, 5.0))
        .raw("cost_per_acquisition", cpa)
        .raw("cost_per_engagement", cpe)
        .raw("cost_per_view", cpv)
        .raw("roi_score", roi)
}

#[cfg(test)]
#[path = "scorers_test.rs"]
mod tests;
