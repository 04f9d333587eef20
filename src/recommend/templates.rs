//! Static remediation templates and the bottleneck → template mapping.

use serde::Serialize;

use crate::config::Kpi;

/// Priority and cost tiers share one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn priority_weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }

    /// Estimated effort for a cost tier.
    pub fn effort_hours(self) -> u32 {
        match self {
            Self::Low => 4,
            Self::Medium => 12,
            Self::High => 24,
        }
    }
}

/// A/B test proposed alongside a recommendation. Never executed here.
#[derive(Debug, PartialEq, Serialize)]
pub struct Experiment {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub variants: [&'static str; 2],
    pub duration_days: u32,
    pub primary_metric: &'static str,
    pub success_threshold: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub title: &'static str,
    pub priority: Level,
    pub cost: Level,
    pub base_improvement: f64,
    pub actions: &'static [&'static str],
    pub experiment: Experiment,
}

pub static TEMPLATES: &[Template] = &[
    Template {
        key: "conversion",
        title: "Boost Sales Conversion Rate",
        priority: Level::High,
        cost: Level::High,
        base_improvement: 0.20,
        actions: &[
            "Implement urgency tactics (limited time offers)",
            "Add social proof (customer testimonials)",
            "Create product comparison videos",
            "Use influencer partnerships",
            "Optimize product descriptions and pricing",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "conversion_optimized"],
            duration_days: 21,
            primary_metric: "sales_performance_score",
            success_threshold: 0.15,
        },
    },
    Template {
        key: "revenue_growth",
        title: "Grow Revenue per Order",
        priority: Level::High,
        cost: Level::Medium,
        base_improvement: 0.18,
        actions: &[
            "Bundle complementary products",
            "Add tiered free-shipping thresholds",
            "Feature higher-margin items in pinned videos",
            "Offer limited upsells at checkout",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "bundled_offers"],
            duration_days: 21,
            primary_metric: "sales_performance_score",
            success_threshold: 0.12,
        },
    },
    Template {
        key: "cart_abandonment",
        title: "Reduce Cart Abandonment",
        priority: Level::High,
        cost: Level::Medium,
        base_improvement: 0.18,
        actions: &[
            "Add exit-intent popup with discount",
            "Implement cart recovery email sequence",
            "Simplify checkout process",
            "Add multiple payment options",
            "Show security badges and guarantees",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "abandonment_reduction"],
            duration_days: 14,
            primary_metric: "shop_conversion_score",
            success_threshold: 0.12,
        },
    },
    Template {
        key: "funnel",
        title: "Improve Conversion Funnel",
        priority: Level::High,
        cost: Level::Medium,
        base_improvement: 0.15,
        actions: &[
            "Add 3-step CTA in video description",
            "Implement pinned comment with discount code",
            "Optimize checkout process (reduce steps)",
            "Add trust signals (reviews, guarantees)",
            "Test different CTA placements",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "optimized_funnel"],
            duration_days: 14,
            primary_metric: "shop_conversion_score",
            success_threshold: 0.1,
        },
    },
    Template {
        key: "shop_integration",
        title: "Optimize TikTok Shop Integration",
        priority: Level::High,
        cost: Level::Medium,
        base_improvement: 0.16,
        actions: &[
            "Improve product listing quality",
            "Add product tags in videos",
            "Create shop-specific content",
            "Optimize product descriptions",
            "Use shop analytics for insights",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "shop_optimized"],
            duration_days: 14,
            primary_metric: "tiktok_shop_score",
            success_threshold: 0.12,
        },
    },
    Template {
        key: "interaction_balance",
        title: "Improve Engagement Balance",
        priority: Level::Medium,
        cost: Level::Low,
        base_improvement: 0.12,
        actions: &[
            "Add interactive prompts (questions, polls)",
            "Create micro-challenges or contests",
            "Respond to comments within 2 hours",
            "Use call-to-action for comments",
            "Share behind-the-scenes content",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "interactive_content"],
            duration_days: 7,
            primary_metric: "engagement_score",
            success_threshold: 0.08,
        },
    },
    Template {
        key: "video_quality",
        title: "Enhance Video Quality",
        priority: Level::High,
        cost: Level::Low,
        base_improvement: 0.15,
        actions: &[
            "Follow lighting checklist (natural light, avoid backlight)",
            "Use stable camera (tripod or gimbal)",
            "Follow 15-second product demo template",
            "Add clear product close-ups",
            "Use trending audio with product focus",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "enhanced_quality"],
            duration_days: 10,
            primary_metric: "content_strategy_score",
            success_threshold: 0.06,
        },
    },
    Template {
        key: "discovery_reach",
        title: "Expand Discovery and Reach",
        priority: Level::Medium,
        cost: Level::Low,
        base_improvement: 0.10,
        actions: &[
            "Research niche hashtags weekly",
            "Post during peak audience hours",
            "Join trending sounds within 48 hours",
            "Cross-promote with creators in adjacent niches",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "discovery_optimized"],
            duration_days: 14,
            primary_metric: "discovery_score",
            success_threshold: 0.08,
        },
    },
    Template {
        key: "cost_efficiency",
        title: "Lower Acquisition Costs",
        priority: Level::Medium,
        cost: Level::Medium,
        base_improvement: 0.10,
        actions: &[
            "Pause ad sets above target CPA",
            "Shift budget to organic top performers",
            "Retarget engaged viewers instead of cold audiences",
            "Track ROI per campaign weekly",
        ],
        experiment: Experiment {
            kind: "A/B Test",
            variants: ["baseline", "budget_reallocated"],
            duration_days: 21,
            primary_metric: "cost_efficiency_score",
            success_threshold: 0.1,
        },
    },
];

/// Fallback for bottlenecks with no mapped template.
pub static GENERAL: Template = Template {
    key: "general",
    title: "Strengthen Overall Performance",
    priority: Level::Low,
    cost: Level::Low,
    base_improvement: 0.08,
    actions: &[
        "Review the weakest component weekly",
        "Set a measurable target for the next 30 days",
        "Compare against top creators in the niche",
    ],
    experiment: Experiment {
        kind: "A/B Test",
        variants: ["baseline", "iterative_improvement"],
        duration_days: 14,
        primary_metric: "overall_score",
        success_threshold: 0.05,
    },
};

/// `(kpi, component, template key)`. A `None` component is the KPI-level
/// row, used for the KPI score and for components without their own row.
const MAPPING: &[(Kpi, Option<&str>, &str)] = &[
    (Kpi::SalesPerformance, Some("conversion_score"), "conversion"),
    (Kpi::SalesPerformance, Some("revenue_score"), "revenue_growth"),
    (Kpi::SalesPerformance, Some("aov_score"), "revenue_growth"),
    (Kpi::SalesPerformance, None, "conversion"),
    (Kpi::ShopConversion, Some("abandonment_score"), "cart_abandonment"),
    (Kpi::ShopConversion, Some("checkout_score"), "cart_abandonment"),
    (Kpi::ShopConversion, None, "funnel"),
    (Kpi::TiktokShop, None, "shop_integration"),
    (Kpi::Engagement, None, "interaction_balance"),
    (Kpi::EngagementGrowth, None, "discovery_reach"),
    (Kpi::Discovery, None, "discovery_reach"),
    (Kpi::ContentStrategy, None, "video_quality"),
    (Kpi::TrendFit, None, "discovery_reach"),
    (Kpi::ImageScore, None, "video_quality"),
    (Kpi::ReachVisibility, None, "discovery_reach"),
    (Kpi::CostEfficiency, None, "cost_efficiency"),
];

pub fn template(key: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Template for a bottleneck: exact component row, then the KPI-level row,
/// then the general template.
pub fn template_for(kpi: Kpi, component: Option<&str>) -> &'static Template {
    let lookup = |c: Option<&str>| {
        MAPPING
            .iter()
            .find(|(k, comp, _)| *k == kpi && *comp == c)
            .map(|(_, _, key)| *key)
    };
    component
        .and_then(|c| lookup(Some(c)))
        .or_else(|| lookup(None))
        .and_then(template)
        .unwrap_or(&GENERAL)
}

/// Raw metrics to watch after acting on a KPI.
pub fn success_metrics(kpi: Kpi) -> &'static [&'static str] {
    match kpi {
        Kpi::SalesPerformance => &["conversion_rate", "total_revenue", "avg_order_value"],
        Kpi::ShopConversion => &["funnel_completion_rate", "cart_abandonment_rate"],
        Kpi::TiktokShop => &[
            "listing_quality",
            "product_velocity",
            "integration_seamlessness",
        ],
        Kpi::Engagement => &["likes_ratio", "comments_ratio", "shares_ratio"],
        Kpi::ContentStrategy => &["video_quality", "content_freshness"],
        _ => &["overall_score"],
    }
}

#[cfg(test)]
#[path = "templates_test.rs"]
mod tests;
