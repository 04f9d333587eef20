use super::*;
use crate::config::WeightConfig;
use crate::metrics::MetricSet;
use crate::score::analyzer::Orchestrator;

fn scan(metrics: &MetricSet) -> Vec<Bottleneck> {
    let config = WeightConfig::default();
    let agg = Orchestrator::new(&config).aggregate(metrics);
    find_bottlenecks(&agg, &config.thresholds)
}

fn find(list: &[Bottleneck], kpi: Kpi, component: Option<&str>) -> Option<Bottleneck> {
    list.iter()
        .find(|b| b.kpi == kpi && b.component == component)
        .cloned()
}

/// Shop-conversion inputs at healthy values except abandonment.
fn shop_with_abandonment(rate: f64) -> MetricSet {
    MetricSet::demo()
        .with("funnel_completion_rate", 0.6)
        .with("checkout_success_rate", 0.8)
        .with("cart_abandonment_rate", rate)
}

#[test]
fn test_sorted_by_impact_descending() {
    let list = scan(&MetricSet::demo());
    assert!(!list.is_empty());
    for w in list.windows(2) {
        assert!(
            w[0].impact >= w[1].impact,
            "{:?} before {:?}",
            w[0].component,
            w[1].component
        );
    }
}

#[test]
fn test_impact_is_score_times_weight() {
    for b in scan(&MetricSet::demo()) {
        assert!((b.impact - b.score * b.weight).abs() < 1e-12);
    }
}

#[test]
fn test_abandonment_at_boundary_is_medium() {
    let list = scan(&shop_with_abandonment(0.7));
    let b = find(&list, Kpi::ShopConversion, Some("abandonment_score"))
        .expect("abandonment 0.7 should be flagged");
    assert_eq!(b.severity, Severity::Medium);
    assert!((b.score - 0.3).abs() < 1e-9);
    assert!((b.weight - 0.15).abs() < 1e-12);
}

#[test]
fn test_abandonment_above_boundary_is_high() {
    let list = scan(&shop_with_abandonment(0.8));
    let b = find(&list, Kpi::ShopConversion, Some("abandonment_score")).unwrap();
    assert_eq!(b.severity, Severity::High);
}

#[test]
fn test_moderate_abandonment_not_flagged() {
    let list = scan(&shop_with_abandonment(0.5));
    assert!(find(&list, Kpi::ShopConversion, Some("abandonment_score")).is_none());
}

#[test]
fn test_video_quality_escalation() {
    let list = scan(&MetricSet::demo().with("video_quality", 0.1));
    let b = find(&list, Kpi::ContentStrategy, Some("video_quality")).unwrap();
    assert_eq!(b.severity, Severity::High);
    assert!((b.weight - 0.06 * 3.0).abs() < 1e-12, "got {}", b.weight);
    assert!((b.impact - 0.1 * 0.18).abs() < 1e-12);
}

#[test]
fn test_video_quality_medium_multiplier() {
    let list = scan(&MetricSet::demo().with("video_quality", 0.3));
    let b = find(&list, Kpi::ContentStrategy, Some("video_quality")).unwrap();
    assert_eq!(b.severity, Severity::Medium);
    assert!((b.weight - 0.12).abs() < 1e-12, "got {}", b.weight);
}

#[test]
fn test_conversion_rule_flags_below_half() {
    let list = scan(&MetricSet::demo().with("conversion_rate", 0.04));
    let b = find(&list, Kpi::SalesPerformance, Some("conversion_score")).unwrap();
    assert_eq!(b.severity, Severity::Medium);
    let list = scan(&MetricSet::demo().with("conversion_rate", 0.01));
    let b = find(&list, Kpi::SalesPerformance, Some("conversion_score")).unwrap();
    assert_eq!(b.severity, Severity::High);
}

#[test]
fn test_kpi_level_bottleneck() {
    let list = scan(&MetricSet::new());
    let b = find(&list, Kpi::TiktokShop, None).expect("zero tiktok score is a bottleneck");
    assert_eq!(b.severity, Severity::High);
    assert_eq!(b.score, 0.0);
    assert_eq!(b.impact, 0.0);
}

#[test]
fn test_default_rule_uses_configured_low_threshold() {
    let config = WeightConfig::default();
    let agg = Orchestrator::new(&config).aggregate(&MetricSet::demo());
    // roi 1.2 / 5 = 0.24 sits under the default 0.3 but over 0.2.
    let mut thresholds = config.thresholds;
    assert!(find(&find_bottlenecks(&agg, &thresholds), Kpi::CostEfficiency, Some("roi")).is_some());
    thresholds.low = 0.2;
    assert!(find(&find_bottlenecks(&agg, &thresholds), Kpi::CostEfficiency, Some("roi")).is_none());
}

#[test]
fn test_healthy_creator_has_no_bottlenecks() {
    let mut m = MetricSet::new()
        .with("conversion_rate", 0.1)
        .with("total_revenue", 10_000.0)
        .with("avg_order_value", 50.0)
        .with("cart_abandonment_rate", 0.0)
        .with("likes_ratio", 0.7)
        .with("comments_ratio", 0.2)
        .with("shares_ratio", 0.1)
        .with("avg_watch_time", 30.0)
        .with("engagement_growth_rate", 2.0)
        .with("follower_growth_rate", 1.0)
        .with("views_growth_rate", 2.0)
        .with("recommendation_rate", 0.1)
        .with("total_reach", 10_000.0)
        .with("unique_viewers", 10_000.0)
        .with("impression_rate", 0.1)
        .with("cost_per_acquisition", 25.0)
        .with("cost_per_engagement", 0.25)
        .with("cost_per_view", 0.025)
        .with("roi_score", 5.0);
    for key in [
        "funnel_completion_rate",
        "checkout_success_rate",
        "listing_quality",
        "product_velocity",
        "integration_seamlessness",
        "retention_rate",
        "hashtag_performance",
        "search_visibility",
        "viral_potential",
        "video_quality",
        "content_freshness",
        "posting_consistency",
        "content_diversity",
        "target_demographic_match",
        "audience_engagement_quality",
        "follower_quality_score",
        "audience_retention",
        "brand_alignment",
        "trust_score",
        "authenticity_score",
        "brand_consistency",
        "trend_alignment",
        "timing_score",
        "trend_relevance",
        "image_quality",
        "lighting_score",
        "composition_score",
        "color_balance",
        "visibility_score",
    ] {
        m = m.with(key, 1.0);
    }
    assert!(scan(&m).is_empty());
}

#[test]
fn test_degraded_aggregate_has_no_bottlenecks() {
    let agg = AggregateResult::degraded("c", "broken".to_string());
    assert!(find_bottlenecks(&agg, &Thresholds::default()).is_empty());
}

#[test]
fn test_raw_values_are_not_scanned() {
    // Raw total_revenue of 0 must not appear as its own bottleneck.
    let list = scan(&MetricSet::new());
    assert!(list.iter().all(|b| b.component != Some("total_revenue")));
}
