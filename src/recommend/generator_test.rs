use super::*;
use proptest::prelude::*;

fn bottleneck(kpi: Kpi, component: Option<&'static str>, score: f64, weight: f64) -> Bottleneck {
    Bottleneck {
        kpi,
        component,
        score,
        weight,
        impact: score * weight,
        severity: if score < 0.2 {
            Severity::High
        } else {
            Severity::Medium
        },
    }
}

fn assert_sorted(recs: &[Recommendation]) {
    for w in recs.windows(2) {
        let ordered = w[0].priority_score > w[1].priority_score
            || (w[0].priority_score == w[1].priority_score
                && w[0].expected_improvement >= w[1].expected_improvement);
        assert!(ordered, "{} ranked before {}", w[0].id, w[1].id);
    }
}

#[test]
fn test_recommendation_formulas() {
    let config = WeightConfig::default();
    let r = Recommender::new(&config);
    let b = bottleneck(Kpi::ShopConversion, Some("abandonment_score"), 0.3, 0.15);
    let rec = r.recommendation_for(&b);
    assert_eq!(rec.id, "rec_shop_conversion_abandonment_score");
    assert_eq!(rec.description, "Improve abandonment_score in shop_conversion");
    assert_eq!(rec.template, "cart_abandonment");
    // high priority template: 3 * 0.3 * 1.4 * 1
    assert!((rec.priority_score - 1.26).abs() < 1e-9, "got {}", rec.priority_score);
    assert!((rec.expected_improvement - 0.126).abs() < 1e-9);
    assert!((rec.target_score - 0.426).abs() < 1e-9);
    // 0.8 * 1.0 * min(1.5, 0.045 * 10)
    assert!((rec.confidence - 0.36).abs() < 1e-9);
    assert!(rec.low_confidence);
    assert_eq!(rec.cost_level, Level::Medium);
    assert_eq!(rec.effort_hours, 12);
    assert_eq!(rec.success_metrics[0], "funnel_completion_rate");
}

#[test]
fn test_kpi_level_recommendation_id() {
    let config = WeightConfig::default();
    let b = bottleneck(Kpi::EngagementGrowth, None, 0.25, 0.05);
    let rec = Recommender::new(&config).recommendation_for(&b);
    assert_eq!(rec.id, "rec_engagement_growth_overall");
    assert_eq!(rec.description, "Improve overall score in engagement_growth");
    assert_eq!(rec.template, "discovery_reach");
}

#[test]
fn test_unmapped_bottleneck_uses_general_template() {
    let config = WeightConfig::default();
    let b = bottleneck(Kpi::BrandFit, Some("trust"), 0.1, 0.03);
    let rec = Recommender::new(&config).recommendation_for(&b);
    assert_eq!(rec.template, "general");
    assert_eq!(rec.success_metrics, &["overall_score"]);
}

#[test]
fn test_target_score_capped_at_one() {
    let config = WeightConfig::default();
    let b = bottleneck(Kpi::SalesPerformance, Some("conversion_score"), 0.95, 0.3);
    let rec = Recommender::new(&config).recommendation_for(&b);
    assert!(rec.target_score <= 1.0);
}

#[test]
fn test_confidence_capped() {
    let config = WeightConfig::default();
    let mut b = bottleneck(Kpi::SalesPerformance, Some("conversion_score"), 0.15, 0.9);
    b.severity = Severity::High;
    let rec = Recommender::new(&config).recommendation_for(&b);
    assert_eq!(rec.confidence, 0.95);
    assert!(!rec.low_confidence);
}

/// The impact-based confidence formula rewards bottlenecks that are less
/// severe: a KPI at 0.0 has zero impact and therefore zero confidence,
/// while the same KPI at 0.25 gets a positive confidence.
#[test]
fn test_zero_score_bottleneck_has_zero_confidence() {
    let config = WeightConfig::default();
    let r = Recommender::new(&config);
    let worst = r.recommendation_for(&bottleneck(Kpi::TiktokShop, None, 0.0, 0.10));
    let milder = r.recommendation_for(&bottleneck(Kpi::TiktokShop, None, 0.25, 0.10));
    assert_eq!(worst.confidence, 0.0);
    assert!(worst.low_confidence);
    assert!(milder.confidence > worst.confidence);
    // Priority still ranks the worse bottleneck first.
    assert!(worst.priority_score > milder.priority_score);
}

#[test]
fn test_demo_round_trip() {
    let config = WeightConfig::default();
    let metrics = MetricSet::demo();
    let result = Recommender::new(&config).recommend(&metrics);
    assert!(result.error.is_none());
    let analysis = result.analysis.as_ref().unwrap();
    assert!(analysis.overall_score > 0.0 && analysis.overall_score < 1.0);
    assert_eq!(analysis.creator_id, "demo_creator_001");
    assert_eq!(analysis.bottleneck_count, 8);
    assert_eq!(analysis.scores.len(), 13);
    assert!(!result.recommendations.is_empty());
    assert!(result.recommendations.len() <= config.max_recommendations);
    assert_sorted(&result.recommendations);
    assert_eq!(result.recommendations[0].template, "cart_abandonment");
    assert_eq!(result.recommendations[1].template, "video_quality");
}

#[test]
fn test_video_quality_ranks_first_when_very_low() {
    let config = WeightConfig::default();
    let metrics = MetricSet::demo().with("video_quality", 0.1);
    let result = Recommender::new(&config).recommend(&metrics);
    let top = &result.recommendations[0];
    assert_eq!(top.id, "rec_content_strategy_video_quality");
    assert_eq!(top.severity, Severity::High);
    // 3 * (0.18 * 2) * (0.9 * 2) * 2
    assert!((top.priority_score - 3.888).abs() < 1e-9, "got {}", top.priority_score);
}

#[test]
fn test_max_override() {
    let config = WeightConfig::default();
    let result = Recommender::new(&config)
        .with_max(5)
        .recommend(&MetricSet::demo());
    assert_eq!(result.recommendations.len(), 5);
    assert_sorted(&result.recommendations);

    let one = Recommender::new(&config)
        .with_max(1)
        .recommend(&MetricSet::demo());
    assert_eq!(one.recommendations.len(), 1);
    assert_eq!(one.recommendations[0].id, result.recommendations[0].id);
}

#[test]
fn test_zero_max_degrades() {
    let config = WeightConfig::default();
    let result = Recommender::new(&config)
        .with_max(0)
        .recommend(&MetricSet::demo());
    assert!(result.error.is_some());
    assert!(result.recommendations.is_empty());
}

#[test]
fn test_invalid_config_degrades_to_error_shape() {
    let mut config = WeightConfig::default();
    config.weights.remove(&Kpi::Discovery);
    let result = Recommender::new(&config).recommend(&MetricSet::demo());
    let json = serde_json::to_value(&result).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2, "got {json}");
    assert!(json["error"].as_str().unwrap().contains("discovery"));
    assert_eq!(json["recommendations"], serde_json::json!([]));
}

#[test]
fn test_success_json_shape() {
    let config = WeightConfig::default();
    let mut metrics = MetricSet::demo();
    metrics.timestamp = Some("2025-03-01T10:00:00+00:00".to_string());
    let json = serde_json::to_value(Recommender::new(&config).recommend(&metrics)).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["timestamp"], "2025-03-01T10:00:00+00:00");
    assert_eq!(json["creator_id"], "demo_creator_001");
    assert!(json["insights"]["improvement_potential"].is_number());
    let rec = &json["recommendations"][0];
    assert_eq!(rec["experiment"]["type"], "A/B Test");
    assert_eq!(rec["kpi_affected"], "shop_conversion");
    assert_eq!(rec["cost_level"], "medium");
    assert!(rec["actions"].as_array().unwrap().len() >= 3);
}

#[test]
fn test_next_steps_empty() {
    assert_eq!(next_steps(&[]), vec!["No immediate actions required"]);
}

#[test]
fn test_next_steps_format() {
    let config = WeightConfig::default();
    let result = Recommender::new(&config).recommend(&MetricSet::demo());
    let steps = &result.analysis.as_ref().unwrap().next_steps;
    assert_eq!(
        steps,
        &vec![
            "1. Implement 'Reduce Cart Abandonment' (Priority: 1.3)".to_string(),
            "2. Set up A/B test: A/B Test".to_string(),
            "3. Monitor funnel_completion_rate for 14 days".to_string(),
            "4. Plan implementation of 'Enhance Video Quality'".to_string(),
        ]
    );
}

#[test]
fn test_next_steps_single() {
    let config = WeightConfig::default();
    let rec = Recommender::new(&config)
        .recommendation_for(&bottleneck(Kpi::Engagement, Some("interaction_balance"), 0.4, 0.1));
    let steps = next_steps(&[rec]);
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2], "3. Monitor likes_ratio for 7 days");
}

proptest! {
    #[test]
    fn recommendations_bounded_and_sorted(
        max in 1usize..6,
        conversion in 0.0f64..0.1,
        abandonment in 0.0f64..1.0,
        video in 0.0f64..1.0,
        listing in 0.0f64..1.0,
        likes in 0.0f64..1.0,
    ) {
        let config = WeightConfig::default();
        let metrics = MetricSet::demo()
            .with("conversion_rate", conversion)
            .with("cart_abandonment_rate", abandonment)
            .with("video_quality", video)
            .with("listing_quality", listing)
            .with("likes_ratio", likes);
        let result = Recommender::new(&config).with_max(max).recommend(&metrics);
        prop_assert!(result.error.is_none());
        prop_assert!(result.recommendations.len() <= max);
        for w in result.recommendations.windows(2) {
            prop_assert!(
                w[0].priority_score > w[1].priority_score
                    || (w[0].priority_score == w[1].priority_score
                        && w[0].expected_improvement >= w[1].expected_improvement)
            );
        }
        for r in &result.recommendations {
            prop_assert!((0.0..=0.95).contains(&r.confidence));
            prop_assert!(r.target_score <= 1.0);
        }
    }
}
