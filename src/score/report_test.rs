use super::*;
use crate::config::WeightConfig;
use crate::metrics::MetricSet;
use crate::score::analyzer::Orchestrator;

#[test]
fn print_report_does_not_panic() {
    let config = WeightConfig::default();
    let agg = Orchestrator::new(&config).aggregate(&MetricSet::demo());
    print_report(&agg);
}

#[test]
fn print_report_degraded() {
    print_report(&AggregateResult::degraded("c1", "bad config".to_string()));
}

#[test]
fn print_report_with_scorer_errors() {
    let config = WeightConfig::default();
    let metrics = MetricSet::demo().with("video_quality", f64::NAN);
    let agg = Orchestrator::new(&config).aggregate(&metrics);
    assert_eq!(agg.scorer_errors.len(), 1);
    print_report(&agg);
}

#[test]
fn print_comparison_does_not_panic() {
    let config = WeightConfig::default();
    let cmp = Orchestrator::new(&config)
        .compare_equal_weighting(&MetricSet::demo())
        .unwrap();
    print_comparison(&cmp);
}

#[test]
fn print_insights_with_priorities() {
    let config = WeightConfig::default();
    let insights = Orchestrator::new(&config)
        .revenue_insights(&MetricSet::new())
        .unwrap();
    assert_eq!(insights.priority_actions.len(), 3);
    print_insights(&insights);
}

#[test]
fn print_weights_does_not_panic() {
    let config = WeightConfig::default();
    print_weights(&Orchestrator::new(&config).weights_overview());
}
