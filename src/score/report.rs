use super::analyzer::{AggregateResult, ComparisonResult, RevenueInsights, WeightsOverview};
use crate::config::{Kpi, Tier};
use crate::report_helpers;

/// Print the aggregate as a table: headline scores, tier averages, then one
/// row per KPI grouped by tier.
pub fn print_report(agg: &AggregateResult) {
    let separator = report_helpers::separator(78);

    println!("Creator KPI Score: {}", agg.creator_id);
    println!("{separator}");
    if let Some(err) = &agg.error {
        println!(" Scoring failed: {err}");
        println!("{separator}");
        return;
    }
    println!(" Overall Score:        {:.3}", agg.overall_score);
    println!(" Revenue Focus Score:  {:.3}", agg.revenue_focus_score);
    println!("{separator}");
    println!(
        " {:<26} {:>6}   {:>5}   {:>8}   {:<6}  {:<10}",
        "KPI", "Weight", "Score", "Weighted", "Level", ""
    );

    for tier in Tier::ALL {
        println!("{separator}");
        println!(
            " {} ({}, avg {:.3})",
            tier.label(),
            tier,
            agg.tier_average(tier)
        );
        for kpi in tier.kpis() {
            print_kpi_row(agg, kpi);
        }
    }
    println!("{separator}");

    if !agg.scorer_errors.is_empty() {
        println!();
        println!(" Scorer errors (scored as 0.0)");
        println!("{separator}");
        for (kpi, err) in &agg.scorer_errors {
            println!(" {:<26} {err}", kpi.as_str());
        }
        println!("{separator}");
    }
}

fn print_kpi_row(agg: &AggregateResult, kpi: Kpi) {
    let level = agg
        .performance_levels
        .get(&kpi)
        .map(|l| l.as_str())
        .unwrap_or("-");
    println!(
        " {:<26} {:>5.0}%   {:>5.3}   {:>8.4}   {:<6}  {}",
        kpi.as_str(),
        agg.weight(kpi) * 100.0,
        agg.score(kpi),
        agg.weighted_scores.get(&kpi).copied().unwrap_or(0.0),
        level,
        report_helpers::score_bar(agg.score(kpi), 10),
    );
}

pub fn print_comparison(cmp: &ComparisonResult) {
    let separator = report_helpers::separator(50);
    println!("Tiered vs Equal Weighting");
    println!("{separator}");
    println!(" {:<28} {:>10.4}", "Tiered score", cmp.new_weighted_score);
    println!(
        " {:<28} {:>10.4}",
        "Equal-weight score", cmp.equal_weighted_score
    );
    println!(" {:<28} {:>+10.4}", "Difference", cmp.difference);
    println!(" {:<28} {:>+9.1}%", "Change", cmp.percentage_change);
    println!(
        " {:<28} {:>+10.4}",
        "Revenue focus improvement", cmp.revenue_focus_improvement
    );
    println!("{separator}");
}

pub fn print_insights(insights: &RevenueInsights) {
    let separator = report_helpers::separator(50);
    println!("Revenue Optimization Insights");
    println!("{separator}");
    println!(
        " Revenue focus:        {:.3} of {:.2}",
        insights.current_revenue_score, insights.max_possible_revenue_score
    );
    println!(" Improvement potential: {:.3}", insights.improvement_potential);
    println!(" Overall:              {:.3}", insights.overall_performance);
    for (tier, avg) in &insights.tier_performance {
        println!("   {:<20} {avg:.3}", tier.label());
    }
    println!("{separator}");

    if insights.priority_actions.is_empty() {
        println!(" No direct revenue driver is below 0.3.");
        return;
    }
    println!(" {:<22} {:>6}   {:>6}   {:>7}", "Priority KPI", "Score", "Weight", "Impact");
    println!("{separator}");
    for k in &insights.priority_actions {
        println!(
            " {:<22} {:>6.3}   {:>6.2}   {:>7.4}",
            k.kpi.as_str(),
            k.score,
            k.weight,
            k.impact
        );
    }
    println!("{separator}");
}

pub fn print_weights(overview: &WeightsOverview) {
    let separator = report_helpers::separator(50);
    println!("KPI Weights");
    for (tier, t) in &overview.tiers {
        println!("{separator}");
        println!(" {} ({tier}): {:.0}%", t.label, t.total_weight * 100.0);
        for kpi in &t.kpis {
            let w = overview.weights.get(kpi).copied().unwrap_or(0.0);
            println!("   {:<26} {:>5.1}%", kpi.as_str(), w * 100.0);
        }
    }
    println!("{separator}");
    let th = &overview.thresholds;
    println!(
        " Thresholds: low {:.2} / medium {:.2} / high {:.2}",
        th.low, th.medium, th.high
    );
    println!(
        " Recommendations: max {}, min confidence {:.2}",
        overview.max_recommendations, overview.min_confidence
    );
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
