use super::generator::RecommendationResult;
use crate::report_helpers;

/// Print the ranked recommendations with their actions and next steps.
pub fn print_report(result: &RecommendationResult) {
    let separator = report_helpers::separator(72);

    let Some(analysis) = &result.analysis else {
        println!("Recommendations");
        println!("{separator}");
        println!(
            " Recommendation failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        println!("{separator}");
        return;
    };

    println!("Recommendations: {}", analysis.creator_id);
    println!("{separator}");
    println!(" Analyzed at:         {}", analysis.timestamp);
    println!(" Overall Score:       {:.3}", analysis.overall_score);
    println!(" Revenue Focus Score: {:.3}", analysis.revenue_focus_score);
    println!(" Bottlenecks Found:   {}", analysis.bottleneck_count);
    println!("{separator}");

    for (i, rec) in result.recommendations.iter().enumerate() {
        let flag = if rec.low_confidence { "  (low confidence)" } else { "" };
        println!(" {}. {}{flag}", i + 1, rec.title);
        println!("    {}", rec.description);
        println!(
            "    priority {:.2}  gain +{:.3}  confidence {:.2}  severity {}",
            rec.priority_score,
            rec.expected_improvement,
            rec.confidence,
            rec.severity.as_str()
        );
        println!(
            "    score {:.3} -> {:.3}  cost {} (~{}h)",
            rec.current_score,
            rec.target_score,
            rec.cost_level.as_str(),
            rec.effort_hours
        );
        for action in rec.actions {
            println!("      - {action}");
        }
        println!(
            "    experiment: {} {} vs {}, {} days on {}",
            rec.experiment.kind,
            rec.experiment.variants[0],
            rec.experiment.variants[1],
            rec.experiment.duration_days,
            rec.experiment.primary_metric
        );
        println!("{separator}");
    }

    println!(" Next steps");
    for step in &analysis.next_steps {
        println!("   {step}");
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
