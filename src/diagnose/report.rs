use serde::Serialize;

use super::bottleneck::Bottleneck;
use crate::report_helpers;

/// Print bottlenecks as a ranked table.
pub fn print_report(creator_id: &str, overall_score: f64, bottlenecks: &[Bottleneck]) {
    let separator = report_helpers::separator(72);

    println!("Bottlenecks: {creator_id} (overall {overall_score:.3})");
    println!("{separator}");
    if bottlenecks.is_empty() {
        println!(" No bottlenecks found.");
        println!("{separator}");
        return;
    }
    println!(
        " {:>3}  {:<20} {:<22} {:>6} {:>6} {:>7}  {:<6}",
        "#", "KPI", "Component", "Score", "Weight", "Impact", "Sev."
    );
    println!("{separator}");
    for (i, b) in bottlenecks.iter().enumerate() {
        println!(
            " {:>3}  {:<20} {:<22} {:>6.3} {:>6.2} {:>7.4}  {:<6}",
            i + 1,
            b.kpi.as_str(),
            b.component.unwrap_or("(overall)"),
            b.score,
            b.weight,
            b.impact,
            b.severity.as_str(),
        );
    }
    println!("{separator}");
}

#[derive(Serialize)]
struct JsonBottlenecks<'a> {
    creator_id: &'a str,
    overall_score: f64,
    bottleneck_count: usize,
    bottlenecks: &'a [Bottleneck],
}

pub fn print_json(
    creator_id: &str,
    overall_score: f64,
    bottlenecks: &[Bottleneck],
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonBottlenecks {
        creator_id,
        overall_score,
        bottleneck_count: bottlenecks.len(),
        bottlenecks,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
