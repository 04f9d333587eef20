pub(crate) mod bottleneck;
mod report;

use std::error::Error;

use crate::config::WeightConfig;
use crate::metrics::MetricSet;
use crate::score::analyzer::Orchestrator;

use bottleneck::find_bottlenecks;
use report::{print_json, print_report};

pub fn run(metrics: &MetricSet, config: &WeightConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let agg = Orchestrator::new(config).try_aggregate(metrics)?;
    let bottlenecks = find_bottlenecks(&agg, &config.thresholds);

    if json {
        print_json(&agg.creator_id, agg.overall_score, &bottlenecks)?;
    } else {
        print_report(&agg.creator_id, agg.overall_score, &bottlenecks);
    }
    Ok(())
}
