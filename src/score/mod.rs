pub(crate) mod analyzer;
mod normalize;
mod report;
pub(crate) mod scorers;

use std::error::Error;

use crate::config::WeightConfig;
use crate::metrics::MetricSet;
use crate::report_helpers;

use analyzer::Orchestrator;
use report::{print_comparison, print_insights, print_report, print_weights};

pub fn run(metrics: &MetricSet, config: &WeightConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let agg = Orchestrator::new(config).aggregate(metrics);
    if json {
        report_helpers::print_json_stdout(&agg)?;
    } else {
        print_report(&agg);
    }
    match agg.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

pub fn run_compare(
    metrics: &MetricSet,
    config: &WeightConfig,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let cmp = Orchestrator::new(config).compare_equal_weighting(metrics)?;
    if json {
        report_helpers::print_json_stdout(&cmp)?;
    } else {
        print_comparison(&cmp);
    }
    Ok(())
}

pub fn run_insights(
    metrics: &MetricSet,
    config: &WeightConfig,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let insights = Orchestrator::new(config).revenue_insights(metrics)?;
    if json {
        report_helpers::print_json_stdout(&insights)?;
    } else {
        print_insights(&insights);
    }
    Ok(())
}

pub fn run_weights(config: &WeightConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let overview = Orchestrator::new(config).weights_overview();
    if json {
        report_helpers::print_json_stdout(&overview)?;
    } else {
        print_weights(&overview);
    }
    Ok(())
}
