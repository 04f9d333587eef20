pub(crate) mod generator;
mod report;
pub(crate) mod templates;

use std::error::Error;

use crate::config::WeightConfig;
use crate::metrics::MetricSet;
use crate::report_helpers;

use generator::Recommender;
use report::print_report;

pub fn run(
    metrics: &MetricSet,
    config: &WeightConfig,
    max: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut recommender = Recommender::new(config);
    if let Some(max) = max {
        recommender = recommender.with_max(max);
    }
    let result = recommender.recommend(metrics);

    if json {
        report_helpers::print_json_stdout(&result)?;
    } else {
        print_report(&result);
    }
    match result.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
