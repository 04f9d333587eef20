mod cli;
mod config;
mod diagnose;
mod error;
mod metrics;
mod recommend;
mod report_helpers;
mod score;

use std::error::Error;
use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, InputArgs, OutputArgs};
use config::WeightConfig;
use metrics::MetricSet;

/// Install the stderr logger. `-v` forces debug; otherwise `RUST_LOG`
/// applies, falling back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Metrics from `--demo`, a file, or stdin. A missing timestamp is set to
/// the current local time.
fn load_metrics(input: &InputArgs) -> Result<MetricSet, Box<dyn Error>> {
    let mut metrics = if input.demo {
        MetricSet::demo()
    } else if let Some(path) = &input.input {
        MetricSet::from_path(path)?
    } else {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err("no input: pass a metrics JSON file, pipe JSON on stdin, or use --demo".into());
        }
        MetricSet::from_reader(stdin.lock())?
    };
    if metrics.timestamp.is_none() {
        metrics.timestamp = Some(chrono::Local::now().to_rfc3339());
    }
    Ok(metrics)
}

fn load_config(output: &OutputArgs) -> Result<WeightConfig, Box<dyn Error>> {
    Ok(WeightConfig::load(output.config.as_deref())?)
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Score { input, output } => {
            let config = load_config(&output)?;
            score::run(&load_metrics(&input)?, &config, output.json)
        }
        Commands::Compare { input, output } => {
            let config = load_config(&output)?;
            score::run_compare(&load_metrics(&input)?, &config, output.json)
        }
        Commands::Insights { input, output } => {
            let config = load_config(&output)?;
            score::run_insights(&load_metrics(&input)?, &config, output.json)
        }
        Commands::Bottlenecks { input, output } => {
            let config = load_config(&output)?;
            diagnose::run(&load_metrics(&input)?, &config, output.json)
        }
        Commands::Recommend { input, output, max } => {
            let config = load_config(&output)?;
            let max = max.map(usize::from);
            recommend::run(&load_metrics(&input)?, &config, max, output.json)
        }
        Commands::Weights { output } => {
            let config = load_config(&output)?;
            score::run_weights(&config, output.json)
        }
        Commands::Demo => report_helpers::print_json_stdout(&MetricSet::demo()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
