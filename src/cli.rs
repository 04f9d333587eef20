/// CLI argument definitions for the `kpi` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "kpi",
    version,
    about = "Creator KPI scoring, bottleneck diagnosis and recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output and config flags shared by every command.
#[derive(Args)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// TOML file overriding weights, thresholds or recommendation limits
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Where the metrics come from.
#[derive(Args)]
pub struct InputArgs {
    /// Metrics JSON file (default: read from stdin)
    pub input: Option<PathBuf>,

    /// Use the built-in demo creator instead of reading input
    #[arg(long, conflicts_with = "input")]
    pub demo: bool,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the tiered overall score and per-KPI breakdown
    #[command(long_about = "\
Compute the tiered overall score and per-KPI breakdown.

Thirteen KPIs are scored in [0, 1] and combined with fixed weights:

  Tier 1  Direct Revenue Drivers  55%  sales, shop conversion, TikTok Shop
  Tier 2  Revenue Enablers        32%  engagement, growth, discovery,
                                       content, audience fit, brand fit
  Tier 3  General Health          13%  trend fit, image, reach, cost

The revenue focus score is the weighted average of Tier 1.

Missing metrics use documented defaults, so partial input always scores.

Examples:
  kpi score metrics.json
  cat metrics.json | kpi score --json
  kpi score --demo")]
    Score {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare the tiered score against equal 1/13 weighting
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show revenue optimization insights (Tier 1 priorities)
    Insights {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List underperforming KPIs and components ranked by impact
    #[command(long_about = "\
List underperforming KPIs and components ranked by impact.

Every KPI score and normalized component below the low threshold (0.3 by
default) is a bottleneck; below 0.2 it is high severity. Some components
use their own cutoffs:

  sales_performance.conversion_score   flag < 0.5, high < 0.2
  shop_conversion.abandonment_score    flag < 0.4, high < 0.3
  shop_conversion.funnel_score         flag < 0.3, high < 0.2
  tiktok_shop.listing_score            flag < 0.5, high < 0.3
  content_strategy.video_quality       flag < 0.4, high < 0.2, weight x2/x3
  engagement.interaction_balance       flag < 0.5, high < 0.3

Impact is score x weight; the list is sorted by impact, highest first.")]
    Bottlenecks {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate ranked recommendations with experiment plans
    Recommend {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Maximum number of recommendations (default: from config, 3)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        max: Option<u16>,
    },

    /// Show the weight table, tiers and thresholds
    Weights {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the demo creator's metrics as JSON
    Demo,
}
