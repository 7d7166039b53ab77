//! CLI entry point for the feedback pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use feedback_processing::dataset::list_view;
use feedback_processing::source::source_for_location;
use feedback_processing::{
    AggregationResult, CategoryField, FeedbackRecord, Pipeline, PipelineConfig, PipelineResult,
    ReportGenerator, ReportParams, SelectionCriterion, SummaryStats, TableCache, aggregate,
    summarize,
};
use std::env;
use tracing::{error, info};

/// Environment variable holding the default feedback table location
const SOURCE_ENV_VAR: &str = "FEEDBACK_SOURCE";

/// CLI-compatible selection criterion enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFilter {
    /// Every feedback
    All,
    /// Only happy feedback
    Positive,
    /// Unhappy and unrated feedback
    Negative,
}

impl From<CliFilter> for SelectionCriterion {
    fn from(cli: CliFilter) -> Self {
        match cli {
            CliFilter::All => SelectionCriterion::All,
            CliFilter::Positive => SelectionCriterion::PositiveOnly,
            CliFilter::Negative => SelectionCriterion::NegativeOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Feedback table preparation and analysis",
    long_about = "Cleans a table of end-user feedback and reports sentiment counts per application or version.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  FEEDBACK_SOURCE    Default CSV path or URL when --input is omitted\n\n\
                  EXAMPLES:\n  \
                  # Summary and counts per application\n  \
                  feedback-processing -i feedback.csv\n\n  \
                  # Unhappy feedback per version, with the first 20 rows\n  \
                  feedback-processing -i feedback.csv --filter negative --group-by version --list --limit 20\n\n  \
                  # Machine-readable output\n  \
                  feedback-processing -i https://example.org/feedback.csv --json"
)]
struct Args {
    /// CSV file path or http(s) URL of the raw feedback table
    ///
    /// Falls back to the FEEDBACK_SOURCE environment variable
    #[arg(short, long)]
    input: Option<String>,

    /// Sentiment filter for the list and the chart
    #[arg(short, long, value_enum, default_value = "all")]
    filter: CliFilter,

    /// Field to group counts by (app or version)
    #[arg(short, long, default_value = "app")]
    group_by: String,

    /// Print the selected feedback rows
    #[arg(long)]
    list: bool,

    /// Maximum number of rows for --list and --json (0 = all for --list, none for --json)
    #[arg(long, default_value = "0")]
    limit: usize,

    /// Prefix stripped from application names
    #[arg(long)]
    app_prefix: Option<String>,

    /// Minimum number of characters a message needs
    #[arg(long)]
    min_message_length: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let location = match args.input.clone() {
        Some(input) => input,
        None => env::var(SOURCE_ENV_VAR).map_err(|_| {
            anyhow!("No input given: pass --input or set {}", SOURCE_ENV_VAR)
        })?,
    };

    let group_by: CategoryField = args.group_by.parse()?;
    let criterion = SelectionCriterion::from(args.filter);

    let pipeline = Pipeline::builder().config(build_config(&args)?).build()?;

    info!("Loading feedback from: {}", location);
    let source = source_for_location(&location)?;
    let mut cache = TableCache::new();

    let result = match pipeline.run(source.as_ref(), &mut cache) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    if args.json {
        let report = ReportGenerator::build_report(ReportParams {
            source: &location,
            dataset: &result.dataset,
            quality: result.quality,
            criterion,
            group_by,
            row_limit: args.limit,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_summary(&location, &result, criterion, group_by, &args)
}

/// Apply CLI overrides on top of the default configuration.
fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder();

    if let Some(ref prefix) = args.app_prefix {
        builder = builder.app_prefix(prefix);
    }
    if let Some(length) = args.min_message_length {
        builder = builder.min_message_length(length);
    }

    Ok(builder.build()?)
}

/// Print summary, grouped counts and optionally the selected rows.
///
/// Uses `println!` for user-facing output so it is visible regardless of
/// the log level.
fn print_human_readable_summary(
    location: &str,
    result: &PipelineResult,
    criterion: SelectionCriterion,
    group_by: CategoryField,
    args: &Args,
) -> Result<()> {
    let stats = summarize(result.dataset.records());
    let selection = result.dataset.select(criterion);
    let aggregation = aggregate(selection.iter().copied(), group_by);

    println!();
    println!("{}", "=".repeat(80));
    println!("FEEDBACK SUMMARY");
    println!("{}", "=".repeat(80));
    println!();
    println!("Source: {}", location);
    println!(
        "Rows:   {} -> {} ({} without text, {} without version)",
        result.quality.rows_before,
        result.quality.rows_after,
        result.quality.rejected_messages,
        result.quality.rejected_versions
    );
    println!();

    print_stats(&stats);
    print_aggregation(&aggregation, criterion);

    if args.list {
        print_rows(&selection, args.limit)?;
    }

    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
    Ok(())
}

fn print_stats(stats: &SummaryStats) {
    println!("Overview:");
    println!("  Feedbacks:    {}", stats.total_feedbacks);
    println!("  Applications: {}", stats.distinct_apps);
    println!("  Versions:     {}", stats.distinct_versions);
    println!(
        "  Happy:        {}  Not happy: {} ({} unrated)",
        stats.positive, stats.non_positive, stats.unrated
    );
    println!();
}

fn print_aggregation(aggregation: &AggregationResult, criterion: SelectionCriterion) {
    println!(
        "Counts per {} ({:?}):",
        aggregation.field().column_name(),
        criterion
    );

    if aggregation.is_empty() {
        println!("  No feedback matches this filter");
        println!();
        return;
    }

    let labels = aggregation.labels();
    print!("  {:<30}", aggregation.field().column_name());
    for label in &labels {
        print!(" {:>8}", label.as_str());
    }
    println!();
    println!("  {}", "-".repeat(30 + 9 * labels.len()));

    for category in aggregation.categories() {
        print!("  {:<30}", truncate_str(category, 29));
        for label in &labels {
            print!(" {:>8}", aggregation.count(category, *label));
        }
        println!();
    }
    println!();
}

fn print_rows(selection: &[&FeedbackRecord], limit: usize) -> Result<()> {
    let shown = if limit == 0 { selection.len() } else { limit.min(selection.len()) };
    let table = list_view(selection.iter().take(shown).copied())?;

    println!("Feedback ({} of {}):", shown, selection.len());
    println!("{}", table);
    println!();
    Ok(())
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
