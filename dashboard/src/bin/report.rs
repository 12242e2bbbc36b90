//! One-shot aggregation report
//!
//! Fetches the device collection once, aggregates it by state and prints the
//! result as a table or as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use shared::{AggregationReport, ProcessId, logging};

use dashboard::{
    cli::SourceArgs,
    core::{state_name, StateAggregator},
    ConfiguredStore, DeviceStore, StatesResponse, TimestampedReport, TracingObserver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "heater-report")]
#[command(about = "Print per-state device counts and relay interactions")]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(flatten)]
    source: SourceArgs,
}

fn render_table(report: &AggregationReport) -> String {
    let mut out = format!("{:<5} {:<26} {:>8} {:>14}\n", "CODE", "STATE", "DEVICES", "INTERACTIONS");

    for (code, aggregate) in &report.states {
        out.push_str(&format!(
            "{:<5} {:<26} {:>8} {:>14}\n",
            code.as_str(),
            state_name(*code).unwrap_or("-"),
            aggregate.device_count,
            aggregate.interaction_total
        ));
    }

    out.push_str(&format!(
        "\n{} records, {} attributed, {} unresolvable ZIP, {} malformed, {} unreadable counters\n",
        report.total_records,
        report.attributed_devices(),
        report.skipped.unresolvable_zip,
        report.skipped.malformed_record,
        report.invalid_interactions
    ));
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();

    let args = Args::parse();

    ProcessId::init_report();
    logging::init_tracing_with_level(Some(&args.log_level));

    let source = args.source.device_source().context("invalid device source")?;
    let store = ConfiguredStore::from_source(&source).context("cannot build device store")?;

    let snapshot = store
        .fetch_devices()
        .await
        .with_context(|| format!("fetching devices from {}", store.describe()))?;

    let report = StateAggregator::us().aggregate_snapshot(&snapshot, &TracingObserver::new());

    match args.format {
        OutputFormat::Table => print!("{}", render_table(&report)),
        OutputFormat::Json => {
            let stamped = TimestampedReport::now(report);
            println!("{}", serde_json::to_string_pretty(&StatesResponse::from(&stamped))?);
        }
    }

    Ok(())
}
