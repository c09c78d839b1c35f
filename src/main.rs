use caseflow::alerts;
use caseflow::config::AppConfig;
use caseflow::error::AppError;
use caseflow::matching;
use caseflow::records::ingest;
use caseflow::report;
use caseflow::telemetry;
use caseflow::triage::{Partition, RuleTable};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "caseflow",
    about = "Triage relocation and visa case exports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Partition a case export into operational work queues
    Split(SplitArgs),
    /// List cases past or approaching their landing thresholds
    Alerts(AlertsArgs),
    /// Cross-reference two case exports by name and visa step
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// CSV case export to partition
    file: PathBuf,
    /// Include the per-sheet export layout in the output
    #[arg(long)]
    plan: bool,
}

#[derive(Args, Debug)]
struct AlertsArgs {
    /// CSV case export to scan
    file: PathBuf,
    /// Evaluate aging as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// First CSV case export
    first: PathBuf,
    /// Second CSV case export
    second: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load();
    telemetry::init(&config.log_level)?;
    info!(environment = ?config.environment, "caseflow starting");

    match cli.command {
        Command::Split(args) => split(args),
        Command::Alerts(args) => alerts_command(args),
        Command::Compare(args) => compare(args),
    }
}

fn split(args: SplitArgs) -> Result<(), AppError> {
    let records = ingest::from_path(&args.file)?;
    let partition = Partition::build(&records, &RuleTable::standard());
    info!(
        records = records.len(),
        categories = report::category_summary(&partition).len(),
        "partitioned case export"
    );

    let mut output = json!({
        "headcount": report::headcount(&records),
        "categories": report::category_summary(&partition),
    });
    if args.plan {
        output["export_plan"] = serde_json::to_value(report::export_plan(&partition))?;
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn alerts_command(args: AlertsArgs) -> Result<(), AppError> {
    let records = ingest::from_path(&args.file)?;
    let now = resolve_now(args.as_of);
    let alert_report = alerts::classify(&records, now);
    info!(
        alerts = alert_report.alerts.len(),
        at_risk = alert_report.at_risk.len(),
        "scanned landing aging"
    );

    let (alert_rows, at_risk_rows) = report::alert_views(&alert_report);
    let output = json!({
        "as_of": now.date(),
        "alerts": alert_rows,
        "at_risk": at_risk_rows,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn compare(args: CompareArgs) -> Result<(), AppError> {
    let first = ingest::from_path(&args.first)?;
    let second = ingest::from_path(&args.second)?;
    let matches = matching::match_sets(&first, &second)?;
    info!(matches = matches.len(), "cross-referenced case exports");

    let rows: Vec<_> = matches.iter().map(|case| case.to_view()).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn resolve_now(as_of: Option<NaiveDate>) -> NaiveDateTime {
    match as_of.and_then(|date| date.and_hms_opt(0, 0, 0)) {
        Some(moment) => moment,
        None => Local::now().naive_local(),
    }
}
