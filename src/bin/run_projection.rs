//! Run a projection from a JSON configuration file
//!
//! Writes one CSV row per month, optionally labelled with calendar months, and
//! can sweep the monthly contribution across several values.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{Months, NaiveDate};
use clap::Parser;
use savings_projection::{
    projection::{MonthData, ProjectionConfig, ProjectionEngine},
    rates::load_tiers,
    ScenarioRunner,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "run_projection", about = "Project a savings balance month by month")]
struct Args {
    /// JSON configuration (initialBalance, contribution, withdrawals, period, tiers, bonuses)
    #[arg(long)]
    config: PathBuf,

    /// CSV tier table (tier_id,min,rate) replacing the tiers in the configuration
    #[arg(long)]
    tiers: Option<PathBuf>,

    /// Where to write the monthly CSV
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,

    /// Calendar date of month 0, used to label rows (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Number of months to print to the console
    #[arg(long, default_value_t = 12)]
    print: usize,

    /// Comma-separated monthly contributions to compare against the base run
    #[arg(long, value_delimiter = ',')]
    contributions: Vec<f64>,
}

/// CSV row with a calendar label in front of the month fields
#[derive(Debug, Serialize)]
struct DatedRow {
    month: NaiveDate,
    idx: u32,
    starting_balance: f64,
    ending_balance: f64,
    in_month_invested: f64,
    in_month_interest: f64,
    in_month_rate: f64,
    total_invested: f64,
    total_interest: f64,
}

impl DatedRow {
    fn new(start: NaiveDate, month: &MonthData) -> anyhow::Result<Self> {
        let label = start
            .checked_add_months(Months::new(month.idx))
            .with_context(|| format!("month {} is out of calendar range", month.idx))?;
        Ok(Self {
            month: label,
            idx: month.idx,
            starting_balance: month.starting_balance,
            ending_balance: month.ending_balance,
            in_month_invested: month.in_month.invested,
            in_month_interest: month.in_month.interest,
            in_month_rate: month.in_month.rate,
            total_invested: month.total.invested,
            total_interest: month.total.interest,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let mut config = ProjectionConfig::from_json_path(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    if let Some(tiers_path) = &args.tiers {
        config.rates.tiers = load_tiers(tiers_path)
            .with_context(|| format!("failed to load tiers from {}", tiers_path.display()))?;
        log::info!("Using {} tiers from {}", config.rates.tiers.len(), tiers_path.display());
    }

    let engine = ProjectionEngine::new(config.clone()).context("invalid configuration")?;
    let result = engine.project();
    log::info!("Projected {} months in {:?}", result.len(), start.elapsed());

    for month in result.months.iter().take(args.print) {
        println!(
            "{:>5} start={:>14.2} rate={:>9.6} interest={:>10.2} end={:>14.2}",
            month.idx,
            month.starting_balance,
            month.in_month.rate,
            month.in_month.interest,
            month.ending_balance,
        );
    }

    let file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    match args.start_date {
        Some(start_date) => {
            let mut writer = csv::Writer::from_writer(file);
            for month in &result.months {
                writer.serialize(DatedRow::new(start_date, month)?)?;
            }
            writer.flush()?;
        }
        None => result.write_csv(file)?,
    }
    println!("Output written to {}", args.output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months:         {}", summary.total_months);
    println!("  Total Invested: {:.2}", summary.total_invested);
    println!("  Total Interest: {:.2}", summary.total_interest);
    println!("  Final Balance:  {:.2}", summary.final_balance);

    if !args.contributions.is_empty() {
        let runner = ScenarioRunner::new(config);
        let results = runner.sweep_contributions(&args.contributions);

        println!("\nContribution sweep:");
        for (contribution, outcome) in args.contributions.iter().zip(results) {
            let summary = outcome.context("sweep scenario rejected")?.summary();
            println!(
                "  {:>10.2}/month -> final {:>14.2} (interest {:.2})",
                contribution, summary.final_balance, summary.total_interest
            );
        }
    }

    log::info!("Total time: {:?}", start.elapsed());
    Ok(())
}
