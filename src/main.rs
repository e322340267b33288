//! Savings Projection CLI
//!
//! Runs a sample tiered savings projection and writes the months to CSV

use std::fs::File;

use anyhow::Context;
use savings_projection::{
    projection::{ProjectionConfig, ProjectionEngine},
    BonusRule, RateTier, TierSchedule,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Savings Projection v0.1.0");
    println!("=========================\n");

    // Sample account: three balance tiers, a contribution bonus and an intro bonus
    let config = ProjectionConfig::new(
        2_500.0, // initial balance
        300.0,   // monthly contribution
        50.0,    // monthly withdrawal
        60,      // months
    )
    .with_tiers(TierSchedule::new(vec![
        RateTier::new("starter", 0.0, 0.015),
        RateTier::new("saver", 5_000.0, 0.03),
        RateTier::new("premium", 20_000.0, 0.045),
    ]))
    .with_bonus(BonusRule::min_contribution(0.005, 250.0))
    .with_bonus(BonusRule::in_account_age(0.01, Some(0), Some(5)));

    println!("Account:");
    println!("  Initial Balance: ${:.2}", config.initial_balance);
    println!("  Contribution:    ${:.2}/month", config.contribution);
    println!("  Withdrawals:     ${:.2}/month", config.withdrawals);
    println!("  Tiers:           {}", config.rates.tiers.len());
    println!("  Bonus Rules:     {}", config.rates.bonuses.len());
    println!();

    let engine = ProjectionEngine::new(config).context("invalid sample configuration")?;
    let result = engine.project();

    println!("Projection Results ({} months):", result.len());
    println!(
        "{:>5} {:>14} {:>12} {:>10} {:>10} {:>14} {:>14}",
        "Month", "Start", "Invested", "Rate", "Interest", "End", "TotalInt"
    );
    println!("{}", "-".repeat(85));

    for month in result.months.iter().take(24) {
        println!(
            "{:>5} {:>14.2} {:>12.2} {:>10.6} {:>10.2} {:>14.2} {:>14.2}",
            month.idx,
            month.starting_balance,
            month.in_month.invested,
            month.in_month.rate,
            month.in_month.interest,
            month.ending_balance,
            month.total.interest,
        );
    }

    if result.len() > 24 {
        println!("... ({} more months)", result.len() - 24);
    }

    let csv_path = "projection_output.csv";
    let file = File::create(csv_path).with_context(|| format!("unable to create {}", csv_path))?;
    result.write_csv(file).context("failed to write projection CSV")?;
    println!("\nFull results written to: {}", csv_path);

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months:   {}", summary.total_months);
    println!("  Total Invested: ${:.2}", summary.total_invested);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Final Balance:  ${:.2}", summary.final_balance);

    Ok(())
}
