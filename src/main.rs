//! INSS Retirement CLI
//!
//! Simulates contributor careers and prints their retirement eligibility

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;

use inss_retirement::{
    calendar,
    scenario::{unemployment_rate, ScenarioRunner},
    CareerConfig,
};

#[derive(Debug, Parser)]
#[command(name = "inss-retirement", version, about = "Simulate contributor careers and assess retirement eligibility")]
struct Args {
    /// Number of careers to simulate
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Seed for the career generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Directory holding male.csv and female.csv survival tables
    #[arg(long, default_value = inss_retirement::assumptions::DEFAULT_SURVIVAL_PATH)]
    survival_dir: PathBuf,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// JSON file overriding career simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per career instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CareerConfig::from_json_path(path)
            .with_context(|| format!("loading career config from {}", path.display()))?,
        None => CareerConfig::default(),
    };
    let as_of = args.as_of.unwrap_or_else(calendar::today);

    let mut runner = ScenarioRunner::from_csv_path(&args.survival_dir, config, args.seed)
        .with_context(|| format!("loading survival tables from {}", args.survival_dir.display()))?;
    log::info!("simulating {} careers (seed {}, as of {})", args.count, args.seed, as_of);

    let outcomes = runner.run(args.count, as_of)?;

    if args.json {
        for outcome in &outcomes {
            println!("{}", serde_json::to_string(outcome)?);
        }
    } else {
        println!("{:>6} {:>6} {:>10} {:>10} {:>12} {:>7} {:>9} {:>14}",
            "Id", "Gender", "Born", "Start", "Regime", "Months", "Remaining", "Benefit");
        println!("{}", "-".repeat(82));
        for outcome in &outcomes {
            let born = outcome.birth_date.map(|d| d.to_string()).unwrap_or_default();
            match &outcome.assessment {
                Some(a) => println!("{:>6} {:>6} {:>10} {:>10} {:>12} {:>7} {:>9} {:>14.2}",
                    outcome.contributor_id.0,
                    outcome.gender.as_str(),
                    born,
                    outcome.career_start,
                    outcome.regime.as_str(),
                    outcome.months_contributed,
                    a.remaining_years,
                    a.benefit_value,
                ),
                None => println!("{:>6} {:>6} {:>10} {:>10} {:>12} {:>7} {:>9}  {}",
                    outcome.contributor_id.0,
                    outcome.gender.as_str(),
                    born,
                    outcome.career_start,
                    outcome.regime.as_str(),
                    outcome.months_contributed,
                    outcome.remaining_years.map(|y| y.to_string()).unwrap_or_default(),
                    outcome.error.as_deref().unwrap_or("not assessed"),
                ),
            }
        }
    }

    let assessed = outcomes.iter().filter(|o| o.assessment.is_some()).count();
    println!("\nSummary:");
    println!("  Careers simulated: {}", outcomes.len());
    println!("  Careers assessed:  {}", assessed);
    println!("  Unemployed share:  {:.4} (stationary {:.4})",
        unemployment_rate(&outcomes),
        runner.config().stationary_unemployment());

    Ok(())
}
