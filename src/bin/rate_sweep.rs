//! Sweep the financing comparison over a grid of rates and terms
//!
//! Writes one CSV row per grid point with each option's total cost, the
//! winner and the policy loan savings. Useful for seeing where the policy
//! loan stops winning as the loan rate climbs.
//!
//! Usage: cargo run --bin rate_sweep -- --principal 50000 --output sweep.csv

use anyhow::{Context, Result};
use clap::Parser;
use family_bank::{Assumptions, ComparisonInput, ScenarioKind, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Grid sweep of cash vs bank loan vs policy loan")]
struct Args {
    #[arg(long, default_value_t = 50_000.0)]
    principal: f64,

    /// Savings/investment return in percent
    #[arg(long, default_value_t = 6.0)]
    savings_rate: f64,

    /// Rate grid step in percent
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Directory holding illustration.csv overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,

    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    term_years: u32,
    bank_rate: f64,
    policy_rate: f64,
    cash_cost: f64,
    bank_cost: f64,
    policy_cost: f64,
    winner: ScenarioKind,
    savings: f64,
}

/// Inclusive grid from `min` to `max` in `step` increments
fn grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = ((max - min) / step).round() as usize;
    (0..=count).map(|i| min + step * i as f64).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let assumptions = match &args.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => Assumptions::default_illustration(),
    };
    if !(args.step > 0.0) {
        anyhow::bail!("--step must be positive");
    }

    let ranges = assumptions.ranges.clone();
    let step = args.step / 100.0;
    let bank_rates = grid(ranges.bank_rate.min, ranges.bank_rate.max, step);
    let policy_rates = grid(ranges.policy_rate.min, ranges.policy_rate.max, step);

    let mut inputs = Vec::new();
    for term_years in ranges.term_years.min..=ranges.term_years.max {
        for &bank_rate in &bank_rates {
            for &policy_rate in &policy_rates {
                inputs.push(ComparisonInput {
                    principal: args.principal,
                    bank_rate,
                    policy_rate,
                    savings_rate: args.savings_rate / 100.0,
                    term_years,
                });
            }
        }
    }

    println!("Running {} comparisons...", inputs.len());
    let start = Instant::now();

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let results = runner.run_batch(&inputs);

    println!("Comparisons complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut policy_wins = 0;

    for (input, result) in inputs.iter().zip(results) {
        let result = result.with_context(|| format!("comparing {:?}", input))?;
        if result.winner == ScenarioKind::Policy {
            policy_wins += 1;
        }
        writer.serialize(SweepRow {
            term_years: input.term_years,
            bank_rate: input.bank_rate,
            policy_rate: input.policy_rate,
            cash_cost: result.cash.total_cost,
            bank_cost: result.bank.total_cost,
            policy_cost: result.policy.total_cost,
            winner: result.winner,
            savings: result.savings,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("Policy loan wins {} of {} grid points", policy_wins, inputs.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_inclusive() {
        let points = grid(0.04, 0.08, 0.005);
        assert_eq!(points.len(), 9);
        assert!((points[8] - 0.08).abs() < 1e-12);
    }
}
