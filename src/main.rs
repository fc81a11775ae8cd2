//! Family Bank CLI
//!
//! Command-line front end for the calculators. Rates on the command line are
//! percentages (`--bank-rate 7.9`); JSON requests use decimals.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use family_bank::projection::{
    DebtInput, EstimatorInput, GenerationalInput, HealthRating, InterestBleedInput, PolicyFocus,
};
use family_bank::request::{AmortizeInput, CalculatorOutput};
use family_bank::{
    evaluate, format_usd, Assumptions, Calculator, CalculatorRequest, ComparisonInput, YearRecord,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "family-bank", version, about = "Infinite Banking projection calculators")]
struct Cli {
    /// Directory holding illustration.csv overrides
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Bound inputs to the calculator slider ranges
    #[arg(long, global = true)]
    clamp: bool,

    /// Print the full response as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write the yearly rows to a CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare paying cash, a bank loan and a policy loan
    Compare {
        #[arg(long, default_value_t = 50_000.0)]
        principal: f64,
        #[arg(long, default_value_t = 7.9)]
        bank_rate: f64,
        #[arg(long, default_value_t = 5.0)]
        policy_rate: f64,
        #[arg(long, default_value_t = 6.0)]
        savings_rate: f64,
        #[arg(long, default_value_t = 5)]
        term_years: u32,
    },
    /// Amortization schedule for a bank loan
    Amortize {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        term_years: u32,
    },
    /// Multi-generational family bank projection
    Generations {
        #[arg(long, default_value_t = 35)]
        age: u32,
        #[arg(long, default_value_t = 24_000.0)]
        premium: f64,
        #[arg(long, default_value_t = 2)]
        generations: u32,
        #[arg(long, default_value_t = 30)]
        horizon_years: u32,
    },
    /// Estimate cash value and death benefit for a new policy
    Estimate {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        premium: f64,
        #[arg(long, default_value = "preferred", value_parser = parse_label::<HealthRating>)]
        health: HealthRating,
        #[arg(long, default_value = "balanced", value_parser = parse_label::<PolicyFocus>)]
        focus: PolicyFocus,
        #[arg(long, default_value_t = 30)]
        horizon_years: u32,
    },
    /// Interest paid across several debts
    Bleed {
        /// Debt as NAME:BALANCE:RATE:TERM_YEARS, repeatable
        #[arg(long = "debt", required = true, value_parser = parse_debt)]
        debts: Vec<DebtInput>,
        /// Return the interest could have earned instead, in percent
        #[arg(long, default_value_t = 0.0)]
        reinvest_rate: f64,
    },
    /// Evaluate a JSON request file
    Request { path: PathBuf },
}

/// Parse a snake_case enum label the same way JSON requests spell it
fn parse_label<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unrecognised value '{}'", s))
}

fn parse_debt(s: &str) -> Result<DebtInput, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 4 {
        return Err(format!("expected NAME:BALANCE:RATE:TERM_YEARS, got '{}'", s));
    }
    let number = |field: &str, raw: &str| -> Result<f64, String> {
        raw.trim().parse().map_err(|_| format!("bad {} '{}'", field, raw))
    };
    Ok(DebtInput {
        name: parts[0].trim().to_string(),
        balance: number("balance", parts[1])?,
        annual_rate: number("rate", parts[2])? / 100.0,
        term_years: parts[3].trim().parse().map_err(|_| format!("bad term '{}'", parts[3]))?,
    })
}

fn build_request(command: Command, clamp: bool) -> Result<CalculatorRequest> {
    let calculator = match command {
        Command::Compare { principal, bank_rate, policy_rate, savings_rate, term_years } => {
            Calculator::Compare(ComparisonInput {
                principal,
                bank_rate: bank_rate / 100.0,
                policy_rate: policy_rate / 100.0,
                savings_rate: savings_rate / 100.0,
                term_years,
            })
        }
        Command::Amortize { principal, rate, term_years } => Calculator::Amortize(AmortizeInput {
            principal,
            annual_rate: rate / 100.0,
            term_years,
        }),
        Command::Generations { age, premium, generations, horizon_years } => {
            Calculator::Generations(GenerationalInput {
                current_age: age,
                annual_premium: premium,
                generation_count: generations,
                horizon_years,
            })
        }
        Command::Estimate { age, premium, health, focus, horizon_years } => {
            Calculator::Estimate(EstimatorInput {
                age,
                annual_premium: premium,
                health,
                focus,
                horizon_years,
            })
        }
        Command::Bleed { debts, reinvest_rate } => Calculator::InterestBleed(InterestBleedInput {
            debts,
            reinvest_rate: reinvest_rate / 100.0,
        }),
        Command::Request { path } => {
            let body = fs::read_to_string(&path)
                .with_context(|| format!("reading request {}", path.display()))?;
            let mut request = CalculatorRequest::from_json(&body)
                .with_context(|| format!("parsing request {}", path.display()))?;
            request.clamp |= clamp;
            return Ok(request);
        }
    };

    Ok(CalculatorRequest { calculator, clamp })
}

fn print_series(title: &str, series: &[YearRecord]) {
    println!("\n{}:", title);
    println!("{:>4} {:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "Age", "Paid", "Interest", "Balance", "Cash Value", "Cost");
    println!("{}", "-".repeat(86));

    for row in series {
        let age = row.age.map(|a| a.to_string()).unwrap_or_default();
        println!("{:>4} {:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
            row.year,
            age,
            format_usd(row.cumulative_paid),
            format_usd(row.interest_paid),
            format_usd(row.balance),
            format_usd(row.cash_value),
            format_usd(row.cost),
        );
    }
}

/// One CSV line; `series` names the scenario the row belongs to
#[derive(serde::Serialize)]
struct CsvRow<'a> {
    series: &'a str,
    year: u32,
    age: Option<u32>,
    cumulative_paid: f64,
    interest_paid: f64,
    cumulative_interest: f64,
    principal_paid: f64,
    balance: f64,
    cash_value: f64,
    loan_available: f64,
    death_benefit: f64,
    growth: f64,
    cost: f64,
}

impl<'a> CsvRow<'a> {
    fn new(series: &'a str, row: &YearRecord) -> Self {
        Self {
            series,
            year: row.year,
            age: row.age,
            cumulative_paid: row.cumulative_paid,
            interest_paid: row.interest_paid,
            cumulative_interest: row.cumulative_interest,
            principal_paid: row.principal_paid,
            balance: row.balance,
            cash_value: row.cash_value,
            loan_available: row.loan_available,
            death_benefit: row.death_benefit,
            growth: row.growth,
            cost: row.cost,
        }
    }
}

fn write_csv(path: &PathBuf, rows: &[CsvRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => Assumptions::default_illustration(),
    };

    let request = build_request(cli.command, cli.clamp)?;
    let response = evaluate(&request, &assumptions)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Family Bank v{}", env!("CARGO_PKG_VERSION"));
        println!("=================\n");
        for (label, value) in &response.summary {
            println!("  {:<20} {}", label, value);
        }

        match &response.result {
            CalculatorOutput::Compare(result) => {
                for scenario in result.scenarios() {
                    print_series(scenario.kind.label(), &scenario.series);
                }
            }
            CalculatorOutput::Amortize { schedule, .. } => print_series("Bank Loan", &schedule.series),
            CalculatorOutput::Generations(projection) => {
                print_series("Generation 1", &projection.first_generation);
                println!("\n{:>10} {:>16} {:>16} {:>16}", "Generation", "Inherited", "Cash Value", "Death Benefit");
                for g in &projection.generations {
                    println!("{:>10} {:>16} {:>16} {:>16}",
                        g.generation,
                        format_usd(g.inherited_capital),
                        format_usd(g.cash_value),
                        format_usd(g.death_benefit),
                    );
                }
            }
            CalculatorOutput::Estimate(estimate) => {
                print_series("Policy Estimate", &estimate.series);
                match estimate.breakeven_year {
                    Some(year) => println!("\nCash value covers premiums in year {}", year),
                    None => println!("\nCash value does not cover premiums within the horizon"),
                }
            }
            CalculatorOutput::InterestBleed(bleed) => {
                for debt in &bleed.debts {
                    println!("  {:<20} {}/mo, {} interest",
                        debt.name, format_usd(debt.monthly_payment), format_usd(debt.total_interest));
                }
                print_series("Interest Bleed", &bleed.series);
            }
        }
    }

    if let Some(path) = &cli.csv {
        let rows: Vec<CsvRow> = match &response.result {
            CalculatorOutput::Compare(result) => result
                .scenarios()
                .into_iter()
                .flat_map(|s| s.series.iter().map(move |r| CsvRow::new(s.kind.label(), r)))
                .collect(),
            CalculatorOutput::Amortize { schedule, .. } => {
                schedule.series.iter().map(|r| CsvRow::new("Bank Loan", r)).collect()
            }
            CalculatorOutput::Generations(projection) => {
                projection.first_generation.iter().map(|r| CsvRow::new("Generation 1", r)).collect()
            }
            CalculatorOutput::Estimate(estimate) => {
                estimate.series.iter().map(|r| CsvRow::new("Policy Estimate", r)).collect()
            }
            CalculatorOutput::InterestBleed(bleed) => {
                bleed.series.iter().map(|r| CsvRow::new("Interest Bleed", r)).collect()
            }
        };
        if rows.is_empty() {
            bail!("no yearly rows to write");
        }
        write_csv(path, &rows)?;
        log::info!("wrote {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}
