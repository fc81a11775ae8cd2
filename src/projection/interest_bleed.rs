//! Interest bleed: how much interest a household pays across its debts,
//! and what that interest would have grown to if kept

use crate::error::{check_rate, ProjectionError, ProjectionResult};
use super::amortization::AmortizedLoan;
use super::records::YearRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInput {
    pub name: String,
    pub balance: f64,
    pub annual_rate: f64,
    pub term_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestBleedInput {
    pub debts: Vec<DebtInput>,
    /// Return the bled interest could have earned instead
    #[serde(default)]
    pub reinvest_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub name: String,
    pub monthly_payment: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestBleed {
    pub debts: Vec<DebtSummary>,
    /// Yearly rows across all debts until the longest is retired
    pub series: Vec<YearRecord>,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    /// Future value of each year's interest at the reinvest rate, at the horizon
    pub lost_growth: f64,
}

pub fn project_interest_bleed(input: &InterestBleedInput) -> ProjectionResult<InterestBleed> {
    if input.debts.is_empty() {
        return Err(ProjectionError::invalid("debts", "at least one debt is required"));
    }
    let reinvest_rate = check_rate("reinvest_rate", input.reinvest_rate)?;

    let mut loans = Vec::with_capacity(input.debts.len());
    for debt in &input.debts {
        let loan = AmortizedLoan::new(debt.balance, debt.annual_rate, debt.term_years)?;
        loans.push((debt.name.clone(), loan.monthly_payment(), loan.project()));
    }

    let horizon = loans
        .iter()
        .map(|(_, _, result)| result.series.len() as u32)
        .max()
        .unwrap_or(0);

    let mut series = Vec::with_capacity(horizon as usize);
    let mut cumulative_interest = 0.0;
    let mut cumulative_paid = 0.0;

    for year in 1..=horizon {
        let mut row = YearRecord::new(year);
        let idx = (year - 1) as usize;

        for (_, _, result) in &loans {
            // Retired debts contribute nothing
            if let Some(debt_row) = result.series.get(idx) {
                row.interest_paid += debt_row.interest_paid;
                row.principal_paid += debt_row.principal_paid;
                row.balance += debt_row.balance;
            }
        }

        cumulative_interest += row.interest_paid;
        cumulative_paid += row.interest_paid + row.principal_paid;
        row.cumulative_interest = cumulative_interest;
        row.cumulative_paid = cumulative_paid;
        row.cost = cumulative_interest;
        series.push(row);
    }

    let lost_growth = series
        .iter()
        .map(|r| r.interest_paid * ((1.0 + reinvest_rate).powi((horizon - r.year) as i32) - 1.0))
        .sum();

    let debts: Vec<DebtSummary> = loans
        .into_iter()
        .map(|(name, monthly_payment, result)| DebtSummary {
            name,
            monthly_payment,
            total_interest: result.total_interest,
        })
        .collect();

    Ok(InterestBleed {
        total_monthly_payment: debts.iter().map(|d| d.monthly_payment).sum(),
        total_interest: cumulative_interest,
        debts,
        series,
        lost_growth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn household() -> InterestBleedInput {
        InterestBleedInput {
            debts: vec![
                DebtInput { name: "Mortgage".into(), balance: 300_000.0, annual_rate: 0.065, term_years: 30 },
                DebtInput { name: "Auto".into(), balance: 35_000.0, annual_rate: 0.079, term_years: 5 },
                DebtInput { name: "Student".into(), balance: 40_000.0, annual_rate: 0.055, term_years: 10 },
            ],
            reinvest_rate: 0.0,
        }
    }

    #[test]
    fn test_total_is_sum_of_debts() {
        let bleed = project_interest_bleed(&household()).unwrap();
        let per_debt: f64 = bleed.debts.iter().map(|d| d.total_interest).sum();

        assert_abs_diff_eq!(bleed.total_interest, per_debt, epsilon = 1e-6);
        assert_eq!(bleed.series.len(), 30);
        assert_eq!(bleed.series.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_retired_debts_stop_bleeding() {
        let bleed = project_interest_bleed(&household()).unwrap();
        let mortgage_only = AmortizedLoan::new(300_000.0, 0.065, 30).unwrap().project();

        // After year 10 only the mortgage is left
        assert_abs_diff_eq!(
            bleed.series[10].interest_paid,
            mortgage_only.series[10].interest_paid,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_lost_growth() {
        let mut input = household();
        assert_eq!(project_interest_bleed(&input).unwrap().lost_growth, 0.0);

        input.reinvest_rate = 0.06;
        assert!(project_interest_bleed(&input).unwrap().lost_growth > 0.0);
    }

    #[test]
    fn test_empty_debts_rejected() {
        let input = InterestBleedInput { debts: vec![], reinvest_rate: 0.0 };
        assert!(project_interest_bleed(&input).is_err());
    }
}
