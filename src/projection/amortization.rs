//! Fixed-payment amortized loan projection

use crate::error::{check_positive, check_rate, check_years, ProjectionResult};
use super::records::{ScenarioKind, ScenarioResult, YearRecord};
use serde::{Deserialize, Serialize};

/// Monthly payment for a fully amortizing loan
///
/// Standard annuity formula `P * r(1+r)^n / ((1+r)^n - 1)` with `r` the
/// monthly rate and `n = term_years * 12`, evaluated as `P*r / (1 - (1+r)^-n)`
/// so large rates stay finite. A rate too small to move `(1+r)^n` off 1.0
/// (zero included) is straight-line repayment `P / n`.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> ProjectionResult<f64> {
    let loan = AmortizedLoan::new(principal, annual_rate, term_years)?;
    Ok(loan.monthly_payment())
}

/// A bank loan repaid in equal monthly installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedLoan {
    pub principal: f64,
    /// Annual rate as a decimal (0.079 = 7.9%)
    pub annual_rate: f64,
    pub term_years: u32,
}

impl AmortizedLoan {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32) -> ProjectionResult<Self> {
        Ok(Self {
            principal: check_positive("principal", principal)?,
            annual_rate: check_rate("annual_rate", annual_rate)?,
            term_years: check_years("term_years", term_years)?,
        })
    }

    pub fn months(&self) -> u32 {
        self.term_years * 12
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    pub fn monthly_payment(&self) -> f64 {
        let n = self.months() as f64;
        let r = self.monthly_rate();
        let discount = 1.0 - (1.0 + r).powf(-n);
        if r == 0.0 || discount <= 0.0 {
            return self.principal / n;
        }
        self.principal * r / discount
    }

    /// Run the monthly schedule and roll it up by year
    pub fn project(&self) -> ScenarioResult {
        let mut result = ScenarioResult::new(ScenarioKind::Bank, self.principal);

        let payment = self.monthly_payment();
        let r = self.monthly_rate();
        let last_month = self.months();

        let mut balance = self.principal;
        let mut cumulative_paid = 0.0;
        let mut cumulative_interest = 0.0;
        let mut month = 0;

        for year in 1..=self.term_years {
            let mut row = YearRecord::new(year);

            for _ in 0..12 {
                month += 1;
                let interest = balance * r;
                // Final installment retires whatever rounding left behind
                let principal_part = if month == last_month {
                    balance
                } else {
                    (payment - interest).clamp(0.0, balance)
                };

                balance = (balance - principal_part).max(0.0);
                row.interest_paid += interest;
                row.principal_paid += principal_part;
            }

            cumulative_interest += row.interest_paid;
            cumulative_paid += row.interest_paid + row.principal_paid;

            row.balance = balance;
            row.cumulative_interest = cumulative_interest;
            row.cumulative_paid = cumulative_paid;
            row.cost = self.principal + cumulative_interest;

            result.add_row(row);
        }

        result.total_interest = cumulative_interest;
        result.total_cost = self.principal + cumulative_interest;
        result
    }
}
