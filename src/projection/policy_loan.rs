//! Policy loan projection with uninterrupted compounding
//!
//! The loan balance is held at the original principal for the whole horizon
//! (no repayment is modelled). The collateral keeps compounding on the
//! original principal at the policy growth rate while it is borrowed against,
//! so the net cost is interest paid minus that growth and may be negative.

use crate::error::{check_factor, check_positive, check_rate, check_years, ProjectionResult};
use super::records::{ScenarioKind, ScenarioResult, YearRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyLoan {
    pub principal: f64,
    /// Annual policy loan rate as a decimal
    pub loan_rate: f64,
    /// Annual growth of the collateralized cash value
    pub growth_rate: f64,
    pub term_years: u32,
    /// Loan availability as a share of cash value
    pub loan_to_value: f64,
}

impl PolicyLoan {
    pub fn new(
        principal: f64,
        loan_rate: f64,
        growth_rate: f64,
        term_years: u32,
        loan_to_value: f64,
    ) -> ProjectionResult<Self> {
        Ok(Self {
            principal: check_positive("principal", principal)?,
            loan_rate: check_rate("policy_rate", loan_rate)?,
            growth_rate: check_rate("growth_rate", growth_rate)?,
            term_years: check_years("term_years", term_years)?,
            loan_to_value: check_factor("loan_to_value", loan_to_value)?,
        })
    }

    pub fn project(&self) -> ScenarioResult {
        let mut result = ScenarioResult::new(ScenarioKind::Policy, self.principal);

        let yearly_interest = self.principal * self.loan_rate;
        let mut cumulative_interest = 0.0;

        for year in 1..=self.term_years {
            let mut row = YearRecord::new(year);

            cumulative_interest += yearly_interest;
            let growth = self.principal * ((1.0 + self.growth_rate).powi(year as i32) - 1.0);

            row.interest_paid = yearly_interest;
            row.cumulative_interest = cumulative_interest;
            row.cumulative_paid = cumulative_interest;
            row.balance = self.principal;
            row.growth = growth;
            row.cash_value = self.principal + growth;
            row.loan_available = row.cash_value * self.loan_to_value;
            row.cost = self.principal + cumulative_interest - growth;

            result.add_row(row);
        }

        let final_growth = result.series.last().map(|r| r.growth).unwrap_or(0.0);
        result.total_interest = cumulative_interest;
        result.total_cost = self.principal + cumulative_interest - final_growth;
        result
    }
}
