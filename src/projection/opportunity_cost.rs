//! Opportunity cost of paying cash

use crate::error::{check_positive, check_rate, check_years, ProjectionResult};
use super::records::{ScenarioKind, ScenarioResult, YearRecord};
use serde::{Deserialize, Serialize};

/// Cash purchase whose cost includes the growth the spent principal would
/// have earned, compounding annually from year 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashPurchase {
    pub principal: f64,
    /// Assumed annual investment return as a decimal
    pub return_rate: f64,
    pub term_years: u32,
}

impl CashPurchase {
    pub fn new(principal: f64, return_rate: f64, term_years: u32) -> ProjectionResult<Self> {
        Ok(Self {
            principal: check_positive("principal", principal)?,
            return_rate: check_rate("savings_rate", return_rate)?,
            term_years: check_years("term_years", term_years)?,
        })
    }

    /// Foregone growth by the end of `year`
    pub fn lost_growth(&self, year: u32) -> f64 {
        self.principal * ((1.0 + self.return_rate).powi(year as i32) - 1.0)
    }

    pub fn project(&self) -> ScenarioResult {
        let mut result = ScenarioResult::new(ScenarioKind::Cash, self.principal);

        for year in 1..=self.term_years {
            let mut row = YearRecord::new(year);
            row.cumulative_paid = self.principal;
            row.growth = self.lost_growth(year);
            row.cost = self.principal + row.growth;
            result.add_row(row);
        }

        result.total_cost = self.principal + self.lost_growth(self.term_years);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_true_cost() {
        let result = CashPurchase::new(50_000.0, 0.06, 5).unwrap().project();
        let expected = 50_000.0 * 1.06_f64.powi(5);

        assert_abs_diff_eq!(result.total_cost, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(result.total_cost, 66_911.28, epsilon = 0.01);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_first_year_growth() {
        let purchase = CashPurchase::new(10_000.0, 0.08, 3).unwrap();
        assert_abs_diff_eq!(purchase.lost_growth(1), 800.0, epsilon = 1e-9);
        assert_eq!(purchase.project().series.len(), 3);
    }

    #[test]
    fn test_zero_rate_costs_principal() {
        let result = CashPurchase::new(10_000.0, 0.0, 10).unwrap().project();
        assert_eq!(result.total_cost, 10_000.0);
    }
}
