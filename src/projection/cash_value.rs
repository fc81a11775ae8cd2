//! Whole-life cash value accumulation for a level annual premium

use crate::assumptions::Assumptions;
use crate::error::{check_age, check_amount, check_factor, check_rate, check_years, ProjectionResult};
use super::records::YearRecord;
use serde::{Deserialize, Serialize};

/// Premium-to-cash-value schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashValueSchedule {
    /// Share of the first premium credited to cash value
    pub first_year_ratio: f64,
    /// Share of each later premium credited to cash value
    pub renewal_ratio: f64,
    /// Annual growth of the accumulated cash value
    pub growth_rate: f64,
}

impl CashValueSchedule {
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self {
            first_year_ratio: assumptions.first_year_cash_ratio,
            renewal_ratio: assumptions.renewal_cash_ratio,
            growth_rate: assumptions.policy_growth_rate,
        }
    }

    /// Cash value at the end of `year` given the prior year's value
    pub fn roll_forward(&self, prior: f64, premium: f64, year: u32) -> f64 {
        if year <= 1 {
            premium * self.first_year_ratio
        } else {
            prior * (1.0 + self.growth_rate) + premium * self.renewal_ratio
        }
    }
}

/// Face amount as a multiple of annual premium, banded by issue age
pub fn face_multiple(age: u32) -> f64 {
    match age {
        0..=34 => 40.0,
        35..=44 => 30.0,
        45..=54 => 20.0,
        55..=64 => 12.0,
        _ => 8.0,
    }
}

/// Level-premium policy projected year by year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumPolicy {
    pub issue_age: u32,
    pub annual_premium: f64,
    pub face_amount: f64,
    pub schedule: CashValueSchedule,
    pub loan_to_value: f64,
}

impl PremiumPolicy {
    pub fn new(
        issue_age: u32,
        annual_premium: f64,
        face_amount: f64,
        schedule: CashValueSchedule,
        loan_to_value: f64,
    ) -> ProjectionResult<Self> {
        check_factor("first_year_ratio", schedule.first_year_ratio)?;
        check_factor("renewal_ratio", schedule.renewal_ratio)?;
        check_rate("growth_rate", schedule.growth_rate)?;
        Ok(Self {
            issue_age: check_age("issue_age", issue_age)?,
            annual_premium: check_amount("annual_premium", annual_premium)?,
            face_amount: check_amount("face_amount", face_amount)?,
            schedule,
            loan_to_value: check_factor("loan_to_value", loan_to_value)?,
        })
    }

    /// Policy with the default schedule and an age-banded face amount
    pub fn illustrated(issue_age: u32, annual_premium: f64, assumptions: &Assumptions) -> ProjectionResult<Self> {
        Self::new(
            issue_age,
            annual_premium,
            annual_premium * face_multiple(issue_age),
            CashValueSchedule::from_assumptions(assumptions),
            assumptions.loan_to_value,
        )
    }

    /// Yearly rows for `horizon_years`; death benefit is face plus cash value
    pub fn project(&self, horizon_years: u32) -> ProjectionResult<Vec<YearRecord>> {
        check_years("horizon_years", horizon_years)?;

        let mut series = Vec::with_capacity(horizon_years as usize);
        let mut cash_value = 0.0;

        for year in 1..=horizon_years {
            let mut row = YearRecord::new(year);
            cash_value = self.schedule.roll_forward(cash_value, self.annual_premium, year);

            row.age = Some(self.issue_age + year - 1);
            row.cumulative_paid = self.annual_premium * year as f64;
            row.cash_value = cash_value;
            row.loan_available = cash_value * self.loan_to_value;
            row.death_benefit = self.face_amount + cash_value;

            series.push(row);
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MAX_AGE, MAX_HORIZON_YEARS};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_first_year_ratio() {
        let assumptions = Assumptions::default_illustration();
        let policy = PremiumPolicy::illustrated(40, 24_000.0, &assumptions).unwrap();
        let series = policy.project(3).unwrap();

        assert_abs_diff_eq!(series[0].cash_value, 15_600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            series[1].cash_value,
            15_600.0 * 1.045 + 24_000.0 * 0.85,
            epsilon = 1e-9
        );
        assert_eq!(series[0].age, Some(40));
        assert_eq!(series[2].age, Some(42));
        assert_eq!(series[2].cumulative_paid, 72_000.0);
    }

    #[test]
    fn test_face_amount_bands() {
        assert_eq!(face_multiple(25), 40.0);
        assert_eq!(face_multiple(35), 30.0);
        assert_eq!(face_multiple(54), 20.0);
        assert_eq!(face_multiple(60), 12.0);
        assert_eq!(face_multiple(70), 8.0);
    }

    #[test]
    fn test_cash_value_non_decreasing() {
        let assumptions = Assumptions::default_illustration();
        let series = PremiumPolicy::illustrated(30, 12_000.0, &assumptions)
            .unwrap()
            .project(40)
            .unwrap();
        for pair in series.windows(2) {
            assert!(pair[1].cash_value >= pair[0].cash_value);
            assert!(pair[1].death_benefit >= pair[0].death_benefit);
        }
    }

    #[test]
    fn test_issue_age_bounds() {
        let assumptions = Assumptions::default_illustration();
        let oldest = PremiumPolicy::illustrated(MAX_AGE, 12_000.0, &assumptions).unwrap();
        let series = oldest.project(MAX_HORIZON_YEARS).unwrap();
        assert_eq!(series.last().unwrap().age, Some(MAX_AGE + MAX_HORIZON_YEARS - 1));

        assert!(PremiumPolicy::illustrated(MAX_AGE + 1, 12_000.0, &assumptions).is_err());
        assert!(PremiumPolicy::illustrated(u32::MAX, 12_000.0, &assumptions).is_err());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let assumptions = Assumptions::default_illustration();
        let policy = PremiumPolicy::illustrated(30, 12_000.0, &assumptions).unwrap();
        assert!(policy.project(0).is_err());
    }
}
