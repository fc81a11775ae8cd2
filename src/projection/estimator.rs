//! Policy estimator: cash value, loan availability and death benefit for a
//! prospective policy given age, premium, health rating and focus

use crate::assumptions::{clamp_logged, Assumptions};
use crate::error::{check_years, ProjectionResult};
use super::cash_value::{face_multiple, CashValueSchedule, PremiumPolicy};
use super::records::YearRecord;
use serde::{Deserialize, Serialize};

/// Underwriting class of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    PreferredPlus,
    Preferred,
    Standard,
    /// Substandard, table-rated
    Table,
}

impl HealthRating {
    /// Multiplier on the face amount a premium buys
    pub fn face_factor(&self) -> f64 {
        match self {
            HealthRating::PreferredPlus => 1.15,
            HealthRating::Preferred => 1.0,
            HealthRating::Standard => 0.90,
            HealthRating::Table => 0.75,
        }
    }
}

/// What the policy design emphasizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFocus {
    CashAccumulation,
    Balanced,
    DeathBenefit,
}

impl PolicyFocus {
    /// (first-year, renewal) cash value ratios; balanced uses the assumption defaults
    pub fn cash_ratios(&self, assumptions: &Assumptions) -> (f64, f64) {
        match self {
            PolicyFocus::CashAccumulation => (0.70, 0.90),
            PolicyFocus::Balanced => (assumptions.first_year_cash_ratio, assumptions.renewal_cash_ratio),
            PolicyFocus::DeathBenefit => (0.55, 0.80),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInput {
    pub age: u32,
    pub annual_premium: f64,
    pub health: HealthRating,
    pub focus: PolicyFocus,
    pub horizon_years: u32,
}

impl EstimatorInput {
    pub fn clamped(&self, assumptions: &Assumptions) -> Self {
        let ranges = &assumptions.ranges;
        Self {
            age: clamp_logged("age", &ranges.age, self.age),
            annual_premium: clamp_logged("annual_premium", &ranges.premium, self.annual_premium),
            horizon_years: clamp_logged("horizon_years", &ranges.horizon_years, self.horizon_years),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEstimate {
    pub face_amount: f64,
    pub series: Vec<YearRecord>,
    /// First year in which cash value covers every premium paid
    pub breakeven_year: Option<u32>,
    pub final_cash_value: f64,
    pub final_loan_available: f64,
    pub final_death_benefit: f64,
}

pub fn estimate_policy(input: &EstimatorInput, assumptions: &Assumptions) -> ProjectionResult<PolicyEstimate> {
    check_years("horizon_years", input.horizon_years)?;

    let (first_year_ratio, renewal_ratio) = input.focus.cash_ratios(assumptions);
    let schedule = CashValueSchedule {
        first_year_ratio,
        renewal_ratio,
        growth_rate: assumptions.policy_growth_rate,
    };
    let face_amount = input.annual_premium * face_multiple(input.age) * input.health.face_factor();

    let policy = PremiumPolicy::new(
        input.age,
        input.annual_premium,
        face_amount,
        schedule,
        assumptions.loan_to_value,
    )?;
    let series = policy.project(input.horizon_years)?;

    let breakeven_year = series
        .iter()
        .find(|r| r.cumulative_paid > 0.0 && r.cash_value >= r.cumulative_paid)
        .map(|r| r.year);

    let last = series.last().cloned().unwrap_or_else(|| YearRecord::new(0));

    Ok(PolicyEstimate {
        face_amount,
        breakeven_year,
        final_cash_value: last.cash_value,
        final_loan_available: last.loan_available,
        final_death_benefit: last.death_benefit,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn input(health: HealthRating, focus: PolicyFocus) -> EstimatorInput {
        EstimatorInput {
            age: 40,
            annual_premium: 10_000.0,
            health,
            focus,
            horizon_years: 20,
        }
    }

    #[test]
    fn test_balanced_preferred_matches_defaults() {
        let assumptions = Assumptions::default_illustration();
        let estimate = estimate_policy(&input(HealthRating::Preferred, PolicyFocus::Balanced), &assumptions).unwrap();

        assert_abs_diff_eq!(estimate.face_amount, 300_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.series[0].cash_value, 6_500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.final_loan_available, estimate.final_cash_value * 0.9, epsilon = 1e-9);
        assert_eq!(estimate.series.len(), 20);
    }

    #[test]
    fn test_focus_orders_cash_value() {
        let assumptions = Assumptions::default_illustration();
        let cash = estimate_policy(&input(HealthRating::Standard, PolicyFocus::CashAccumulation), &assumptions).unwrap();
        let db = estimate_policy(&input(HealthRating::Standard, PolicyFocus::DeathBenefit), &assumptions).unwrap();

        assert!(cash.final_cash_value > db.final_cash_value);
    }

    #[test]
    fn test_health_scales_face() {
        let assumptions = Assumptions::default_illustration();
        let best = estimate_policy(&input(HealthRating::PreferredPlus, PolicyFocus::Balanced), &assumptions).unwrap();
        let rated = estimate_policy(&input(HealthRating::Table, PolicyFocus::Balanced), &assumptions).unwrap();

        assert!(best.face_amount > rated.face_amount);
        assert!(best.final_death_benefit > rated.final_death_benefit);
    }

    #[test]
    fn test_breakeven_year() {
        let assumptions = Assumptions::default_illustration();
        let estimate = estimate_policy(&input(HealthRating::Preferred, PolicyFocus::CashAccumulation), &assumptions).unwrap();
        let year = estimate.breakeven_year.expect("breaks even within 20 years");

        let row = &estimate.series[year as usize - 1];
        assert!(row.cash_value >= row.cumulative_paid);
        let before = &estimate.series[year as usize - 2];
        assert!(before.cash_value < before.cumulative_paid);
    }

    #[test]
    fn test_no_breakeven_in_short_horizon() {
        let assumptions = Assumptions::default_illustration();
        let mut short = input(HealthRating::Preferred, PolicyFocus::DeathBenefit);
        short.horizon_years = 2;
        let estimate = estimate_policy(&short, &assumptions).unwrap();
        assert_eq!(estimate.breakeven_year, None);
    }

    #[test]
    fn test_age_out_of_range_rejected() {
        let assumptions = Assumptions::default_illustration();
        let mut ancient = input(HealthRating::Standard, PolicyFocus::Balanced);
        ancient.age = u32::MAX;
        assert!(estimate_policy(&ancient, &assumptions).is_err());

        ancient.age = 120;
        ancient.horizon_years = 100;
        let estimate = estimate_policy(&ancient, &assumptions).unwrap();
        assert_eq!(estimate.series.last().unwrap().age, Some(219));
    }

    #[test]
    fn test_health_rating_serde() {
        let json = serde_json::to_string(&HealthRating::PreferredPlus).unwrap();
        assert_eq!(json, "\"preferred_plus\"");
    }
}
