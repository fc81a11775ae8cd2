//! Illustration assumptions: growth rates, cash value ratios, generational
//! multipliers and slider ranges

mod ranges;
pub mod loader;

pub use ranges::{Bounds, SliderRanges};
pub(crate) use ranges::clamp_logged;

use crate::error::{check_factor, check_rate, ProjectionError, ProjectionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for all illustration assumptions
///
/// These are fixed narrative constants for illustrating the concept, not
/// measured or validated policy projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Annual growth of whole-life cash value (also the side pool behind a policy loan)
    pub policy_growth_rate: f64,

    /// Share of the first-year premium that shows up as cash value
    pub first_year_cash_ratio: f64,

    /// Share of each renewal premium added to cash value
    pub renewal_cash_ratio: f64,

    /// Share of the generation-1 death benefit inherited by later generations
    pub inheritance_ratio: f64,

    /// Own-policy contribution of later generations, as a share of generation-1 cash value
    pub own_policy_ratio: f64,

    /// Death benefit multiplier from one generation to the next
    pub death_benefit_step: f64,

    /// Maximum policy loan as a share of cash value
    pub loan_to_value: f64,

    /// Slider ranges for clamped requests
    pub ranges: SliderRanges,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_illustration()
    }
}

impl Assumptions {
    /// Create assumptions with the default illustration values
    pub fn default_illustration() -> Self {
        Self {
            policy_growth_rate: 0.045,
            first_year_cash_ratio: 0.65,
            renewal_cash_ratio: 0.85,
            inheritance_ratio: 0.80,
            own_policy_ratio: 0.60,
            death_benefit_step: 1.5,
            loan_to_value: 0.90,
            ranges: SliderRanges::default(),
        }
    }

    /// Load assumptions from the default location (data/assumptions/)
    pub fn from_csv() -> ProjectionResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from a specific directory on top of the defaults
    pub fn from_csv_path(path: &Path) -> ProjectionResult<Self> {
        let overrides = loader::load_illustration_overrides(path)?;
        let mut assumptions = Self::default_illustration();
        for (key, value) in &overrides {
            assumptions.apply_override(key, *value)?;
        }
        log::debug!(
            "loaded {} assumption overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(assumptions)
    }

    /// Set one assumption by its CSV key
    pub fn apply_override(&mut self, key: &str, value: f64) -> ProjectionResult<()> {
        if !value.is_finite() {
            return Err(ProjectionError::MalformedAssumption {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        let ranges = &mut self.ranges;
        match key {
            "policy_growth_rate" => self.policy_growth_rate = rate(key, value)?,
            "first_year_cash_ratio" => self.first_year_cash_ratio = factor(key, value)?,
            "renewal_cash_ratio" => self.renewal_cash_ratio = factor(key, value)?,
            "inheritance_ratio" => self.inheritance_ratio = factor(key, value)?,
            "own_policy_ratio" => self.own_policy_ratio = factor(key, value)?,
            "death_benefit_step" => self.death_benefit_step = factor(key, value)?,
            "loan_to_value" => self.loan_to_value = factor(key, value)?,
            "bank_rate_min" => ranges.bank_rate.min = value,
            "bank_rate_max" => ranges.bank_rate.max = value,
            "policy_rate_min" => ranges.policy_rate.min = value,
            "policy_rate_max" => ranges.policy_rate.max = value,
            "savings_rate_min" => ranges.savings_rate.min = value,
            "savings_rate_max" => ranges.savings_rate.max = value,
            "principal_min" => ranges.principal.min = value,
            "principal_max" => ranges.principal.max = value,
            "premium_min" => ranges.premium.min = value,
            "premium_max" => ranges.premium.max = value,
            "term_years_min" => ranges.term_years.min = whole(key, value)?,
            "term_years_max" => ranges.term_years.max = whole(key, value)?,
            "horizon_years_min" => ranges.horizon_years.min = whole(key, value)?,
            "horizon_years_max" => ranges.horizon_years.max = whole(key, value)?,
            "age_min" => ranges.age.min = whole(key, value)?,
            "age_max" => ranges.age.max = whole(key, value)?,
            "generations_min" => ranges.generations.min = whole(key, value)?,
            "generations_max" => ranges.generations.max = whole(key, value)?,
            other => return Err(ProjectionError::UnknownAssumption(other.to_string())),
        }
        Ok(())
    }
}

fn malformed(key: &str, value: f64) -> ProjectionError {
    ProjectionError::MalformedAssumption {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn rate(key: &str, value: f64) -> ProjectionResult<f64> {
    check_rate(key, value).map_err(|_| malformed(key, value))
}

/// Ratios and multipliers must be non-negative and bounded
fn factor(key: &str, value: f64) -> ProjectionResult<f64> {
    check_factor(key, value).map_err(|_| malformed(key, value))
}

/// Year and count keys must be non-negative whole numbers
fn whole(key: &str, value: f64) -> ProjectionResult<u32> {
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ProjectionError::MalformedAssumption {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}
