//! Multi-generational family bank projection
//!
//! Generation 1 funds a single policy. Each later generation starts with
//! capital inherited from the generation-1 death benefit plus its own policy
//! contribution sized off generation-1 cash value, and its death benefit
//! steps up from the prior generation's.

use crate::assumptions::Assumptions;
use crate::error::{check_factor, check_years, ProjectionError, ProjectionResult};
use super::cash_value::PremiumPolicy;
use super::records::YearRecord;
use serde::{Deserialize, Serialize};

/// Most generations the projector will chain
pub const MAX_GENERATIONS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationalInput {
    pub current_age: u32,
    pub annual_premium: f64,
    pub generation_count: u32,
    pub horizon_years: u32,
}

impl GenerationalInput {
    /// Bound every field to its slider range
    pub fn clamped(&self, assumptions: &Assumptions) -> Self {
        use crate::assumptions::clamp_logged;
        let ranges = &assumptions.ranges;
        Self {
            current_age: clamp_logged("current_age", &ranges.age, self.current_age),
            annual_premium: clamp_logged("annual_premium", &ranges.premium, self.annual_premium),
            generation_count: clamp_logged("generation_count", &ranges.generations, self.generation_count),
            horizon_years: clamp_logged("horizon_years", &ranges.horizon_years, self.horizon_years),
        }
    }
}

/// Terminal values for one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: u32,
    /// Capital received from generation 1 (zero for generation 1)
    pub inherited_capital: f64,
    /// Value of the generation's own policy
    pub own_policy_value: f64,
    pub cash_value: f64,
    pub death_benefit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationalProjection {
    /// Year-by-year rows of the generation-1 policy
    pub first_generation: Vec<YearRecord>,
    pub generations: Vec<GenerationRecord>,
    /// Sum of every generation's cash value
    pub total_family_wealth: f64,
}

pub fn project_generations(
    input: &GenerationalInput,
    assumptions: &Assumptions,
) -> ProjectionResult<GenerationalProjection> {
    if input.generation_count == 0 || input.generation_count > MAX_GENERATIONS {
        return Err(ProjectionError::invalid(
            "generation_count",
            format!("must be between 1 and {}", MAX_GENERATIONS),
        ));
    }
    check_years("horizon_years", input.horizon_years)?;
    let inheritance_ratio = check_factor("inheritance_ratio", assumptions.inheritance_ratio)?;
    let own_policy_ratio = check_factor("own_policy_ratio", assumptions.own_policy_ratio)?;
    let death_benefit_step = check_factor("death_benefit_step", assumptions.death_benefit_step)?;

    let policy = PremiumPolicy::illustrated(input.current_age, input.annual_premium, assumptions)?;
    let first_generation = policy.project(input.horizon_years)?;

    let (terminal_cv, terminal_db) = first_generation
        .last()
        .map(|r| (r.cash_value, r.death_benefit))
        .unwrap_or((0.0, 0.0));

    let mut generations = Vec::with_capacity(input.generation_count as usize);
    generations.push(GenerationRecord {
        generation: 1,
        inherited_capital: 0.0,
        own_policy_value: terminal_cv,
        cash_value: terminal_cv,
        death_benefit: terminal_db,
    });

    let inherited_capital = inheritance_ratio * terminal_db;
    let own_policy_value = own_policy_ratio * terminal_cv;
    let mut prior_death_benefit = terminal_db;

    for generation in 2..=input.generation_count {
        let death_benefit = prior_death_benefit * death_benefit_step;
        generations.push(GenerationRecord {
            generation,
            inherited_capital,
            own_policy_value,
            cash_value: inherited_capital + own_policy_value,
            death_benefit,
        });
        prior_death_benefit = death_benefit;
    }

    let total_family_wealth = generations.iter().map(|g| g.cash_value).sum();

    log::debug!(
        "{} generations, family wealth {:.2}",
        generations.len(),
        total_family_wealth
    );

    Ok(GenerationalProjection {
        first_generation,
        generations,
        total_family_wealth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn input(generation_count: u32) -> GenerationalInput {
        GenerationalInput {
            current_age: 35,
            annual_premium: 24_000.0,
            generation_count,
            horizon_years: 30,
        }
    }

    #[test]
    fn test_two_generations() {
        let assumptions = Assumptions::default_illustration();
        let projection = project_generations(&input(2), &assumptions).unwrap();

        assert_abs_diff_eq!(projection.first_generation[0].cash_value, 15_600.0, epsilon = 1e-9);
        assert_eq!(projection.generations.len(), 2);

        let gen1 = &projection.generations[0];
        let gen2 = &projection.generations[1];
        assert_abs_diff_eq!(
            gen2.cash_value,
            0.8 * gen1.death_benefit + 0.6 * gen1.cash_value,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(gen2.death_benefit, gen1.death_benefit * 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(
            projection.total_family_wealth,
            gen1.cash_value + gen2.cash_value,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_death_benefit_chains_from_prior_generation() {
        let assumptions = Assumptions::default_illustration();
        let projection = project_generations(&input(4), &assumptions).unwrap();
        let db: Vec<f64> = projection.generations.iter().map(|g| g.death_benefit).collect();

        assert_abs_diff_eq!(db[3], db[0] * 1.5_f64.powi(3), epsilon = 1e-6);
    }

    #[test]
    fn test_single_generation_wealth() {
        let assumptions = Assumptions::default_illustration();
        let projection = project_generations(&input(1), &assumptions).unwrap();
        let terminal = projection.first_generation.last().unwrap().cash_value;
        assert_eq!(projection.total_family_wealth, terminal);
    }

    #[test]
    fn test_generation_count_bounds() {
        let assumptions = Assumptions::default_illustration();
        assert!(project_generations(&input(0), &assumptions).is_err());
        assert!(project_generations(&input(5), &assumptions).is_err());
    }

    #[test]
    fn test_age_out_of_range_rejected() {
        let assumptions = Assumptions::default_illustration();
        let mut old = input(2);
        old.current_age = u32::MAX;
        assert!(project_generations(&old, &assumptions).is_err());

        old.current_age = 121;
        assert!(project_generations(&old, &assumptions).is_err());
    }

    #[test]
    fn test_bad_generation_ratios_rejected() {
        let mut assumptions = Assumptions::default_illustration();
        assumptions.death_benefit_step = -1.5;
        assert!(project_generations(&input(3), &assumptions).is_err());

        let mut assumptions = Assumptions::default_illustration();
        assumptions.inheritance_ratio = f64::NAN;
        assert!(project_generations(&input(2), &assumptions).is_err());

        let mut assumptions = Assumptions::default_illustration();
        assumptions.own_policy_ratio = -0.6;
        assert!(project_generations(&input(2), &assumptions).is_err());
    }

    #[test]
    fn test_deterministic() {
        let assumptions = Assumptions::default_illustration();
        let a = project_generations(&input(3), &assumptions).unwrap();
        let b = project_generations(&input(3), &assumptions).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clamped_input() {
        let assumptions = Assumptions::default_illustration();
        let wild = GenerationalInput {
            current_age: 10,
            annual_premium: 100.0,
            generation_count: 9,
            horizon_years: 80,
        };
        let clamped = wild.clamped(&assumptions);
        assert_eq!(clamped.current_age, 18);
        assert_eq!(clamped.annual_premium, 1_200.0);
        assert_eq!(clamped.generation_count, 4);
        assert_eq!(clamped.horizon_years, 40);
    }
}
