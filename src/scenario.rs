//! Financing comparison: pay cash, bank loan, or policy loan
//!
//! Runs the three projectors over the same principal and horizon and ranks
//! them by signed total cost. `ScenarioRunner` keeps one set of assumptions
//! loaded and fans batches of comparisons out over rayon.

use crate::assumptions::{clamp_logged, Assumptions};
use crate::error::ProjectionResult;
use crate::projection::{AmortizedLoan, CashPurchase, PolicyLoan, ScenarioKind, ScenarioResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inputs shared by all three financing options; rates are decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub principal: f64,
    pub bank_rate: f64,
    pub policy_rate: f64,
    /// Return the cash would have earned if not spent
    pub savings_rate: f64,
    pub term_years: u32,
}

impl ComparisonInput {
    /// Bound every field to its slider range
    pub fn clamped(&self, assumptions: &Assumptions) -> Self {
        let ranges = &assumptions.ranges;
        Self {
            principal: clamp_logged("principal", &ranges.principal, self.principal),
            bank_rate: clamp_logged("bank_rate", &ranges.bank_rate, self.bank_rate),
            policy_rate: clamp_logged("policy_rate", &ranges.policy_rate, self.policy_rate),
            savings_rate: clamp_logged("savings_rate", &ranges.savings_rate, self.savings_rate),
            term_years: clamp_logged("term_years", &ranges.term_years, self.term_years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub cash: ScenarioResult,
    pub bank: ScenarioResult,
    pub policy: ScenarioResult,
    pub winner: ScenarioKind,
    /// Costlier of cash and bank minus the policy loan cost
    pub savings: f64,
}

impl ComparisonResult {
    pub fn scenario(&self, kind: ScenarioKind) -> &ScenarioResult {
        match kind {
            ScenarioKind::Cash => &self.cash,
            ScenarioKind::Bank => &self.bank,
            ScenarioKind::Policy => &self.policy,
        }
    }

    pub fn scenarios(&self) -> [&ScenarioResult; 3] {
        [&self.cash, &self.bank, &self.policy]
    }
}

/// Lowest cost wins; equal costs go to the earlier entry of
/// `ScenarioKind::PRECEDENCE` (cash, then bank, then policy)
pub fn pick_winner(cash_cost: f64, bank_cost: f64, policy_cost: f64) -> ScenarioKind {
    let costs = [cash_cost, bank_cost, policy_cost];
    let mut winner = 0;
    for i in 1..costs.len() {
        if costs[i] < costs[winner] {
            winner = i;
        }
    }
    ScenarioKind::PRECEDENCE[winner]
}

/// Compare the three financing options for one set of inputs
pub fn compare(input: &ComparisonInput, assumptions: &Assumptions) -> ProjectionResult<ComparisonResult> {
    let cash = CashPurchase::new(input.principal, input.savings_rate, input.term_years)?.project();
    let bank = AmortizedLoan::new(input.principal, input.bank_rate, input.term_years)?.project();
    let policy = PolicyLoan::new(
        input.principal,
        input.policy_rate,
        assumptions.policy_growth_rate,
        input.term_years,
        assumptions.loan_to_value,
    )?
    .project();

    let winner = pick_winner(cash.total_cost, bank.total_cost, policy.total_cost);
    let savings = cash.total_cost.max(bank.total_cost) - policy.total_cost;

    log::debug!(
        "compare principal={} term={}: cash={:.2} bank={:.2} policy={:.2} -> {:?}",
        input.principal,
        input.term_years,
        cash.total_cost,
        bank.total_cost,
        policy.total_cost,
        winner
    );

    Ok(ComparisonResult {
        cash,
        bank,
        policy,
        winner,
        savings,
    })
}

/// Pre-loaded runner for repeated comparisons
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_illustration(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> ProjectionResult<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> ProjectionResult<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    pub fn run(&self, input: &ComparisonInput) -> ProjectionResult<ComparisonResult> {
        compare(input, &self.base_assumptions)
    }

    /// Run many comparisons in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[ComparisonInput]) -> Vec<ProjectionResult<ComparisonResult>> {
        inputs
            .par_iter()
            .map(|input| compare(input, &self.base_assumptions))
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
