//! JSON request/response envelope shared by the CLI and the Lambda handler
//!
//! A request names its calculator in a `"calculator"` field next to that
//! calculator's inputs, e.g.
//!
//! ```json
//! { "calculator": "compare", "clamp": true, "principal": 50000,
//!   "bank_rate": 0.079, "policy_rate": 0.05, "savings_rate": 0.06, "term_years": 5 }
//! ```

use crate::assumptions::{clamp_logged, Assumptions};
use crate::error::ProjectionResult;
use crate::format::{format_percent, format_usd};
use crate::projection::{
    estimate_policy, project_generations, project_interest_bleed, AmortizedLoan, EstimatorInput,
    GenerationalInput, GenerationalProjection, InterestBleed, InterestBleedInput, PolicyEstimate,
    ScenarioResult,
};
use crate::scenario::{compare, ComparisonInput, ComparisonResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs of the stand-alone amortization calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizeInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: u32,
}

impl AmortizeInput {
    pub fn clamped(&self, assumptions: &Assumptions) -> Self {
        let ranges = &assumptions.ranges;
        Self {
            principal: clamp_logged("principal", &ranges.principal, self.principal),
            annual_rate: clamp_logged("annual_rate", &ranges.bank_rate, self.annual_rate),
            term_years: clamp_logged("term_years", &ranges.term_years, self.term_years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum Calculator {
    Compare(ComparisonInput),
    Amortize(AmortizeInput),
    Generations(GenerationalInput),
    Estimate(EstimatorInput),
    InterestBleed(InterestBleedInput),
}

impl Calculator {
    pub fn name(&self) -> &'static str {
        match self {
            Calculator::Compare(_) => "compare",
            Calculator::Amortize(_) => "amortize",
            Calculator::Generations(_) => "generations",
            Calculator::Estimate(_) => "estimate",
            Calculator::InterestBleed(_) => "interest_bleed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorRequest {
    pub calculator: Calculator,
    /// Bound inputs to the slider ranges before projecting
    pub clamp: bool,
}

#[derive(Deserialize)]
struct ClampFlag {
    #[serde(default)]
    clamp: bool,
}

impl CalculatorRequest {
    pub fn new(calculator: Calculator) -> Self {
        Self { calculator, clamp: false }
    }

    pub fn from_json(body: &str) -> ProjectionResult<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let flag: ClampFlag = serde_json::from_value(value.clone())?;
        let calculator: Calculator = serde_json::from_value(value)?;
        Ok(Self {
            calculator,
            clamp: flag.clamp,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CalculatorOutput {
    Compare(ComparisonResult),
    Amortize {
        monthly_payment: f64,
        schedule: ScenarioResult,
    },
    Generations(GenerationalProjection),
    Estimate(PolicyEstimate),
    InterestBleed(InterestBleed),
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculatorResponse {
    pub calculator: &'static str,
    /// Headline figures formatted for display
    pub summary: BTreeMap<&'static str, String>,
    pub result: CalculatorOutput,
}

/// Run the requested calculator
pub fn evaluate(request: &CalculatorRequest, assumptions: &Assumptions) -> ProjectionResult<CalculatorResponse> {
    let mut summary = BTreeMap::new();

    let result = match &request.calculator {
        Calculator::Compare(input) => {
            let input = if request.clamp { input.clamped(assumptions) } else { input.clone() };
            let result = compare(&input, assumptions)?;
            summary.insert("winner", result.scenario(result.winner).kind.label().to_string());
            summary.insert("savings", format_usd(result.savings));
            summary.insert("cash_cost", format_usd(result.cash.total_cost));
            summary.insert("bank_cost", format_usd(result.bank.total_cost));
            summary.insert("bank_interest", format_usd(result.bank.total_interest));
            summary.insert("policy_interest", format_usd(result.policy.total_interest));
            summary.insert("policy_net_cost", format_usd(result.policy.display_net_cost()));
            CalculatorOutput::Compare(result)
        }
        Calculator::Amortize(input) => {
            let input = if request.clamp { input.clamped(assumptions) } else { input.clone() };
            let loan = AmortizedLoan::new(input.principal, input.annual_rate, input.term_years)?;
            let schedule = loan.project();
            summary.insert("rate", format_percent(loan.annual_rate));
            summary.insert("monthly_payment", format_usd(loan.monthly_payment()));
            summary.insert("total_interest", format_usd(schedule.total_interest));
            CalculatorOutput::Amortize {
                monthly_payment: loan.monthly_payment(),
                schedule,
            }
        }
        Calculator::Generations(input) => {
            let input = if request.clamp { input.clamped(assumptions) } else { input.clone() };
            let projection = project_generations(&input, assumptions)?;
            summary.insert("total_family_wealth", format_usd(projection.total_family_wealth));
            CalculatorOutput::Generations(projection)
        }
        Calculator::Estimate(input) => {
            let input = if request.clamp { input.clamped(assumptions) } else { input.clone() };
            let estimate = estimate_policy(&input, assumptions)?;
            summary.insert("face_amount", format_usd(estimate.face_amount));
            summary.insert("cash_value", format_usd(estimate.final_cash_value));
            summary.insert("loan_available", format_usd(estimate.final_loan_available));
            summary.insert("death_benefit", format_usd(estimate.final_death_benefit));
            CalculatorOutput::Estimate(estimate)
        }
        Calculator::InterestBleed(input) => {
            let bleed = project_interest_bleed(input)?;
            summary.insert("total_interest", format_usd(bleed.total_interest));
            summary.insert("monthly_payments", format_usd(bleed.total_monthly_payment));
            summary.insert("lost_growth", format_usd(bleed.lost_growth));
            CalculatorOutput::InterestBleed(bleed)
        }
    };

    Ok(CalculatorResponse {
        calculator: request.calculator.name(),
        summary,
        result,
    })
}
