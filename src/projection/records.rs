//! Output structures shared by every projector

use serde::{Deserialize, Serialize};

/// One row of projection output for a single year
///
/// Not every projector fills every column; unused columns stay at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    // Timing
    pub year: u32,
    pub age: Option<u32>,

    // Money paid in
    pub cumulative_paid: f64,
    pub interest_paid: f64,
    pub cumulative_interest: f64,
    pub principal_paid: f64,
    pub balance: f64,

    // Policy values
    pub cash_value: f64,
    pub loan_available: f64,
    pub death_benefit: f64,

    /// Cumulative compound growth (foregone growth for a cash purchase,
    /// side-pool growth for a policy loan)
    pub growth: f64,

    /// Running true cost; signed for the policy loan track
    pub cost: f64,
}

impl YearRecord {
    /// Create a new year record with default values
    pub fn new(year: u32) -> Self {
        Self {
            year,
            age: None,
            cumulative_paid: 0.0,
            interest_paid: 0.0,
            cumulative_interest: 0.0,
            principal_paid: 0.0,
            balance: 0.0,
            cash_value: 0.0,
            loan_available: 0.0,
            death_benefit: 0.0,
            growth: 0.0,
            cost: 0.0,
        }
    }
}

/// Financing option being projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Pay cash and forgo investment growth
    Cash,
    /// Amortized bank loan
    Bank,
    /// Loan against whole-life cash value
    Policy,
}

impl ScenarioKind {
    /// Fixed precedence used to break ties between equal costs
    pub const PRECEDENCE: [ScenarioKind; 3] =
        [ScenarioKind::Cash, ScenarioKind::Bank, ScenarioKind::Policy];

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Cash => "Pay Cash",
            ScenarioKind::Bank => "Bank Loan",
            ScenarioKind::Policy => "Policy Loan",
        }
    }
}

/// Complete projection of one financing option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub kind: ScenarioKind,

    /// Amount financed or spent
    pub principal: f64,

    /// Yearly rows, `series[i].year == i + 1`
    pub series: Vec<YearRecord>,

    /// Principal plus every cost of the option at the final year (signed)
    pub total_cost: f64,

    /// Interest paid over the horizon
    pub total_interest: f64,
}

impl ScenarioResult {
    pub fn new(kind: ScenarioKind, principal: f64) -> Self {
        Self {
            kind,
            principal,
            series: Vec::new(),
            total_cost: principal,
            total_interest: 0.0,
        }
    }

    /// Add a year row
    pub fn add_row(&mut self, row: YearRecord) {
        self.series.push(row);
    }

    /// Cost above the principal itself; negative means the borrower is ahead
    pub fn net_cost(&self) -> f64 {
        self.total_cost - self.principal
    }

    /// Net cost floored at zero for display
    pub fn display_net_cost(&self) -> f64 {
        self.net_cost().max(0.0)
    }

    pub fn final_row(&self) -> Option<&YearRecord> {
        self.series.last()
    }
}
