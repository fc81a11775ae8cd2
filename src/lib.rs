//! Family Bank - projection engine behind the Infinite Banking calculators
//!
//! This library provides:
//! - Amortized bank loan schedules (with straight-line repayment at a zero rate)
//! - Policy loan projections where the collateral keeps compounding
//! - Opportunity cost of paying cash
//! - Financing comparison (cash vs bank loan vs policy loan)
//! - Whole-life cash value, policy estimates and multi-generational wealth
//! - Household interest bleed across several debts
//!
//! Every projector is a pure function of its inputs and the loaded
//! `Assumptions`, so repeated calls give identical output.

pub mod error;
pub mod format;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod request;

// Re-export commonly used types
pub use error::{ProjectionError, ProjectionResult};
pub use assumptions::{Assumptions, SliderRanges};
pub use projection::{ScenarioKind, ScenarioResult, YearRecord};
pub use scenario::{compare, ComparisonInput, ComparisonResult, ScenarioRunner};
pub use request::{evaluate, Calculator, CalculatorRequest, CalculatorResponse};
pub use format::{format_percent, format_usd};
