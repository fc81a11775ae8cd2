//! Year-by-year projectors for loans, cash purchases and whole-life policies

mod records;
mod amortization;
mod policy_loan;
mod opportunity_cost;
mod cash_value;
mod generational;
mod estimator;
mod interest_bleed;

pub use records::{YearRecord, ScenarioKind, ScenarioResult};
pub use amortization::{AmortizedLoan, monthly_payment};
pub use policy_loan::PolicyLoan;
pub use opportunity_cost::CashPurchase;
pub use cash_value::{CashValueSchedule, PremiumPolicy, face_multiple};
pub use generational::{
    GenerationalInput, GenerationRecord, GenerationalProjection, project_generations, MAX_GENERATIONS,
};
pub use estimator::{EstimatorInput, HealthRating, PolicyEstimate, PolicyFocus, estimate_policy};
pub use interest_bleed::{DebtInput, DebtSummary, InterestBleed, InterestBleedInput, project_interest_bleed};
