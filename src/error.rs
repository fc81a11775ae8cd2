//! Error types for projection and assumption loading

use thiserror::Error;

/// Errors raised by the projectors and the assumption loader
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("unknown assumption key: {0}")]
    UnknownAssumption(String),

    #[error("malformed assumption value for {key}: {value}")]
    MalformedAssumption { key: String, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProjectionResult<T> = Result<T, ProjectionError>;

impl ProjectionError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Longest horizon any projector accepts
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Oldest issue age any projector accepts
pub const MAX_AGE: u32 = 120;

/// Highest annual rate accepted (1000%)
pub const MAX_ANNUAL_RATE: f64 = 10.0;

/// Largest principal or premium accepted
pub const MAX_AMOUNT: f64 = 1e12;

/// Largest ratio or multiplier accepted from assumptions
pub const MAX_FACTOR: f64 = 10.0;

fn check_bounded(field: &str, value: f64, max: f64) -> ProjectionResult<f64> {
    if !value.is_finite() {
        return Err(ProjectionError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ProjectionError::invalid(field, "must not be negative"));
    }
    if value > max {
        return Err(ProjectionError::invalid(field, format!("must not exceed {}", max)));
    }
    Ok(value)
}

/// Reject NaN, infinities, negative and absurdly large amounts
pub(crate) fn check_amount(field: &str, value: f64) -> ProjectionResult<f64> {
    check_bounded(field, value, MAX_AMOUNT)
}

/// Same as `check_amount` but zero is rejected too
pub(crate) fn check_positive(field: &str, value: f64) -> ProjectionResult<f64> {
    check_amount(field, value)?;
    if value == 0.0 {
        return Err(ProjectionError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

/// Annual rate as a decimal, 0 to `MAX_ANNUAL_RATE`
pub(crate) fn check_rate(field: &str, value: f64) -> ProjectionResult<f64> {
    check_bounded(field, value, MAX_ANNUAL_RATE)
}

/// Ratio or multiplier, 0 to `MAX_FACTOR`
pub(crate) fn check_factor(field: &str, value: f64) -> ProjectionResult<f64> {
    check_bounded(field, value, MAX_FACTOR)
}

pub(crate) fn check_years(field: &str, years: u32) -> ProjectionResult<u32> {
    if years == 0 || years > MAX_HORIZON_YEARS {
        return Err(ProjectionError::invalid(
            field,
            format!("must be between 1 and {} years", MAX_HORIZON_YEARS),
        ));
    }
    Ok(years)
}

pub(crate) fn check_age(field: &str, age: u32) -> ProjectionResult<u32> {
    if age > MAX_AGE {
        return Err(ProjectionError::invalid(
            field,
            format!("must be between 0 and {}", MAX_AGE),
        ));
    }
    Ok(age)
}
