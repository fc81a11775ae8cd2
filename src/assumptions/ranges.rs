//! Interactive input ranges for each calculator slider

use serde::{Deserialize, Serialize};

/// Inclusive bounds for one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Bound a value into [min, max]
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider ranges used by the calculator pages
///
/// Rates are decimals (0.079 = 7.9%). The projectors themselves accept any
/// non-negative input; these ranges only apply when a request asks to be
/// clamped the way the sliders would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderRanges {
    pub bank_rate: Bounds<f64>,
    pub policy_rate: Bounds<f64>,
    pub savings_rate: Bounds<f64>,
    pub principal: Bounds<f64>,
    pub premium: Bounds<f64>,
    pub term_years: Bounds<u32>,
    pub horizon_years: Bounds<u32>,
    pub age: Bounds<u32>,
    pub generations: Bounds<u32>,
}

impl Default for SliderRanges {
    fn default() -> Self {
        Self {
            bank_rate: Bounds::new(0.05, 0.15),
            policy_rate: Bounds::new(0.04, 0.08),
            savings_rate: Bounds::new(0.03, 0.12),
            principal: Bounds::new(1_000.0, 1_000_000.0),
            premium: Bounds::new(1_200.0, 500_000.0),
            term_years: Bounds::new(1, 30),
            horizon_years: Bounds::new(1, 40),
            age: Bounds::new(18, 85),
            generations: Bounds::new(1, 4),
        }
    }
}

/// Clamp a value and log when the slider would have moved it
pub(crate) fn clamp_logged<T>(field: &str, bounds: &Bounds<T>, value: T) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let clamped = bounds.clamp(value);
    if !bounds.contains(value) {
        log::warn!(
            "{} = {} outside [{}, {}], clamped to {}",
            field, value, bounds.min, bounds.max, clamped
        );
    }
    clamped
}
