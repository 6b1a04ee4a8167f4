//! Division, rounding and assertion helpers shared by every calculator.
//!
//! Inputs arrive as `Decimal`. Compounding and iterative math is done in `f64`
//! and only converted back to `Decimal` through [`round`], so every reported
//! figure has a fixed precision.

use crate::error::ValidationError;
use rust_decimal::prelude::*;

/// Decimal places for currency amounts.
pub const CURRENCY_DP: u32 = 2;
/// Decimal places for percentages and ratios.
pub const PERCENT_DP: u32 = 2;
/// Decimal places for unit counts.
pub const UNITS_DP: u32 = 0;
/// Decimal places for fractional month counts.
pub const MONTHS_DP: u32 = 1;

/// Divides `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or not finite, or when the quotient itself is not finite.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return fallback;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() { quotient } else { fallback }
}

/// Rounds half away from zero to `decimals` places.
///
/// NaN maps to zero and values outside the `Decimal` range saturate.
pub fn round(value: f64, decimals: u32) -> Decimal {
    if value.is_nan() {
        return Decimal::ZERO;
    }
    let decimal = Decimal::from_f64(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    let mut rounded = decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // Pad to the requested scale so `25` renders as `25.00`.
    rounded.rescale(decimals);
    rounded
}

pub fn round_opt(value: Option<f64>, decimals: u32) -> Option<Decimal> {
    value.map(|v| round(v, decimals))
}

/// Lossless enough for every input range the calculators accept.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub fn assert_positive(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::invalid_input(
            field,
            format!("must be greater than 0 (got {value})"),
        ));
    }
    Ok(())
}

pub fn assert_non_negative(value: Decimal, field: &str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::invalid_input(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}

/// Inclusive on both ends.
pub fn assert_range(
    value: Decimal,
    min: Decimal,
    max: Decimal,
    field: &str,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::invalid_input(
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}

/// Exclusive upper bound.
pub fn assert_below(value: Decimal, max: Decimal, field: &str) -> Result<(), ValidationError> {
    if value >= max {
        return Err(ValidationError::invalid_input(
            field,
            format!("must be less than {max} (got {value})"),
        ));
    }
    Ok(())
}

/// Integer counts (months, customers).
pub fn assert_count_range(value: u32, min: u32, max: u32, field: &str) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::invalid_input(
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}
