//! Fixed-precision decimal formatting for human-readable display.
//!
//! Prices render at a fixed 8 decimal places with half-up rounding (ties move
//! away from zero). Input that is not a finite number renders as the canonical
//! zero at that precision instead of failing.

use crate::shared::serde_util::decimal_lenient;
use rust_decimal::prelude::*;

/// Display precision for prices and calculation results.
pub const DISPLAY_DECIMALS: u32 = 8;

/// Canonical rendering of a non-numeric value.
pub const ZERO_FIXED: &str = "0.00000000";

const MAX_SCALE: u32 = 28;

/// Format a `Decimal` at [`DISPLAY_DECIMALS`] places.
pub fn fixed(value: &Decimal) -> String {
    fixed_dp(value, DISPLAY_DECIMALS)
}

/// Format a `Decimal` at `dp` places, rounding half-up and padding with zeros.
pub fn fixed_dp(value: &Decimal, dp: u32) -> String {
    let dp = dp.min(MAX_SCALE);
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(dp);
    rounded.to_string()
}

/// Format a decimal string. Unparseable input renders as [`ZERO_FIXED`].
pub fn fixed_str(value: &str) -> String {
    match decimal_lenient::parse(value) {
        Some(d) => fixed(&d),
        None => ZERO_FIXED.to_string(),
    }
}

/// Format an `f64`. NaN, infinities and out-of-range values render as [`ZERO_FIXED`].
pub fn fixed_f64(value: f64) -> String {
    if !value.is_finite() {
        return ZERO_FIXED.to_string();
    }
    match Decimal::from_f64(value) {
        Some(d) => fixed(&d),
        None => ZERO_FIXED.to_string(),
    }
}
