//! Final-step rounding of reported figures
//!
//! Calculators carry full f64 precision internally and only round when a
//! figure leaves the engine.

use crate::error::CalcError;

/// Months in a year, used by every monthly schedule
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest term, age or horizon in years any calculator accepts
pub const MAX_HORIZON_YEARS: u32 = 200;

/// Round to 2 decimals, half away from zero
pub fn round_currency(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to `places` decimals, half away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Avoid reporting -0.00
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a figure for output, failing if it is not finite
pub(crate) fn finish(context: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(round_currency(value))
    } else {
        Err(CalcError::DivisionDegenerate { context })
    }
}
