//! Compound growth factors that stay accurate for tiny rates

/// `(1 + rate)^periods − 1`, computed without cancellation.
///
/// For a rate far below machine epsilon `1.0 + rate` rounds to `1.0`, so the
/// naive form returns exactly 0 and every annuity divided by it collapses.
pub fn growth_minus_one(periodic_rate: f64, periods: f64) -> f64 {
    (periods * periodic_rate.ln_1p()).exp_m1()
}

/// Future value of 1 paid at the end of each period (ordinary annuity).
///
/// Returns `periods` when the growth is indistinguishable from zero.
pub fn annuity_factor(periodic_rate: f64, periods: f64) -> f64 {
    let growth = growth_minus_one(periodic_rate, periods);
    if periodic_rate == 0.0 || growth == 0.0 {
        return periods;
    }
    growth / periodic_rate
}
