//! Numeric guards shared across the computation core
//!
//! The engine is a total function: every validly-shaped input must produce a
//! finite, non-negative result. These helpers centralize the guards so the
//! call sites stay readable.

/// Replace non-finite values (NaN, +/-Inf) with 0.0
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Non-negative, finite monthly amount
pub fn amount(v: f64) -> f64 {
    finite_or_zero(v).max(0.0)
}

/// Round to integer CHF. Only applied to final monthly figures; annual
/// intermediates stay as real numbers to avoid compounding rounding error.
pub fn round_chf(v: f64) -> f64 {
    finite_or_zero(v).round().max(0.0)
}

/// Clamp a percentage into [0, ceiling], silently
pub fn clamp_pct(pct: f64, ceiling: f64) -> f64 {
    let p = finite_or_zero(pct);
    if p < 0.0 {
        log::warn!("percentage {} below 0, clamped", pct);
        0.0
    } else if p > ceiling {
        log::warn!("percentage {} above ceiling {}, clamped", pct, ceiling);
        ceiling
    } else {
        p
    }
}

/// Safe ratio: returns 0.0 when the denominator is 0 or the result is
/// non-finite, never NaN/Infinity
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        finite_or_zero(num / den)
    }
}
