//! Numerically stable primitives for log-MGF bound arithmetic.
//!
//! Every closed-form bound in the engine contains a geometric-series factor
//! of the form `1 / (1 - e^{-x})` with `x > 0`. For small `x` the naive
//! expression cancels catastrophically, for large `x` it underflows to 1.
//! The helpers here keep those factors accurate across the whole range.

use std::f64::consts::LN_2;

/// Absolute tolerance used when deciding whether two rates coincide.
pub const EQUALITY_TOLERANCE: f64 = 1e-6;

/// Tolerance-based float equality: `|a - b| < EQUALITY_TOLERANCE`.
///
/// NaN is never equal to anything, infinities are equal only to
/// themselves.
pub fn is_equal(a: f64, b: f64) -> bool {
    is_equal_within(a, b, EQUALITY_TOLERANCE)
}

/// Float equality with an explicit absolute tolerance.
pub fn is_equal_within(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() < tol
}

/// Stable `ln(1 - e^x)` for `x <= 0`.
///
/// Returns NEG_INFINITY at `x == 0` and NaN for `x > 0` or NaN input.
/// Switches between `ln(-expm1(x))` and `ln_1p(-e^x)` at `-ln 2`
/// (Mächler's rule).
pub fn log1m_exp(x: f64) -> f64 {
    if x.is_nan() || x > 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    if x > -LN_2 {
        (-x.exp_m1()).ln()
    } else {
        (-x.exp()).ln_1p()
    }
}

/// `-ln(1 - e^{-x}) / theta`, the geometric-series correction term.
///
/// This is the burst penalty that appears when two envelopes with rate gap
/// `x / theta` are combined. Requires `x > 0` and `theta > 0`; returns
/// +INFINITY at `x == 0` and NaN outside the domain.
pub fn geometric_correction(x: f64, theta: f64) -> f64 {
    if theta.is_nan() || theta <= 0.0 {
        return f64::NAN;
    }
    -log1m_exp(-x) / theta
}
