//! Property-based tests for snc-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use proptest::prelude::*;
use snc_math::{conjugate_exponent, geometric_correction, is_equal, last_exponent, log1m_exp};

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// log1m_exp properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// exp(log1m_exp(x)) + exp(x) == 1 wherever both terms are representable.
    #[test]
    fn log1m_exp_complements_exp(x in -30.0..-1e-6f64) {
        let out = log1m_exp(x);
        prop_assert!(out.is_finite());
        prop_assert!(approx_eq(out.exp() + x.exp(), 1.0, 1e-12), "x = {}", x);
    }

    /// log1m_exp is increasing in |x|: the further from 0, the closer to 0.
    #[test]
    fn log1m_exp_monotone(a in -30.0..-1e-6f64, gap in 1e-3..5.0f64) {
        let near = log1m_exp(a);
        let far = log1m_exp(a - gap);
        prop_assert!(far >= near, "log1m_exp({}) = {} < log1m_exp({}) = {}", a - gap, far, a, near);
    }

    /// log1m_exp is always non-positive on its domain.
    #[test]
    fn log1m_exp_non_positive(x in -700.0..-1e-9f64) {
        prop_assert!(log1m_exp(x) <= 0.0);
    }
}

// ============================================================================
// geometric_correction properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The correction term is strictly positive for a positive gap.
    #[test]
    fn correction_positive(x in 1e-6..50.0f64, theta in 1e-3..10.0f64) {
        let c = geometric_correction(x, theta);
        prop_assert!(c > 0.0 && c.is_finite(), "c({}, {}) = {}", x, theta, c);
    }

    /// Scaling theta divides the correction.
    #[test]
    fn correction_scales_with_theta(x in 1e-3..20.0f64, theta in 0.1..10.0f64) {
        let one = geometric_correction(x, 1.0);
        let scaled = geometric_correction(x, theta);
        prop_assert!(approx_eq(scaled * theta, one, TOL));
    }
}

// ============================================================================
// Hölder exponent properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// 1/p + 1/q == 1.
    #[test]
    fn conjugate_identity(p in 1.0001..1000.0f64) {
        let q = conjugate_exponent(p).unwrap();
        prop_assert!(approx_eq(1.0 / p + 1.0 / q, 1.0, TOL));
        prop_assert!(q > 1.0);
    }

    /// Conjugation is an involution.
    #[test]
    fn conjugate_involution(p in 1.001..100.0f64) {
        let q = conjugate_exponent(p).unwrap();
        let back = conjugate_exponent(q).unwrap();
        prop_assert!(approx_eq(back, p, 1e-8));
    }

    /// The generalized exponent closes the reciprocal sum.
    #[test]
    fn last_exponent_identity(list in prop::collection::vec(3.0..50.0f64, 0..3)) {
        let pn = last_exponent(&list).unwrap();
        let total: f64 = list.iter().map(|p| 1.0 / p).sum::<f64>() + 1.0 / pn;
        prop_assert!(approx_eq(total, 1.0, TOL));
    }

    /// is_equal is symmetric.
    #[test]
    fn is_equal_symmetric(a in -1e3..1e3f64, b in -1e3..1e3f64) {
        prop_assert_eq!(is_equal(a, b), is_equal(b, a));
    }
}
