//! Hölder exponents for splitting θ across dependent terms.
//!
//! For dependent processes `E[XY] <= E[X^p]^{1/p} E[Y^q]^{1/q}` with
//! `1/p + 1/q = 1`. The generalized form over `n` factors requires the
//! reciprocals of all exponents to sum to one.

use thiserror::Error;

/// Errors raised when a set of Hölder exponents is not admissible.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HolderError {
    #[error("Hölder exponent p = {p} must be finite and > 1")]
    InvalidExponent { p: f64 },

    #[error("sum of 1/p_i = {sum} must be < 1 to leave room for the last exponent")]
    ExhaustedBudget { sum: f64 },
}

/// Conjugate exponent `q = p / (p - 1)` so that `1/p + 1/q = 1`.
pub fn conjugate_exponent(p: f64) -> Result<f64, HolderError> {
    if !p.is_finite() || p <= 1.0 {
        return Err(HolderError::InvalidExponent { p });
    }
    Ok(p / (p - 1.0))
}

/// Exponent for the last factor of a generalized Hölder split.
///
/// Given `p_1, ..., p_{n-1}` returns `p_n = 1 / (1 - sum 1/p_i)`.
/// An empty list yields 1.0 (no split).
pub fn last_exponent(p_list: &[f64]) -> Result<f64, HolderError> {
    let mut sum = 0.0;
    for &p in p_list {
        if !p.is_finite() || p <= 1.0 {
            return Err(HolderError::InvalidExponent { p });
        }
        sum += 1.0 / p;
    }
    if sum >= 1.0 {
        return Err(HolderError::ExhaustedBudget { sum });
    }
    Ok(1.0 / (1.0 - sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjugate_of_two_is_two() {
        assert_eq!(conjugate_exponent(2.0).unwrap(), 2.0);
    }

    #[test]
    fn conjugate_satisfies_identity() {
        for p in [1.1, 1.5, 3.0, 10.0] {
            let q = conjugate_exponent(p).unwrap();
            assert!((1.0 / p + 1.0 / q - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn conjugate_rejects_p_at_most_one() {
        assert!(matches!(
            conjugate_exponent(1.0),
            Err(HolderError::InvalidExponent { .. })
        ));
        assert!(conjugate_exponent(0.5).is_err());
        assert!(conjugate_exponent(f64::NAN).is_err());
        assert!(conjugate_exponent(f64::INFINITY).is_err());
    }

    #[test]
    fn last_exponent_of_single_matches_conjugate() {
        let p = 3.0;
        let pn = last_exponent(&[p]).unwrap();
        assert!((pn - conjugate_exponent(p).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn last_exponent_closes_the_sum() {
        let list = [3.0, 4.0, 5.0];
        let pn = last_exponent(&list).unwrap();
        let total: f64 = list.iter().map(|p| 1.0 / p).sum::<f64>() + 1.0 / pn;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn last_exponent_empty_is_one() {
        assert_eq!(last_exponent(&[]).unwrap(), 1.0);
    }

    #[test]
    fn last_exponent_rejects_exhausted_budget() {
        assert!(matches!(
            last_exponent(&[2.0, 2.0]),
            Err(HolderError::ExhaustedBudget { .. })
        ));
    }
}
