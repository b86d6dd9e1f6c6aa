//! Independence flag and Hölder exponents of a binary operator.

use crate::error::Result;
use snc_math::conjugate_exponent;

/// How two children of an operator relate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dependence {
    /// Independent children: `p = q = 1`.
    #[default]
    Independent,
    /// Dependent children split by Hölder's inequality.
    Holder { p: f64, q: f64 },
}

impl Dependence {
    pub fn independent() -> Self {
        Dependence::Independent
    }

    /// Dependent children with exponent `p > 1`; `q` is its conjugate.
    pub fn holder(p: f64) -> Result<Self> {
        let q = conjugate_exponent(p)?;
        Ok(Dependence::Holder { p, q })
    }

    /// Mirror of the `(indep, p)` flag pair: `p` is ignored when `indep`.
    pub fn new(indep: bool, p: f64) -> Result<Self> {
        if indep {
            Ok(Dependence::Independent)
        } else {
            Dependence::holder(p)
        }
    }

    pub fn is_independent(&self) -> bool {
        matches!(self, Dependence::Independent)
    }

    pub fn p(&self) -> f64 {
        match self {
            Dependence::Independent => 1.0,
            Dependence::Holder { p, .. } => *p,
        }
    }

    pub fn q(&self) -> f64 {
        match self {
            Dependence::Independent => 1.0,
            Dependence::Holder { q, .. } => *q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NcError;

    #[test]
    fn test_independent_ignores_p() {
        let dep = Dependence::new(true, 7.0).unwrap();
        assert_eq!(dep, Dependence::Independent);
        assert_eq!((dep.p(), dep.q()), (1.0, 1.0));
    }

    #[test]
    fn test_holder_conjugate() {
        let dep = Dependence::new(false, 3.0).unwrap();
        assert_eq!(dep.p(), 3.0);
        assert!((dep.q() - 1.5).abs() < 1e-12);
        assert!(!dep.is_independent());
    }

    #[test]
    fn test_holder_rejects_p_at_one() {
        let err = Dependence::holder(1.0).unwrap_err();
        assert!(matches!(err, NcError::Holder(_)));
    }
}
