//! Multiplexing of several arrivals into one.

use super::Dependence;
use crate::envelope::{Arrival, ArrivalRef, Envelope};
use crate::error::{check_rho, Feasible, NcError, Result};
use snc_math::last_exponent;

/// Sum of two arrivals.
#[derive(Debug, Clone)]
pub struct AggregateTwo {
    arr1: ArrivalRef,
    arr2: ArrivalRef,
    dependence: Dependence,
}

impl AggregateTwo {
    pub fn new(arr1: ArrivalRef, arr2: ArrivalRef, dependence: Dependence) -> Self {
        Self {
            arr1,
            arr2,
            dependence,
        }
    }
}

impl Envelope for AggregateTwo {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        Ok(self.arr1.sigma(self.dependence.p() * theta)?
            + self.arr2.sigma(self.dependence.q() * theta)?)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        let rho_1 = check_rho(self.arr1.rho(self.dependence.p() * theta)?)?;
        let rho_2 = check_rho(self.arr2.rho(self.dependence.q() * theta)?)?;
        Ok(rho_1 + rho_2)
    }

    fn is_discrete(&self) -> bool {
        self.arr1.is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.arr1.average_rate() + self.arr2.average_rate()
    }
}

impl Arrival for AggregateTwo {}

/// Sum of an arbitrary number of arrivals.
///
/// Dependent aggregation takes `n - 1` Hölder exponents; the last one is
/// derived so the reciprocals sum to one.
#[derive(Debug, Clone)]
pub struct AggregateList {
    arr_list: Vec<ArrivalRef>,
    /// One θ multiplier per arrival.
    exponents: Vec<f64>,
}

impl AggregateList {
    /// Independent aggregation.
    pub fn new(arr_list: Vec<ArrivalRef>) -> Result<Self> {
        if arr_list.is_empty() {
            return Err(NcError::EmptyAggregate);
        }
        let exponents = vec![1.0; arr_list.len()];
        Ok(Self {
            arr_list,
            exponents,
        })
    }

    /// Dependent aggregation with exponents `p_1, ..., p_{n-1}`.
    pub fn dependent(arr_list: Vec<ArrivalRef>, p_list: Vec<f64>) -> Result<Self> {
        if arr_list.is_empty() {
            return Err(NcError::EmptyAggregate);
        }
        if p_list.len() + 1 != arr_list.len() {
            return Err(NcError::HolderCount {
                arrivals: arr_list.len(),
                expected: arr_list.len() - 1,
                actual: p_list.len(),
            });
        }
        let p_n = last_exponent(&p_list)?;
        let mut exponents = p_list;
        exponents.push(p_n);
        Ok(Self {
            arr_list,
            exponents,
        })
    }

    pub fn len(&self) -> usize {
        self.arr_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arr_list.is_empty()
    }

    fn scaled(&self) -> impl Iterator<Item = (&ArrivalRef, f64)> {
        self.arr_list.iter().zip(self.exponents.iter().copied())
    }
}

impl Envelope for AggregateList {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        let mut res = 0.0;
        for (arr, p) in self.scaled() {
            res += arr.sigma(p * theta)?;
        }
        Ok(res)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        let mut res = 0.0;
        for (arr, p) in self.scaled() {
            res += check_rho(arr.rho(p * theta)?)?;
        }
        Ok(res)
    }

    fn is_discrete(&self) -> bool {
        self.arr_list[0].is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.arr_list.iter().map(|a| a.average_rate()).sum()
    }
}

impl Arrival for AggregateList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{DetermTokenBucket, DM1};
    use std::sync::Arc;

    fn dm1(lamb: f64) -> ArrivalRef {
        Arc::new(DM1::new(lamb, 1).unwrap())
    }

    #[test]
    fn test_two_identical_arrivals_double() {
        let arr = Arc::new(DetermTokenBucket::new(1.0, 1.5, 8).unwrap());
        let agg = AggregateTwo::new(arr.clone(), arr.clone(), Dependence::Independent);
        assert_eq!(agg.sigma(1.0).unwrap(), 2.0 * arr.sigma(1.0).unwrap());
        assert_eq!(agg.rho(1.0).unwrap(), 2.0 * arr.rho(1.0).unwrap());
        assert_eq!(agg.average_rate(), 24.0);
    }

    #[test]
    fn test_list_matches_two() {
        let a = dm1(2.0);
        let b = dm1(3.0);
        let two = AggregateTwo::new(a.clone(), b.clone(), Dependence::Independent);
        let list = AggregateList::new(vec![a, b]).unwrap();
        for theta in [0.2, 1.0, 1.9] {
            assert_eq!(two.rho(theta).unwrap(), list.rho(theta).unwrap());
            assert_eq!(two.sigma(theta).unwrap(), list.sigma(theta).unwrap());
        }
    }

    #[test]
    fn test_dependent_list_uses_last_exponent() {
        let a = dm1(10.0);
        let b = dm1(10.0);
        let list = AggregateList::dependent(vec![a.clone(), b.clone()], vec![2.0]).unwrap();
        // p_n = 1 / (1 - 1/2) = 2
        let theta = 1.0;
        let expected = a.rho(2.0).unwrap() + b.rho(2.0).unwrap();
        assert!((list.rho(theta).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dependent_list_validates_counts() {
        let err = AggregateList::dependent(vec![dm1(1.0), dm1(1.0)], vec![]).unwrap_err();
        assert!(matches!(err, NcError::HolderCount { expected: 1, actual: 0, .. }));
        let err = AggregateList::dependent(vec![dm1(1.0), dm1(1.0), dm1(1.0)], vec![2.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, NcError::Holder(_)));
        assert!(matches!(
            AggregateList::new(vec![]),
            Err(NcError::EmptyAggregate)
        ));
    }

    #[test]
    fn test_out_of_domain_child_fails_whole_sum() {
        let list = AggregateList::new(vec![dm1(5.0), dm1(0.5)]).unwrap();
        assert!(list.rho(1.0).is_err());
        assert!(list.rho(0.4).is_ok());
    }
}
