//! Leaky-bucket regulated arrivals.

use super::multiplex;
use crate::envelope::{Arrival, Envelope};
use crate::error::{check_theta, require_non_negative, require_positive, Feasible, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bucket {
    sigma_single: f64,
    rho_single: f64,
    n: f64,
}

impl Bucket {
    fn new(process: &'static str, sigma_single: f64, rho_single: f64, n: u32) -> Result<Self> {
        Ok(Self {
            sigma_single: require_non_negative(process, "sigma_single", sigma_single)?,
            rho_single: require_positive(process, "rho_single", rho_single)?,
            n: multiplex(process, n)?,
        })
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(self.n * self.rho_single)
    }
}

/// Token bucket with a deterministic, θ-independent envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetermTokenBucket(Bucket);

impl DetermTokenBucket {
    pub fn new(sigma_single: f64, rho_single: f64, n: u32) -> Result<Self> {
        Bucket::new("DetermTokenBucket", sigma_single, rho_single, n).map(Self)
    }

    /// Aggregate burst `n · sigma_single`.
    pub fn burst(&self) -> f64 {
        self.0.n * self.0.sigma_single
    }
}

impl Envelope for DetermTokenBucket {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(self.burst())
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        self.0.rho(theta)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.0.n * self.0.rho_single
    }
}

impl Arrival for DetermTokenBucket {}

impl fmt::Display for DetermTokenBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TBconst_sigma={}_rho={}_n={}",
            self.0.sigma_single, self.0.rho_single, self.0.n
        )
    }
}

/// Leaky bucket with Massoulié's centred burst bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyBucketMassoulie(Bucket);

impl LeakyBucketMassoulie {
    pub fn new(sigma_single: f64, rho_single: f64, n: u32) -> Result<Self> {
        Bucket::new("LeakyBucketMassoulie", sigma_single, rho_single, n).map(Self)
    }
}

impl Envelope for LeakyBucketMassoulie {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        // ln(cosh(θσ)) / θ per flow
        let x = theta * self.0.sigma_single;
        Ok(self.0.n * (0.5 * (x.exp() + (-x).exp())).ln() / theta)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        self.0.rho(theta)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.0.n * self.0.rho_single
    }
}

impl Arrival for LeakyBucketMassoulie {}

impl fmt::Display for LeakyBucketMassoulie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MassOne_sigma={}_rho={}_n={}",
            self.0.sigma_single, self.0.rho_single, self.0.n
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bucket_is_theta_independent() {
        let tb = DetermTokenBucket::new(1.0, 1.5, 8).unwrap();
        for theta in [0.1, 1.0, 7.0] {
            assert_eq!(tb.sigma(theta).unwrap(), 8.0);
            assert_eq!(tb.rho(theta).unwrap(), 12.0);
        }
        assert_eq!(tb.average_rate(), 12.0);
    }

    #[test]
    fn test_massoulie_below_deterministic_burst() {
        let lb = LeakyBucketMassoulie::new(2.0, 3.0, 10).unwrap();
        let tb = DetermTokenBucket::new(2.0, 3.0, 10).unwrap();
        for theta in [0.1, 1.0, 5.0] {
            let s = lb.sigma(theta).unwrap();
            assert!(s >= 0.0);
            assert!(s <= tb.sigma(theta).unwrap());
        }
    }

    #[test]
    fn test_zero_burst_allowed() {
        let tb = DetermTokenBucket::new(0.0, 1.0, 1).unwrap();
        assert_eq!(tb.sigma(1.0).unwrap(), 0.0);
        assert!(DetermTokenBucket::new(-1.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(DetermTokenBucket::new(1.0, 0.0, 1).is_err());
        assert!(LeakyBucketMassoulie::new(1.0, 0.0, 1).is_err());
        assert!(LeakyBucketMassoulie::new(1.0, -2.0, 1).is_err());
    }
}
