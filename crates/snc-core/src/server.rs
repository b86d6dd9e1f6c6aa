//! Leaf service processes.

use crate::envelope::{Envelope, Server};
use crate::error::{check_theta, require_positive, Feasible, Result};
use std::fmt;

/// Work-conserving server with a deterministic rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRateServer {
    rate: f64,
}

impl ConstantRateServer {
    pub fn new(rate: f64) -> Result<Self> {
        Ok(Self {
            rate: require_positive("ConstantRateServer", "rate", rate)?,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Envelope for ConstantRateServer {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(self.rate)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.rate
    }
}

impl Server for ConstantRateServer {
    fn constant_rate(&self) -> Option<f64> {
        Some(self.rate)
    }
}

impl fmt::Display for ConstantRateServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CR_rate={}", self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_rate() {
        let cr = ConstantRateServer::new(4.0).unwrap();
        assert_eq!(cr.sigma(2.0).unwrap(), 0.0);
        assert_eq!(cr.rho(2.0).unwrap(), 4.0);
        assert_eq!(cr.constant_rate(), Some(4.0));
        assert!(cr.rho(0.0).is_err());
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(ConstantRateServer::new(-0.5).is_err());
        assert!(ConstantRateServer::new(0.0).is_err());
        assert!(ConstantRateServer::new(f64::NAN).is_err());
        assert!(ConstantRateServer::new(1e-9).is_ok());
    }
}
