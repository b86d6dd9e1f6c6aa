//! Classic queueing-theory arrivals: i.i.d. increments and Poisson-driven
//! continuous-time processes.

use super::multiplex;
use crate::envelope::{Arrival, Envelope};
use crate::error::{check_theta, require_positive, Feasible, ParameterOutOfBounds, Result};
use std::fmt;

/// Exponentially distributed increments per slot (D/M/1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DM1 {
    lamb: f64,
    n: f64,
}

impl DM1 {
    pub fn new(lamb: f64, n: u32) -> Result<Self> {
        Ok(Self {
            lamb: require_positive("DM1", "lamb", lamb)?,
            n: multiplex("DM1", n)?,
        })
    }

    pub fn lamb(&self) -> f64 {
        self.lamb
    }
}

impl Envelope for DM1 {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        if theta >= self.lamb {
            return Err(ParameterOutOfBounds::ThetaAboveLimit {
                theta,
                limit: self.lamb,
            });
        }
        Ok((self.n / theta) * (self.lamb / (self.lamb - theta)).ln())
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.n / self.lamb
    }
}

impl Arrival for DM1 {}

impl fmt::Display for DM1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D/M/1_lambda={}_n={}", self.lamb, self.n)
    }
}

/// Poisson arrivals of deterministic size `1/mu` in continuous time (M/D/1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MD1 {
    lamb: f64,
    mu: f64,
    n: f64,
}

impl MD1 {
    pub fn new(lamb: f64, mu: f64, n: u32) -> Result<Self> {
        Ok(Self {
            lamb: require_positive("MD1", "lamb", lamb)?,
            mu: require_positive("MD1", "mu", mu)?,
            n: multiplex("MD1", n)?,
        })
    }
}

impl Envelope for MD1 {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok((self.n / theta) * self.lamb * (theta / self.mu).exp_m1())
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn average_rate(&self) -> f64 {
        self.n * self.lamb / self.mu
    }
}

impl Arrival for MD1 {}

impl fmt::Display for MD1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M/D/1_lambda={}_mu={}_n={}", self.lamb, self.mu, self.n)
    }
}

/// Poisson arrivals of exponential size in continuous time (M/M/1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MM1 {
    lamb: f64,
    mu: f64,
    n: f64,
}

impl MM1 {
    pub fn new(lamb: f64, mu: f64, n: u32) -> Result<Self> {
        Ok(Self {
            lamb: require_positive("MM1", "lamb", lamb)?,
            mu: require_positive("MM1", "mu", mu)?,
            n: multiplex("MM1", n)?,
        })
    }
}

impl Envelope for MM1 {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        if theta >= self.mu {
            return Err(ParameterOutOfBounds::ThetaAboveLimit {
                theta,
                limit: self.mu,
            });
        }
        Ok(self.n * self.lamb / (self.mu - theta))
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn average_rate(&self) -> f64 {
        self.n * self.lamb / self.mu
    }
}

impl Arrival for MM1 {}

impl fmt::Display for MM1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M/M/1_lambda={}_mu={}_n={}", self.lamb, self.mu, self.n)
    }
}

/// Poisson-distributed increments per slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DPoisson1 {
    lamb: f64,
    n: f64,
}

impl DPoisson1 {
    pub fn new(lamb: f64, n: u32) -> Result<Self> {
        Ok(Self {
            lamb: require_positive("DPoisson1", "lamb", lamb)?,
            n: multiplex("DPoisson1", n)?,
        })
    }
}

impl Envelope for DPoisson1 {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok((self.n / theta) * self.lamb * theta.exp_m1())
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.n * self.lamb
    }
}

impl Arrival for DPoisson1 {}

impl fmt::Display for DPoisson1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poisson_lambda={}_n={}", self.lamb, self.n)
    }
}
