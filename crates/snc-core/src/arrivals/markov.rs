//! Markov-modulated on-off sources.

use super::multiplex;
use crate::envelope::{Arrival, Envelope};
use crate::error::{
    check_theta, require_open_unit, require_positive, Feasible, ParameterOutOfBounds, Result,
};
use std::fmt;

/// Continuous-time on-off fluid source.
///
/// `mu` is the off-to-on transition rate, `lamb` the on-to-off rate; the
/// source emits at `peak_rate` while on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MMOOFluid {
    mu: f64,
    lamb: f64,
    peak_rate: f64,
    n: f64,
}

impl MMOOFluid {
    pub fn new(mu: f64, lamb: f64, peak_rate: f64, n: u32) -> Result<Self> {
        Ok(Self {
            mu: require_positive("MMOOFluid", "mu", mu)?,
            lamb: require_positive("MMOOFluid", "lamb", lamb)?,
            peak_rate: require_positive("MMOOFluid", "peak_rate", peak_rate)?,
            n: multiplex("MMOOFluid", n)?,
        })
    }
}

impl Envelope for MMOOFluid {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        // Largest eigenvalue of Q + θ·diag(0, peak)
        let bb = theta * self.peak_rate - self.mu - self.lamb;
        let root = (bb * bb + 4.0 * self.mu * theta * self.peak_rate).sqrt();
        Ok(0.5 * self.n * (bb + root) / theta)
    }

    fn is_discrete(&self) -> bool {
        false
    }

    fn average_rate(&self) -> f64 {
        let on_probability = self.mu / (self.lamb + self.mu);
        self.n * on_probability * self.peak_rate
    }
}

impl Arrival for MMOOFluid {}

impl fmt::Display for MMOOFluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MMOOFluid_mu={}_lamb={}_peak_rate={}_n={}",
            self.mu, self.lamb, self.peak_rate, self.n
        )
    }
}

/// Discrete-time on-off source with per-slot stay probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MMOODisc {
    stay_on: f64,
    stay_off: f64,
    peak_rate: f64,
    n: f64,
}

impl MMOODisc {
    pub fn new(stay_on: f64, stay_off: f64, peak_rate: f64, n: u32) -> Result<Self> {
        Ok(Self {
            stay_on: require_open_unit("MMOODisc", "stay_on", stay_on)?,
            stay_off: require_open_unit("MMOODisc", "stay_off", stay_off)?,
            peak_rate: require_positive("MMOODisc", "peak_rate", peak_rate)?,
            n: multiplex("MMOODisc", n)?,
        })
    }
}

impl Envelope for MMOODisc {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        Ok(0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        check_theta(theta)?;
        let e_peak = (theta * self.peak_rate).exp();
        let off_on = self.stay_off + self.stay_on * e_peak;
        let discriminant = off_on * off_on - 4.0 * (self.stay_off + self.stay_on - 1.0) * e_peak;
        let log_eigen = (0.5 * (off_on + discriminant.sqrt())).ln();
        if log_eigen.is_nan() || log_eigen < 0.0 {
            return Err(ParameterOutOfBounds::NegativeRho { rho: log_eigen });
        }
        Ok(self.n * log_eigen / theta)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn average_rate(&self) -> f64 {
        self.n * (1.0 - self.stay_off) / (2.0 - self.stay_off - self.stay_on) * self.peak_rate
    }
}

impl Arrival for MMOODisc {}

impl fmt::Display for MMOODisc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MMOODisc_stay_on={}_stay_off={}_peak_rate={}_n={}",
            self.stay_on, self.stay_off, self.peak_rate, self.n
        )
    }
}
