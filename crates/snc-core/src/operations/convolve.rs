//! Tandem convolution of two servers.

use super::Dependence;
use crate::envelope::{Envelope, Server, ServerRef};
use crate::error::{check_finite, check_rho, check_theta, require_positive, Feasible, Result};
use snc_math::{geometric_correction, is_equal, log1m_exp};

/// Scaled children evaluated at `(pθ, qθ)`.
struct Scaled {
    sigma_sum: f64,
    rho_1: f64,
    rho_2: f64,
}

#[derive(Debug, Clone)]
struct Tandem {
    ser1: ServerRef,
    ser2: ServerRef,
    dependence: Dependence,
}

impl Tandem {
    fn fast_rate(&self) -> Option<f64> {
        match (self.ser1.constant_rate(), self.ser2.constant_rate()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        }
    }

    fn scaled(&self, theta: f64) -> Feasible<Scaled> {
        let p_theta = self.dependence.p() * theta;
        let q_theta = self.dependence.q() * theta;
        Ok(Scaled {
            sigma_sum: self.ser1.sigma(p_theta)? + self.ser2.sigma(q_theta)?,
            rho_1: self.ser1.rho(p_theta)?,
            rho_2: self.ser2.rho(q_theta)?,
        })
    }

    /// `tie_sigma` is the extra burst paid when the scaled rates coincide.
    fn sigma_with(&self, theta: f64, tie_sigma: impl Fn(f64) -> f64) -> Feasible<f64> {
        if self.fast_rate().is_some() {
            check_theta(theta)?;
            return Ok(0.0);
        }
        let s = self.scaled(theta)?;
        let sigma = if is_equal(s.rho_1, s.rho_2) {
            s.sigma_sum + tie_sigma(theta)
        } else {
            s.sigma_sum + geometric_correction(theta * (s.rho_1 - s.rho_2).abs(), theta)
        };
        check_finite(sigma, "convolution sigma")
    }

    fn rho_with(&self, theta: f64, tie_rho: impl Fn(f64, f64) -> f64) -> Feasible<f64> {
        if let Some(rate) = self.fast_rate() {
            check_theta(theta)?;
            return Ok(rate);
        }
        let s = self.scaled(theta)?;
        check_rho(s.rho_1)?;
        check_rho(s.rho_2)?;
        if is_equal(s.rho_1, s.rho_2) {
            check_rho(tie_rho(s.rho_1, theta))
        } else {
            Ok(s.rho_1.min(s.rho_2))
        }
    }

    fn average_rate(&self) -> f64 {
        self.ser1.average_rate().min(self.ser2.average_rate())
    }
}

/// Service of two servers in tandem.
///
/// Two constant-rate servers collapse to a constant-rate server at the
/// smaller rate. Otherwise coinciding rates pay a `1/θ` rate penalty.
#[derive(Debug, Clone)]
pub struct Convolve(Tandem);

impl Convolve {
    pub fn new(ser1: ServerRef, ser2: ServerRef, dependence: Dependence) -> Self {
        Self(Tandem {
            ser1,
            ser2,
            dependence,
        })
    }
}

impl Envelope for Convolve {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        self.0.sigma_with(theta, |_| 0.0)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        self.0.rho_with(theta, |rho, theta| rho - 1.0 / theta)
    }

    fn is_discrete(&self) -> bool {
        self.0.ser1.is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.0.average_rate()
    }
}

impl Server for Convolve {
    fn constant_rate(&self) -> Option<f64> {
        self.0.fast_rate()
    }
}

/// Convolution with a tunable rate penalty `delta` for coinciding rates.
#[derive(Debug, Clone)]
pub struct ConvolveAlter {
    inner: Tandem,
    delta: f64,
}

impl ConvolveAlter {
    pub fn new(
        ser1: ServerRef,
        ser2: ServerRef,
        delta: f64,
        dependence: Dependence,
    ) -> Result<Self> {
        Ok(Self {
            inner: Tandem {
                ser1,
                ser2,
                dependence,
            },
            delta: require_positive("ConvolveAlter", "delta", delta)?,
        })
    }
}

impl Envelope for ConvolveAlter {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        let delta = self.delta;
        self.inner.sigma_with(theta, |theta| -log1m_exp(-theta * delta))
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        let delta = self.delta;
        self.inner.rho_with(theta, |rho, _| rho - delta)
    }

    fn is_discrete(&self) -> bool {
        self.inner.ser1.is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.inner.average_rate()
    }
}

impl Server for ConvolveAlter {
    fn constant_rate(&self) -> Option<f64> {
        self.inner.fast_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::DM1;
    use crate::operations::Leftover;
    use crate::server::ConstantRateServer;
    use std::sync::Arc;

    fn cr(rate: f64) -> ServerRef {
        Arc::new(ConstantRateServer::new(rate).unwrap())
    }

    fn leftover(rate: f64, lamb: f64) -> ServerRef {
        Arc::new(Leftover::new(
            cr(rate),
            Arc::new(DM1::new(lamb, 1).unwrap()),
            Dependence::Independent,
        ))
    }

    #[test]
    fn test_constant_rate_fast_path() {
        let conv = Convolve::new(cr(3.0), cr(5.0), Dependence::Independent);
        for theta in [0.1, 1.0, 4.0] {
            assert_eq!(conv.sigma(theta).unwrap(), 0.0);
            assert_eq!(conv.rho(theta).unwrap(), 3.0);
        }
        assert_eq!(conv.constant_rate(), Some(3.0));
        assert!(conv.rho(0.0).is_err());
    }

    #[test]
    fn test_distinct_rates_pay_geometric_burst() {
        let ser1 = leftover(5.0, 2.0);
        let ser2 = cr(2.0);
        let conv = Convolve::new(ser1.clone(), ser2.clone(), Dependence::Independent);
        let theta = 0.5;
        let r1 = ser1.rho(theta).unwrap();
        let expected_sigma = -(1.0 - (-theta * (r1 - 2.0f64).abs()).exp()).ln() / theta;
        assert!((conv.sigma(theta).unwrap() - expected_sigma).abs() < 1e-10);
        assert_eq!(conv.rho(theta).unwrap(), r1.min(2.0));
    }

    #[test]
    fn test_equal_rates_pay_rate_penalty() {
        // Leftover(CR 3, DM1) has rate 3 - ρ_DM1; match it with a second copy.
        let ser = leftover(3.0, 4.0);
        let conv = Convolve::new(ser.clone(), ser.clone(), Dependence::Independent);
        let theta = 1.0;
        let r = ser.rho(theta).unwrap();
        assert!((conv.rho(theta).unwrap() - (r - 1.0)).abs() < 1e-12);
        assert_eq!(conv.sigma(theta).unwrap(), 0.0);
        assert_eq!(conv.constant_rate(), None);
    }

    #[test]
    fn test_alter_uses_delta() {
        let ser = leftover(3.0, 4.0);
        let alter = ConvolveAlter::new(ser.clone(), ser.clone(), 0.25, Dependence::Independent)
            .unwrap();
        let theta = 1.0;
        let r = ser.rho(theta).unwrap();
        assert!((alter.rho(theta).unwrap() - (r - 0.25)).abs() < 1e-12);
        let expected = -(1.0 - (-0.25f64).exp()).ln();
        assert!((alter.sigma(theta).unwrap() - expected).abs() < 1e-12);
        assert!(ConvolveAlter::new(ser.clone(), ser, 0.0, Dependence::Independent).is_err());
    }

    #[test]
    fn test_negative_penalized_rate_fails() {
        let ser = leftover(1.0, 4.0);
        let conv = Convolve::new(ser.clone(), ser, Dependence::Independent);
        // ρ ≈ 0.75 at θ = 0.1; subtracting 1/θ = 10 goes negative.
        assert!(conv.rho(0.1).is_err());
    }
}
