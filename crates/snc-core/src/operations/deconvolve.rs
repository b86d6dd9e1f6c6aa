//! Output (departure) envelope of an arrival behind a server.

use super::stability::check_rates;
use super::Dependence;
use crate::envelope::{Arrival, ArrivalRef, Envelope, ServerRef};
use crate::error::{check_finite, check_rho, Feasible};
use snc_math::geometric_correction;

/// Departure process of an arrival after a server (output bound).
#[derive(Debug, Clone)]
pub struct Deconvolve {
    arr: ArrivalRef,
    ser: ServerRef,
    dependence: Dependence,
}

impl Deconvolve {
    pub fn new(arr: ArrivalRef, ser: ServerRef, dependence: Dependence) -> Self {
        Self {
            arr,
            ser,
            dependence,
        }
    }
}

impl Envelope for Deconvolve {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        let p_theta = self.dependence.p() * theta;
        let q_theta = self.dependence.q() * theta;

        let arr_sigma = self.arr.sigma(p_theta)?;
        let ser_sigma = self.ser.sigma(q_theta)?;
        let arr_rho = self.arr.rho(p_theta)?;
        let ser_rho = self.ser.rho(q_theta)?;
        check_rates(arr_rho, ser_rho)?;

        let k = geometric_correction(theta * (ser_rho - arr_rho), theta);
        let sigma = if self.arr.is_discrete() {
            arr_sigma + ser_sigma + k
        } else {
            arr_sigma + ser_sigma + arr_rho + k
        };
        check_finite(sigma, "deconvolution sigma")
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        let arr_rho = check_rho(self.arr.rho(self.dependence.p() * theta)?)?;
        let ser_rho = check_rho(self.ser.rho(self.dependence.q() * theta)?)?;
        check_rates(arr_rho, ser_rho)?;
        Ok(arr_rho)
    }

    fn is_discrete(&self) -> bool {
        self.arr.is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.arr.average_rate()
    }
}

impl Arrival for Deconvolve {}
