//! Leftover service under static priority.

use super::Dependence;
use crate::envelope::{ArrivalRef, Envelope, Server, ServerRef};
use crate::error::{check_rho, Feasible};

/// Service left to a flow after a competing arrival is served first.
#[derive(Debug, Clone)]
pub struct Leftover {
    ser: ServerRef,
    arr: ArrivalRef,
    dependence: Dependence,
}

impl Leftover {
    pub fn new(ser: ServerRef, arr: ArrivalRef, dependence: Dependence) -> Self {
        Self {
            ser,
            arr,
            dependence,
        }
    }
}

impl Envelope for Leftover {
    fn sigma(&self, theta: f64) -> Feasible<f64> {
        Ok(self.ser.sigma(self.dependence.q() * theta)?
            + self.arr.sigma(self.dependence.p() * theta)?)
    }

    fn rho(&self, theta: f64) -> Feasible<f64> {
        let arr_rho = check_rho(self.arr.rho(self.dependence.p() * theta)?)?;
        let ser_rho = check_rho(self.ser.rho(self.dependence.q() * theta)?)?;
        Ok(ser_rho - arr_rho)
    }

    fn is_discrete(&self) -> bool {
        self.ser.is_discrete()
    }

    fn average_rate(&self) -> f64 {
        self.ser.average_rate() - self.arr.average_rate()
    }
}

impl Server for Leftover {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{DetermTokenBucket, DM1};
    use crate::server::ConstantRateServer;
    use std::sync::Arc;

    #[test]
    fn test_leftover_subtracts_rates() {
        let arr: ArrivalRef = Arc::new(DetermTokenBucket::new(1.0, 1.5, 2).unwrap());
        let lo = Leftover::new(
            Arc::new(ConstantRateServer::new(5.0).unwrap()),
            arr,
            Dependence::Independent,
        );
        assert_eq!(lo.sigma(1.0).unwrap(), 2.0);
        assert_eq!(lo.rho(1.0).unwrap(), 2.0);
        assert_eq!(lo.average_rate(), 2.0);
        assert_eq!(lo.constant_rate(), None);
    }

    #[test]
    fn test_leftover_propagates_child_domain() {
        let lo = Leftover::new(
            Arc::new(ConstantRateServer::new(5.0).unwrap()),
            Arc::new(DM1::new(1.0, 1).unwrap()),
            Dependence::Independent,
        );
        assert!(lo.rho(1.5).is_err());
    }
}
