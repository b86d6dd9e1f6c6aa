use super::{expect_dimension, Setting, MITIGATED_DIMENSION, STANDARD_DIMENSION};
use crate::bounds::{mitigated_bound, standard_bound, PerformParameter};
use crate::envelope::{ArrivalRef, ServerRef};
use crate::error::{Feasible, ParameterOutOfBounds};
use crate::operations::Dependence;

/// One arrival crossing one (possibly composite) server.
#[derive(Debug, Clone)]
pub struct SingleServerPerform {
    arr: ArrivalRef,
    ser: ServerRef,
    dependence: Dependence,
    search_holder: bool,
    perform_param: PerformParameter,
}

impl SingleServerPerform {
    pub fn new(arr: ArrivalRef, ser: ServerRef, perform_param: PerformParameter) -> Self {
        Self {
            arr,
            ser,
            dependence: Dependence::Independent,
            search_holder: false,
            perform_param,
        }
    }

    /// Treat arrival and server as dependent with a fixed exponent.
    pub fn with_dependence(mut self, dependence: Dependence) -> Self {
        self.dependence = dependence;
        self.search_holder = false;
        self
    }

    /// Treat arrival and server as dependent and let the optimizer choose
    /// the Hölder exponent: `p` is appended to the parameter vector, so the
    /// standard bound takes `[θ, p]` and the mitigated one `[θ, l, p]`.
    pub fn with_holder_search(mut self) -> Self {
        self.search_holder = true;
        self
    }

    /// Split `param` into its bound part of length `base` and the
    /// dependence it selects.
    fn split<'p>(&self, param: &'p [f64], base: usize) -> Feasible<(&'p [f64], Dependence)> {
        expect_dimension(param, base + self.split_parameters())?;
        if !self.search_holder {
            return Ok((param, self.dependence));
        }
        let p = param[base];
        let dependence =
            Dependence::holder(p).map_err(|_| ParameterOutOfBounds::HolderExponent { p })?;
        Ok((&param[..base], dependence))
    }

    /// Same path, different performance parameter.
    pub fn with_perform_param(&self, perform_param: PerformParameter) -> Self {
        Self {
            perform_param,
            ..self.clone()
        }
    }

    pub fn arrival(&self) -> &ArrivalRef {
        &self.arr
    }

    pub fn server(&self) -> &ServerRef {
        &self.ser
    }
}

impl Setting for SingleServerPerform {
    fn perform_param(&self) -> PerformParameter {
        self.perform_param
    }

    fn split_parameters(&self) -> usize {
        usize::from(self.search_holder)
    }

    fn bound(&self, param: &[f64]) -> Feasible<f64> {
        let (param, dependence) = self.split(param, STANDARD_DIMENSION)?;
        standard_bound(
            self.arr.as_ref(),
            self.ser.as_ref(),
            dependence,
            self.perform_param,
            param[0],
        )
    }

    fn mitigated_bound(&self, param: &[f64]) -> Feasible<f64> {
        let (param, dependence) = self.split(param, MITIGATED_DIMENSION)?;
        mitigated_bound(
            self.arr.as_ref(),
            self.ser.as_ref(),
            dependence,
            self.perform_param,
            param[0],
            param[1],
        )
    }

    fn is_stable_on_average(&self) -> bool {
        self.arr.average_rate() < self.ser.average_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::DM1;
    use crate::bounds::PerformMetric;
    use crate::error::ParameterOutOfBounds;
    use crate::server::ConstantRateServer;
    use std::sync::Arc;

    fn setting(rate: f64) -> SingleServerPerform {
        SingleServerPerform::new(
            Arc::new(DM1::new(1.0, 1).unwrap()),
            Arc::new(ConstantRateServer::new(rate).unwrap()),
            PerformParameter::new(PerformMetric::Output, 6.0).unwrap(),
        )
    }

    #[test]
    fn test_bound_checks_dimension() {
        let s = setting(10.0);
        assert!(s.bound(&[0.5]).is_ok());
        assert_eq!(
            s.bound(&[0.5, 1.0]),
            Err(ParameterOutOfBounds::Dimension {
                expected: 1,
                actual: 2
            })
        );
        assert!(s.mitigated_bound(&[0.5]).is_err());
        assert!(s.mitigated_bound(&[0.3, 2.0]).is_ok());
        // lθ = λ leaves the D/M/1 MGF undefined.
        assert!(matches!(
            s.mitigated_bound(&[0.5, 2.0]),
            Err(ParameterOutOfBounds::ThetaAboveLimit { .. })
        ));
    }

    #[test]
    fn test_average_stability() {
        assert!(setting(10.0).is_stable_on_average());
        assert!(!setting(1.0).is_stable_on_average());
    }

    #[test]
    fn test_dependence_changes_bound() {
        let indep = setting(10.0);
        let dep = indep
            .clone()
            .with_dependence(Dependence::holder(2.0).unwrap());
        let a = indep.bound(&[0.3]).unwrap();
        let b = dep.bound(&[0.3]).unwrap();
        assert!(a.is_finite() && b.is_finite());
        assert_ne!(a, b);
    }

    #[test]
    fn test_holder_search_reads_exponent_from_param() {
        let fixed = setting(10.0).with_dependence(Dependence::holder(2.0).unwrap());
        let searched = setting(10.0).with_holder_search();
        assert_eq!(searched.split_parameters(), 1);
        assert_eq!(searched.standard_dimension(), 2);
        assert_eq!(searched.mitigated_dimension(), 3);

        assert_eq!(searched.bound(&[0.3, 2.0]), fixed.bound(&[0.3]));
        assert_eq!(
            searched.mitigated_bound(&[0.2, 1.5, 2.0]),
            fixed.mitigated_bound(&[0.2, 1.5])
        );
        assert_ne!(searched.bound(&[0.3, 3.0]), fixed.bound(&[0.3]));
    }

    #[test]
    fn test_holder_search_rejects_bad_exponent() {
        let s = setting(10.0).with_holder_search();
        assert!(matches!(
            s.bound(&[0.3, 1.0]),
            Err(ParameterOutOfBounds::HolderExponent { .. })
        ));
        assert!(matches!(
            s.mitigated_bound(&[0.3, 1.0, f64::NAN]),
            Err(ParameterOutOfBounds::HolderExponent { .. })
        ));
        assert_eq!(
            s.bound(&[0.3]),
            Err(ParameterOutOfBounds::Dimension {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_with_perform_param_keeps_path() {
        let s = setting(10.0);
        let delay = s.with_perform_param(PerformParameter::new(PerformMetric::Delay, 1e-3).unwrap());
        assert_eq!(delay.perform_param().metric(), PerformMetric::Delay);
        assert!(Arc::ptr_eq(s.arrival(), delay.arrival()));
    }
}
