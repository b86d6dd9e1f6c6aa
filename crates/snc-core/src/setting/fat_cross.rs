use super::{Setting, SingleServerPerform};
use crate::bounds::PerformParameter;
use crate::envelope::{ArrivalRef, ServerRef};
use crate::error::{Feasible, NcError, Result};
use crate::operations::{AggregateList, Deconvolve, Dependence, Leftover};
use std::sync::Arc;
use tracing::debug;

/// Fat-cross topology.
///
/// The flow of interest `arr_list[0]` crosses `ser_list[0]`. Every cross
/// flow `arr_list[i]` first traverses its own server `ser_list[i]` and then
/// joins `ser_list[0]`, where it is served before the flow of interest. The
/// bound is that of `arr_list[0]` against the leftover service.
#[derive(Debug, Clone)]
pub struct FatCrossPerform {
    inner: SingleServerPerform,
    flows: usize,
}

impl FatCrossPerform {
    pub fn new(
        arr_list: Vec<ArrivalRef>,
        ser_list: Vec<ServerRef>,
        perform_param: PerformParameter,
    ) -> Result<Self> {
        let flows = arr_list.len();
        let mismatch = NcError::Topology {
            arrivals: flows,
            servers: ser_list.len(),
        };
        if flows != ser_list.len() {
            return Err(mismatch);
        }

        let mut arrivals = arr_list.into_iter();
        let mut servers = ser_list.into_iter();
        let (Some(foi), Some(shared)) = (arrivals.next(), servers.next()) else {
            return Err(mismatch);
        };

        let departures: Vec<ArrivalRef> = arrivals
            .zip(servers)
            .map(|(arr, ser)| -> ArrivalRef {
                Arc::new(Deconvolve::new(arr, ser, Dependence::Independent))
            })
            .collect();

        let service: ServerRef = if departures.is_empty() {
            shared
        } else {
            let cross: ArrivalRef = Arc::new(AggregateList::new(departures)?);
            Arc::new(Leftover::new(shared, cross, Dependence::Independent))
        };

        debug!(flows, metric = %perform_param.metric(), "built fat-cross setting");
        Ok(Self {
            inner: SingleServerPerform::new(foi, service, perform_param),
            flows,
        })
    }

    /// Number of flows including the flow of interest.
    pub fn flows(&self) -> usize {
        self.flows
    }
}

impl Setting for FatCrossPerform {
    fn perform_param(&self) -> PerformParameter {
        self.inner.perform_param()
    }

    fn bound(&self, param: &[f64]) -> Feasible<f64> {
        self.inner.bound(param)
    }

    fn mitigated_bound(&self, param: &[f64]) -> Feasible<f64> {
        self.inner.mitigated_bound(param)
    }

    fn is_stable_on_average(&self) -> bool {
        self.inner.is_stable_on_average()
    }

    fn split_parameters(&self) -> usize {
        self.inner.split_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::DM1;
    use crate::bounds::PerformMetric;
    use crate::server::ConstantRateServer;

    fn dm1(lamb: f64) -> ArrivalRef {
        Arc::new(DM1::new(lamb, 1).unwrap())
    }

    fn cr(rate: f64) -> ServerRef {
        Arc::new(ConstantRateServer::new(rate).unwrap())
    }

    fn delay_prob() -> PerformParameter {
        PerformParameter::new(PerformMetric::DelayProb, 6.0).unwrap()
    }

    #[test]
    fn test_topology_mismatch() {
        let err = FatCrossPerform::new(vec![dm1(1.0)], vec![cr(1.0), cr(2.0)], delay_prob())
            .unwrap_err();
        assert!(matches!(err, NcError::Topology { arrivals: 1, servers: 2 }));
        assert!(FatCrossPerform::new(vec![], vec![], delay_prob()).is_err());
    }

    #[test]
    fn test_single_flow_degenerates_to_single_server() {
        let fat = FatCrossPerform::new(vec![dm1(1.0)], vec![cr(4.0)], delay_prob()).unwrap();
        let single = SingleServerPerform::new(dm1(1.0), cr(4.0), delay_prob());
        assert_eq!(fat.bound(&[0.4]), single.bound(&[0.4]));
    }

    #[test]
    fn test_cross_traffic_loosens_bound() {
        let alone = FatCrossPerform::new(vec![dm1(1.0)], vec![cr(4.0)], delay_prob()).unwrap();
        let crossed =
            FatCrossPerform::new(vec![dm1(1.0), dm1(4.0)], vec![cr(4.0), cr(0.5)], delay_prob())
                .unwrap();
        assert_eq!(crossed.flows(), 2);
        let theta = [0.4];
        assert!(crossed.bound(&theta).unwrap() > alone.bound(&theta).unwrap());
        assert!(crossed.is_stable_on_average());
    }
}
