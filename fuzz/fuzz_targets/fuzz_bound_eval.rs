//! Fuzz target for bound evaluation.
//!
//! Builds a small fat-cross network from arbitrary rates and evaluates
//! both bounds at arbitrary parameters. Evaluation must return a value or
//! a `ParameterOutOfBounds`, and never NaN.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snc_core::arrivals::{DetermTokenBucket, MMOOFluid, DM1};
use snc_core::bounds::{PerformMetric, PerformParameter};
use snc_core::server::ConstantRateServer;
use snc_core::setting::{FatCrossPerform, Setting};
use snc_core::{ArrivalRef, ServerRef};
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
enum Source {
    Dm1 { lamb: f64 },
    Fluid { mu: f64, lamb: f64, peak: f64 },
    Bucket { sigma: f64, rho: f64 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    flows: Vec<(Source, f64)>,
    metric: u8,
    value: f64,
    theta: f64,
    l: f64,
}

fn build(source: &Source) -> Option<ArrivalRef> {
    let arr: ArrivalRef = match *source {
        Source::Dm1 { lamb } => Arc::new(DM1::new(lamb, 1).ok()?),
        Source::Fluid { mu, lamb, peak } => Arc::new(MMOOFluid::new(mu, lamb, peak, 1).ok()?),
        Source::Bucket { sigma, rho } => Arc::new(DetermTokenBucket::new(sigma, rho, 1).ok()?),
    };
    Some(arr)
}

fuzz_target!(|input: Input| {
    if input.flows.is_empty() || input.flows.len() > 8 {
        return;
    }
    let mut arrivals = Vec::new();
    let mut servers = Vec::new();
    for (source, rate) in &input.flows {
        let (Some(arr), Ok(ser)) = (build(source), ConstantRateServer::new(*rate)) else {
            return;
        };
        let ser: ServerRef = Arc::new(ser);
        arrivals.push(arr);
        servers.push(ser);
    }

    let metric = PerformMetric::ALL[input.metric as usize % PerformMetric::ALL.len()];
    let Ok(param) = PerformParameter::new(metric, input.value) else {
        return;
    };
    let Ok(setting) = FatCrossPerform::new(arrivals, servers, param) else {
        return;
    };

    if let Ok(v) = setting.bound(&[input.theta]) {
        assert!(!v.is_nan(), "standard bound is NaN");
    }
    if let Ok(v) = setting.mitigated_bound(&[input.theta, input.l]) {
        assert!(!v.is_nan(), "mitigated bound is NaN");
    }
});
