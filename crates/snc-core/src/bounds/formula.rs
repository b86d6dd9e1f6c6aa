//! Closed-form bounds for a single arrival crossing a single server.
//!
//! Both variants share one evaluator parameterized by the power-mitigator
//! exponent `l`. The standard bound is `l = 1`: envelopes are evaluated at
//! `lθ` and the geometric-sum denominator `1 - e^{θd}` becomes
//! `(1 - e^{lθd})^{1/l}`. Passing exactly `1.0` reproduces the standard
//! bound bit for bit, so a mitigated search space containing `l = 1` can
//! only improve on the standard result.

use super::perform::{PerformMetric, PerformParameter};
use crate::envelope::{Arrival, Server};
use crate::error::{check_finite, check_rho, check_theta, Feasible, ParameterOutOfBounds};
use crate::operations::{check_rates, Dependence};
use snc_math::log1m_exp;

/// Envelope terms of the arrival/server pair at one θ.
#[derive(Debug, Clone, Copy)]
struct PathTerms {
    /// `σ_arr(pθ) + σ_ser(qθ)`, plus `ρ_arr τ` for continuous arrivals.
    sigma_sum: f64,
    /// Net drift `ρ_arr - ρ_ser`, scaled by `τ` for continuous arrivals.
    drift: f64,
    rho_arr: f64,
    rho_ser: f64,
}

impl PathTerms {
    fn at(arr: &dyn Arrival, ser: &dyn Server, dep: Dependence, theta: f64) -> Feasible<Self> {
        let p_theta = dep.p() * theta;
        let q_theta = dep.q() * theta;

        let rho_arr = check_rho(arr.rho(p_theta)?)?;
        let rho_ser = check_rho(ser.rho(q_theta)?)?;
        check_rates(rho_arr, rho_ser)?;

        let mut sigma_sum = arr.sigma(p_theta)? + ser.sigma(q_theta)?;
        let mut drift = rho_arr - rho_ser;
        if !arr.is_discrete() {
            let tau = 1.0 / (theta * rho_ser);
            sigma_sum += rho_arr * tau;
            drift *= tau;
        }

        Ok(Self {
            sigma_sum,
            drift,
            rho_arr,
            rho_ser,
        })
    }
}

/// Evaluate the bound for `perform` at `theta` with mitigator exponent `l`.
fn evaluate(
    arr: &dyn Arrival,
    ser: &dyn Server,
    dep: Dependence,
    perform: PerformParameter,
    theta: f64,
    l: f64,
) -> Feasible<f64> {
    check_theta(theta)?;
    if l.is_nan() || l < 1.0 {
        return Err(ParameterOutOfBounds::MitigatorBelowOne { l });
    }
    let l_theta = l * theta;
    let terms = PathTerms::at(arr, ser, dep, l_theta)?;

    // ln((1 - e^{lθd})^{1/l})
    let log_denom = log1m_exp(l_theta * terms.drift) / l;
    let s = terms.sigma_sum;
    let value = perform.value();

    let bound = match perform.metric() {
        PerformMetric::BacklogProb => (theta * (s - value) - log_denom).exp(),
        PerformMetric::Backlog => s - (value.ln() + log_denom) / theta,
        PerformMetric::DelayProb => (theta * (s - terms.rho_ser * value) - log_denom).exp(),
        PerformMetric::Delay => (s - (value.ln() + log_denom) / theta) / terms.rho_ser,
        PerformMetric::Output => (theta * (terms.rho_arr * value + s) - log_denom).exp(),
    };
    check_finite(bound, "bound")
}

/// Single-parameter bound at `theta`.
pub fn standard_bound(
    arr: &dyn Arrival,
    ser: &dyn Server,
    dep: Dependence,
    perform: PerformParameter,
    theta: f64,
) -> Feasible<f64> {
    evaluate(arr, ser, dep, perform, theta, 1.0)
}

/// Power-mitigated bound at `(theta, l)`, `l >= 1`.
pub fn mitigated_bound(
    arr: &dyn Arrival,
    ser: &dyn Server,
    dep: Dependence,
    perform: PerformParameter,
    theta: f64,
    l: f64,
) -> Feasible<f64> {
    evaluate(arr, ser, dep, perform, theta, l)
}
