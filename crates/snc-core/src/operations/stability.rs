use crate::envelope::{Arrival, Server};
use crate::error::{Feasible, ParameterOutOfBounds};

/// Require the scaled arrival rate to lie strictly below the scaled service
/// rate: `ρ_arr(pθ) < ρ_ser(qθ)`.
pub fn stability_check(
    arr: &dyn Arrival,
    ser: &dyn Server,
    theta: f64,
    p: f64,
    q: f64,
) -> Feasible<()> {
    let arrival = arr.rho(p * theta)?;
    let service = ser.rho(q * theta)?;
    check_rates(arrival, service)
}

/// Stability test on already evaluated rates.
pub(crate) fn check_rates(arrival: f64, service: f64) -> Feasible<()> {
    if arrival.is_nan() || service.is_nan() || arrival >= service {
        return Err(ParameterOutOfBounds::Unstable { arrival, service });
    }
    Ok(())
}
