//! The MGF envelope abstraction.
//!
//! An envelope bounds the log moment-generating function of a cumulative
//! process over an interval of length `t` by `θ (σ(θ) + ρ(θ) t)`. Arrivals
//! and servers share the same shape; the marker subtraits only keep the
//! operator constructors honest about which child plays which role.
//!
//! Servers report their service rate through `rho` as a non-negative rate.
//! Formulas subtract it from the arrival rate wherever a net drift is needed.

use crate::error::Feasible;
use std::fmt::Debug;
use std::sync::Arc;

/// `(σ(θ), ρ(θ))` envelope of an arrival or service process.
pub trait Envelope: Send + Sync + Debug {
    /// Burst term at `theta`.
    fn sigma(&self, theta: f64) -> Feasible<f64>;

    /// Rate term at `theta`.
    fn rho(&self, theta: f64) -> Feasible<f64>;

    /// Whether the process lives in discrete time.
    fn is_discrete(&self) -> bool;

    /// Long-run mean rate, independent of `theta`.
    fn average_rate(&self) -> f64;
}

/// An envelope describing offered traffic.
pub trait Arrival: Envelope {}

/// An envelope describing service capacity.
pub trait Server: Envelope {
    /// Deterministic rate, when the server is a constant-rate server.
    fn constant_rate(&self) -> Option<f64> {
        None
    }
}

/// Shared, immutable arrival node.
pub type ArrivalRef = Arc<dyn Arrival>;

/// Shared, immutable server node.
pub type ServerRef = Arc<dyn Server>;
