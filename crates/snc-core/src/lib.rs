//! Stochastic Network Calculus bound engine.
//!
//! This library provides:
//! - Exponential envelopes of leaf arrival and service processes
//! - The envelope algebra (tandem convolution, deconvolution, leftover
//!   service, aggregation) under independence or Hölder dependence
//! - Standard and power-mitigated performance bounds
//! - Network settings (single server, fat cross) and derivative-free
//!   optimizers that minimize their bounds over (θ, l)
//! - Structured logging setup

pub mod arrivals;
pub mod bounds;
pub mod compare;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod operations;
pub mod optimize;
pub mod server;
pub mod setting;

pub use compare::{compare_over_params, compute_improvement, BoundComparison};
pub use envelope::{Arrival, ArrivalRef, Envelope, Server, ServerRef};
pub use error::{Feasible, NcError, ParameterOutOfBounds, Result};
