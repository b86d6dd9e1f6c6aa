//! Error types for the bound engine.
//!
//! Two families, handled very differently:
//!
//! - [`ParameterOutOfBounds`] is an *expected* signal. A parameter point lies
//!   outside the admissible region of some envelope or formula. It is cheap
//!   (`Copy`, no allocation) and is collapsed to `+inf` at the objective
//!   boundary, so a search never terminates because of it.
//! - [`NcError`] covers construction and configuration failures. These are
//!   fatal and propagate to the caller unchanged.

use snc_config::ValidationError;
use snc_math::HolderError;
use thiserror::Error;

/// Result type alias for construction and configuration.
pub type Result<T> = std::result::Result<T, NcError>;

/// Result of evaluating an envelope or bound at a parameter point.
pub type Feasible<T> = std::result::Result<T, ParameterOutOfBounds>;

/// A parameter point outside the admissible region.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterOutOfBounds {
    #[error("theta = {theta} must be > 0")]
    NonPositiveTheta { theta: f64 },

    #[error("theta = {theta} must be < {limit}")]
    ThetaAboveLimit { theta: f64, limit: f64 },

    #[error("rho = {rho} must be >= 0")]
    NegativeRho { rho: f64 },

    #[error("arrival rho {arrival} must be < service rho {service}")]
    Unstable { arrival: f64, service: f64 },

    #[error("mitigator exponent l = {l} must be >= 1")]
    MitigatorBelowOne { l: f64 },

    #[error("Hölder exponent p = {p} must be > 1")]
    HolderExponent { p: f64 },

    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },

    #[error("expected {expected} free parameters, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

/// Reject `theta <= 0` (and NaN).
pub fn check_theta(theta: f64) -> Feasible<()> {
    if theta.is_nan() || theta <= 0.0 {
        return Err(ParameterOutOfBounds::NonPositiveTheta { theta });
    }
    Ok(())
}

/// Reject negative (or NaN) rates.
pub fn check_rho(rho: f64) -> Feasible<f64> {
    if rho.is_nan() || rho < 0.0 {
        return Err(ParameterOutOfBounds::NegativeRho { rho });
    }
    Ok(rho)
}

/// Reject NaN and infinities produced by overflow.
pub fn check_finite(value: f64, quantity: &'static str) -> Feasible<f64> {
    if !value.is_finite() {
        return Err(ParameterOutOfBounds::NonFinite { quantity });
    }
    Ok(value)
}

/// Construction and configuration errors.
#[derive(Debug, Error)]
pub enum NcError {
    #[error("invalid {process} parameter {field} = {value}: {reason}")]
    InvalidParameter {
        process: &'static str,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid Hölder split: {0}")]
    Holder(#[from] HolderError),

    #[error("expected {expected} Hölder exponents for {arrivals} arrivals, got {actual}")]
    HolderCount {
        arrivals: usize,
        expected: usize,
        actual: usize,
    },

    #[error("aggregate needs at least one arrival")]
    EmptyAggregate,

    #[error("topology mismatch: {arrivals} arrivals but {servers} servers")]
    Topology { arrivals: usize, servers: usize },

    #[error("search region mismatch: {0}")]
    Region(String),

    #[error("configuration error: {0}")]
    Config(#[from] ValidationError),
}

impl NcError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            NcError::InvalidParameter { .. } => 20,
            NcError::Holder(_) => 21,
            NcError::HolderCount { .. } => 22,
            NcError::EmptyAggregate => 23,
            NcError::Topology { .. } => 24,
            NcError::Region(_) => 30,
            NcError::Config(e) => e.code(),
        }
    }
}

/// Validate a construction parameter that must be finite and > 0.
pub(crate) fn require_positive(
    process: &'static str,
    field: &'static str,
    value: f64,
) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NcError::InvalidParameter {
            process,
            field,
            value,
            reason: "must be finite and > 0",
        });
    }
    Ok(value)
}

/// Validate a construction parameter that must be finite and >= 0.
pub(crate) fn require_non_negative(
    process: &'static str,
    field: &'static str,
    value: f64,
) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(NcError::InvalidParameter {
            process,
            field,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(value)
}

/// Validate a probability strictly inside (0, 1).
pub(crate) fn require_open_unit(
    process: &'static str,
    field: &'static str,
    value: f64,
) -> Result<f64> {
    if !(value > 0.0 && value < 1.0) {
        return Err(NcError::InvalidParameter {
            process,
            field,
            value,
            reason: "must be in (0, 1)",
        });
    }
    Ok(value)
}
