//! Leaf arrival processes.
//!
//! Every process carries a multiplexing factor `n`: the envelope of `n`
//! independent copies is `n` times the single-flow envelope.

mod markov;
mod qt;
mod regulated;

pub use markov::{MMOODisc, MMOOFluid};
pub use qt::{DPoisson1, DM1, MD1, MM1};
pub use regulated::{DetermTokenBucket, LeakyBucketMassoulie};

use crate::error::{NcError, Result};

/// Validate a multiplexing factor and return it as a float.
pub(crate) fn multiplex(process: &'static str, n: u32) -> Result<f64> {
    if n == 0 {
        return Err(NcError::InvalidParameter {
            process,
            field: "n",
            value: 0.0,
            reason: "must be >= 1",
        });
    }
    Ok(f64::from(n))
}
