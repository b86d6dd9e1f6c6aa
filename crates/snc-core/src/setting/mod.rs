//! Bound-evaluable network settings.
//!
//! A setting owns an immutable envelope tree and a performance parameter.
//! Optimizers only read it, so one setting can back several concurrent
//! searches.

mod fat_cross;
mod single_server;

pub use fat_cross::FatCrossPerform;
pub use single_server::SingleServerPerform;

use crate::bounds::PerformParameter;
use crate::error::{Feasible, ParameterOutOfBounds};

/// A network path whose bound can be evaluated at a parameter point.
pub trait Setting: Send + Sync {
    fn perform_param(&self) -> PerformParameter;

    /// Standard bound; `param = [θ]` followed by any searched exponents.
    fn bound(&self, param: &[f64]) -> Feasible<f64>;

    /// Power-mitigated bound; `param = [θ, l]` followed by any searched
    /// exponents.
    fn mitigated_bound(&self, param: &[f64]) -> Feasible<f64>;

    /// Long-run rates admit a finite bound at all.
    fn is_stable_on_average(&self) -> bool;

    /// Searched Hölder exponents appended after `θ` (and `l`) in `param`.
    fn split_parameters(&self) -> usize {
        0
    }

    fn standard_dimension(&self) -> usize {
        STANDARD_DIMENSION + self.split_parameters()
    }

    fn mitigated_dimension(&self) -> usize {
        MITIGATED_DIMENSION + self.split_parameters()
    }
}

/// Number of free parameters of the standard bound.
pub const STANDARD_DIMENSION: usize = 1;

/// Number of free parameters of the mitigated bound.
pub const MITIGATED_DIMENSION: usize = 2;

pub(crate) fn expect_dimension(param: &[f64], expected: usize) -> Feasible<()> {
    if param.len() != expected {
        return Err(ParameterOutOfBounds::Dimension {
            expected,
            actual: param.len(),
        });
    }
    Ok(())
}
