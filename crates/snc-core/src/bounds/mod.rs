//! Performance parameters and the bound formula evaluator.

mod formula;
mod perform;

pub use formula::{mitigated_bound, standard_bound};
pub use perform::{PerformMetric, PerformParamList, PerformParameter};
