use serde::Serialize;
use snc_config::OptMethod;
use std::cmp::Ordering;

/// Outcome of one optimizer run.
///
/// Results compare by `best_value` only, so the best of several heuristics
/// is the minimum.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub best_parameters: Vec<f64>,
    pub best_value: f64,
    pub heuristic: OptMethod,
    /// False when no evaluated point was feasible; `best_value` is then +inf.
    pub feasible: bool,
    pub evaluations: usize,
}

impl OptimizationResult {
    pub(crate) fn infeasible(heuristic: OptMethod, parameters: Vec<f64>, evaluations: usize) -> Self {
        Self {
            best_parameters: parameters,
            best_value: f64::INFINITY,
            heuristic,
            feasible: false,
            evaluations,
        }
    }

    /// Lowest `best_value`; earlier entries win ties.
    pub fn best_of<I>(results: I) -> Option<Self>
    where
        I: IntoIterator<Item = OptimizationResult>,
    {
        results.into_iter().fold(None, |best, next| match best {
            Some(b) if b.best_value.total_cmp(&next.best_value) != Ordering::Greater => Some(b),
            _ => Some(next),
        })
    }
}

impl PartialEq for OptimizationResult {
    fn eq(&self, other: &Self) -> bool {
        self.best_value == other.best_value
    }
}

impl PartialOrd for OptimizationResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.best_value.partial_cmp(&other.best_value)
    }
}
