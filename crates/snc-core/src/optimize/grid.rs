//! Lattice enumeration for grid search.

use super::{sanitize, Objective};
use crate::error::Result;
use snc_config::ValidationError;

/// Slack added before flooring so that `high` lands on the lattice despite
/// rounding in `(high - low) / delta`.
const ENDPOINT_SLACK: f64 = 1e-9;

/// Regular lattice `low_i + k * delta`, `k = 0..counts_i`, in row-major
/// order (last dimension fastest).
#[derive(Debug, Clone)]
pub(crate) struct Lattice {
    lows: Vec<f64>,
    counts: Vec<usize>,
    delta: f64,
    len: usize,
}

impl Lattice {
    pub(crate) fn new(bounds: &[(f64, f64)], delta: f64, max_points: usize) -> Result<Self> {
        let mut counts = Vec::with_capacity(bounds.len());
        let mut len: usize = 1;
        for &(low, high) in bounds {
            let steps = ((high - low) / delta + ENDPOINT_SLACK).floor();
            let count = if steps.is_finite() && steps < max_points as f64 {
                steps as usize + 1
            } else {
                usize::MAX
            };
            len = len.saturating_mul(count);
            counts.push(count);
        }
        if len > max_points {
            return Err(ValidationError::InvalidValue {
                field: "grid_search.max_points".to_string(),
                message: format!(
                    "lattice with delta {} exceeds {} points",
                    delta, max_points
                ),
            }
            .into());
        }
        Ok(Self {
            lows: bounds.iter().map(|b| b.0).collect(),
            counts,
            delta,
            len,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn fill(&self, mut index: usize, out: &mut [f64]) {
        for d in (0..self.counts.len()).rev() {
            let k = index % self.counts[d];
            index /= self.counts[d];
            out[d] = self.lows[d] + k as f64 * self.delta;
        }
    }

    pub(crate) fn point(&self, index: usize) -> Vec<f64> {
        let mut out = vec![0.0; self.counts.len()];
        self.fill(index, &mut out);
        out
    }
}

/// Minimum over `[start, end)`; the lowest index wins ties.
fn scan<O: Objective + ?Sized>(
    objective: &O,
    lattice: &Lattice,
    start: usize,
    end: usize,
) -> Option<(usize, f64)> {
    let mut point = vec![0.0; lattice.counts.len()];
    let mut best: Option<(usize, f64)> = None;
    for index in start..end {
        lattice.fill(index, &mut point);
        let value = sanitize(objective.evaluate(&point));
        if value.is_finite() && best.map_or(true, |(_, b)| value < b) {
            best = Some((index, value));
        }
    }
    best
}

/// Evaluate every lattice point on up to `workers` threads.
///
/// Returns the index and value of the minimum, or `None` when every point
/// is infeasible. The reduction is independent of the worker count.
pub(crate) fn search<O: Objective + ?Sized>(
    objective: &O,
    lattice: &Lattice,
    workers: usize,
) -> Option<(usize, f64)> {
    let workers = workers.clamp(1, lattice.len().max(1));
    if workers == 1 {
        return scan(objective, lattice, 0, lattice.len());
    }
    let chunk = lattice.len().div_ceil(workers);

    let partials: Vec<Option<(usize, f64)>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let start = w * chunk;
                let end = ((w + 1) * chunk).min(lattice.len());
                scope.spawn(move || scan(objective, lattice, start, end))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    partials
        .into_iter()
        .flatten()
        .fold(None, |best: Option<(usize, f64)>, (index, value)| match best {
            Some((_, b)) if b <= value => best,
            _ => Some((index, value)),
        })
}
