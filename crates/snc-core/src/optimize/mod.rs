//! Derivative-free minimization of bound objectives.
//!
//! Every strategy treats `+inf` as "infeasible" and keeps the best finite
//! point it has evaluated. When no feasible point is found the result
//! carries `best_value = +inf` and `feasible = false`; a warning is logged
//! unless disabled with [`Optimizer::with_warnings`].

mod annealing;
mod basin;
mod evolution;
mod grid;
mod nelder_mead;
mod objective;
mod pattern;
mod result;

pub use objective::{sanitize, BoundObjective, BoundVariant, Objective};
pub use result::OptimizationResult;

use crate::error::{NcError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snc_config::{
    BasinHoppingConfig, DifferentialEvolutionConfig, GridSearchConfig, NelderMeadConfig,
    OptMethod, PatternSearchConfig, SimulatedAnnealingConfig, StrategyConfig, ValidationError,
};
use tracing::{debug, warn};

/// Where a strategy searches.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRegion {
    /// Per-dimension `(low, high)` box, used by grid search and differential
    /// evolution.
    Bounds(Vec<(f64, f64)>),
    /// Start vector for the local and restart-based strategies.
    Start(Vec<f64>),
}

impl SearchRegion {
    pub fn dimension(&self) -> usize {
        match self {
            SearchRegion::Bounds(b) => b.len(),
            SearchRegion::Start(s) => s.len(),
        }
    }
}

/// Counts evaluations and remembers the best finite point.
pub(crate) struct Probe<'a, O: ?Sized> {
    objective: &'a O,
    evaluations: usize,
    best: Option<(Vec<f64>, f64)>,
}

impl<'a, O: Objective + ?Sized> Probe<'a, O> {
    fn new(objective: &'a O) -> Self {
        Self {
            objective,
            evaluations: 0,
            best: None,
        }
    }

    fn eval(&mut self, x: &[f64]) -> f64 {
        let value = sanitize(self.objective.evaluate(x));
        self.evaluations += 1;
        let improves = match &self.best {
            Some((_, best)) => value < *best,
            None => value.is_finite(),
        };
        if improves {
            self.best = Some((x.to_vec(), value));
        }
        value
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform move inside the box `x ± radius`.
pub(crate) fn perturb(rng: &mut StdRng, x: &[f64], radius: f64) -> Vec<f64> {
    x.iter()
        .map(|xi| xi + rng.random_range(-radius..=radius))
        .collect()
}

/// Metropolis acceptance of `candidate` over `current` at `temperature`.
pub(crate) fn metropolis(rng: &mut StdRng, current: f64, candidate: f64, temperature: f64) -> bool {
    if candidate < current {
        return true;
    }
    if !candidate.is_finite() || !current.is_finite() {
        return false;
    }
    rng.random::<f64>() < (-(candidate - current) / temperature).exp()
}

/// Runs search strategies against one objective.
pub struct Optimizer<'a, O: ?Sized> {
    objective: &'a O,
    warnings: bool,
}

impl<'a, O: Objective + ?Sized> Optimizer<'a, O> {
    pub fn new(objective: &'a O) -> Self {
        Self {
            objective,
            warnings: true,
        }
    }

    /// Toggle the warning logged when a search finds no feasible point.
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    fn check_dimension(&self, actual: usize) -> Result<()> {
        if actual == 0 {
            return Err(NcError::Region("search region has no dimensions".to_string()));
        }
        if let Some(expected) = self.objective.dimension() {
            if expected != actual {
                return Err(NcError::Region(format!(
                    "objective takes {} parameters, region has {}",
                    expected, actual
                )));
            }
        }
        Ok(())
    }

    fn check_start(&self, start: &[f64]) -> Result<()> {
        self.check_dimension(start.len())?;
        if let Some(x) = start.iter().find(|x| !x.is_finite()) {
            return Err(NcError::Region(format!("start value {} is not finite", x)));
        }
        Ok(())
    }

    fn check_bounds(&self, bounds: &[(f64, f64)]) -> Result<()> {
        self.check_dimension(bounds.len())?;
        for &(low, high) in bounds {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(NcError::Region(format!(
                    "invalid bound ({}, {}): need finite low <= high",
                    low, high
                )));
            }
        }
        Ok(())
    }

    /// Short-circuit when the objective's precheck already rules out every
    /// point.
    fn precheck(&self, method: OptMethod, parameters: &[f64]) -> Option<OptimizationResult> {
        if self.objective.precheck() {
            return None;
        }
        if self.warnings {
            warn!(%method, "average rates are unstable, skipping search");
        }
        Some(OptimizationResult::infeasible(method, parameters.to_vec(), 0))
    }

    fn finish(&self, probe: Probe<'_, O>, method: OptMethod, fallback: &[f64]) -> OptimizationResult {
        let evaluations = probe.evaluations;
        match probe.best {
            Some((best_parameters, best_value)) => {
                debug!(%method, best_value, evaluations, "search finished");
                OptimizationResult {
                    best_parameters,
                    best_value,
                    heuristic: method,
                    feasible: true,
                    evaluations,
                }
            }
            None => {
                if self.warnings {
                    warn!(%method, evaluations, "no feasible parameter found");
                }
                OptimizationResult::infeasible(method, fallback.to_vec(), evaluations)
            }
        }
    }

    /// Exhaustive lattice search with a deterministic parallel reduction.
    pub fn grid_search(
        &self,
        bounds: &[(f64, f64)],
        config: &GridSearchConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::GridSearch(config.clone()).validate()?;
        self.check_bounds(bounds)?;
        let lows: Vec<f64> = bounds.iter().map(|b| b.0).collect();
        if let Some(r) = self.precheck(OptMethod::GridSearch, &lows) {
            return Ok(r);
        }

        let lattice = grid::Lattice::new(bounds, config.delta, config.max_points)?;
        let workers = config
            .workers
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));
        debug!(points = lattice.len(), workers, "grid search");

        let best = grid::search(self.objective, &lattice, workers);
        let result = match best {
            Some((index, best_value)) => {
                debug!(best_value, evaluations = lattice.len(), "search finished");
                OptimizationResult {
                    best_parameters: lattice.point(index),
                    best_value,
                    heuristic: OptMethod::GridSearch,
                    feasible: true,
                    evaluations: lattice.len(),
                }
            }
            None => {
                if self.warnings {
                    warn!(method = %OptMethod::GridSearch, evaluations = lattice.len(),
                        "no feasible parameter found");
                }
                OptimizationResult::infeasible(OptMethod::GridSearch, lows, lattice.len())
            }
        };
        Ok(result)
    }

    /// Coordinate pattern search from `start`.
    pub fn pattern_search(
        &self,
        start: &[f64],
        config: &PatternSearchConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::PatternSearch(config.clone()).validate()?;
        self.check_start(start)?;
        if let Some(r) = self.precheck(OptMethod::PatternSearch, start) {
            return Ok(r);
        }
        let mut probe = Probe::new(self.objective);
        pattern::search(&mut probe, start, config);
        Ok(self.finish(probe, OptMethod::PatternSearch, start))
    }

    /// Simulated annealing from `start`.
    pub fn simulated_annealing(
        &self,
        start: &[f64],
        config: &SimulatedAnnealingConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::SimulatedAnnealing(config.clone()).validate()?;
        self.check_start(start)?;
        if let Some(r) = self.precheck(OptMethod::SimulatedAnnealing, start) {
            return Ok(r);
        }
        let mut probe = Probe::new(self.objective);
        annealing::search(&mut probe, start, config);
        Ok(self.finish(probe, OptMethod::SimulatedAnnealing, start))
    }

    /// Basin hopping from `start`.
    pub fn basin_hopping(
        &self,
        start: &[f64],
        config: &BasinHoppingConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::BasinHopping(config.clone()).validate()?;
        self.check_start(start)?;
        if let Some(r) = self.precheck(OptMethod::BasinHopping, start) {
            return Ok(r);
        }
        let mut probe = Probe::new(self.objective);
        basin::search(&mut probe, start, config);
        Ok(self.finish(probe, OptMethod::BasinHopping, start))
    }

    /// Differential evolution inside `bounds`.
    pub fn differential_evolution(
        &self,
        bounds: &[(f64, f64)],
        config: &DifferentialEvolutionConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::DifferentialEvolution(config.clone()).validate()?;
        self.check_bounds(bounds)?;
        let lows: Vec<f64> = bounds.iter().map(|b| b.0).collect();
        if let Some(r) = self.precheck(OptMethod::DifferentialEvolution, &lows) {
            return Ok(r);
        }
        let mut probe = Probe::new(self.objective);
        evolution::search(&mut probe, bounds, config);
        Ok(self.finish(probe, OptMethod::DifferentialEvolution, &lows))
    }

    /// Nelder-Mead simplex from `start`.
    pub fn nelder_mead(
        &self,
        start: &[f64],
        config: &NelderMeadConfig,
    ) -> Result<OptimizationResult> {
        StrategyConfig::NelderMead(config.clone()).validate()?;
        self.check_start(start)?;
        if let Some(r) = self.precheck(OptMethod::NelderMead, start) {
            return Ok(r);
        }
        let mut probe = Probe::new(self.objective);
        nelder_mead::search(&mut probe, start, config);
        Ok(self.finish(probe, OptMethod::NelderMead, start))
    }

    /// Dispatch on a strategy config.
    ///
    /// Grid search and differential evolution need [`SearchRegion::Bounds`];
    /// the other strategies need [`SearchRegion::Start`].
    pub fn optimize(
        &self,
        strategy: &StrategyConfig,
        region: &SearchRegion,
    ) -> Result<OptimizationResult> {
        match (strategy, region) {
            (StrategyConfig::GridSearch(c), SearchRegion::Bounds(b)) => self.grid_search(b, c),
            (StrategyConfig::DifferentialEvolution(c), SearchRegion::Bounds(b)) => {
                self.differential_evolution(b, c)
            }
            (StrategyConfig::PatternSearch(c), SearchRegion::Start(s)) => self.pattern_search(s, c),
            (StrategyConfig::SimulatedAnnealing(c), SearchRegion::Start(s)) => {
                self.simulated_annealing(s, c)
            }
            (StrategyConfig::BasinHopping(c), SearchRegion::Start(s)) => self.basin_hopping(s, c),
            (StrategyConfig::NelderMead(c), SearchRegion::Start(s)) => self.nelder_mead(s, c),
            (strategy, _) => {
                let method = strategy.method();
                let wanted = if method.needs_bounds() {
                    "bounds"
                } else {
                    "a start vector"
                };
                Err(NcError::Region(format!("{} needs {}", method, wanted)))
            }
        }
    }

    /// Run several strategies in parallel and keep the best result.
    pub fn optimize_all(&self, runs: &[(StrategyConfig, SearchRegion)]) -> Result<OptimizationResult> {
        if runs.is_empty() {
            return Err(ValidationError::SemanticError(
                "at least one strategy is required".to_string(),
            )
            .into());
        }
        let results: Vec<Result<OptimizationResult>> = std::thread::scope(|scope| {
            let handles: Vec<_> = runs
                .iter()
                .map(|(strategy, region)| scope.spawn(move || self.optimize(strategy, region)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        let results = results.into_iter().collect::<Result<Vec<_>>>()?;
        for r in &results {
            debug!(method = %r.heuristic, best_value = r.best_value, "candidate");
        }
        OptimizationResult::best_of(results).ok_or_else(|| {
            NcError::Config(ValidationError::SemanticError(
                "no strategy produced a result".to_string(),
            ))
        })
    }
}
