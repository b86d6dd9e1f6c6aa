//! Per-strategy configuration structs.
//!
//! Every struct deserializes with defaults for omitted fields, so a config
//! file only has to name the parameters it changes:
//!
//! ```toml
//! method = "pattern_search"
//! delta = 3.0
//! delta_min = 0.01
//! ```

use crate::method::OptMethod;
use crate::validate::{validate_strategy, ValidationResult};
use serde::{Deserialize, Serialize};

/// Exhaustive lattice search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSearchConfig {
    /// Lattice step, shared by every dimension.
    pub delta: f64,
    /// Upper limit on the number of lattice points; larger grids are rejected.
    pub max_points: usize,
    /// Worker threads (None = available parallelism).
    pub workers: Option<usize>,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            delta: 0.1,
            max_points: 5_000_000,
            workers: None,
        }
    }
}

/// Coordinate pattern search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSearchConfig {
    /// Initial step.
    pub delta: f64,
    /// The search stops once the step falls below this value.
    pub delta_min: f64,
    /// Factor applied to the step after an unsuccessful poll.
    pub contraction: f64,
    /// Hard cap on poll rounds.
    pub max_iterations: usize,
}

impl Default for PatternSearchConfig {
    fn default() -> Self {
        Self {
            delta: 3.0,
            delta_min: 0.01,
            contraction: 0.5,
            max_iterations: 10_000,
        }
    }
}

/// Simulated annealing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedAnnealingConfig {
    /// Number of proposal/cooling rounds.
    pub rep_max: usize,
    /// Initial temperature.
    pub temp_start: f64,
    /// Geometric cooling factor in (0, 1).
    pub cooling_factor: f64,
    /// Half-width of the uniform proposal box.
    pub search_radius: f64,
    /// RNG seed (None = seeded from the OS).
    pub seed: Option<u64>,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            rep_max: 15,
            temp_start: 1000.0,
            cooling_factor: 0.95,
            search_radius: 1.0,
            seed: None,
        }
    }
}

/// Basin hopping: perturb, refine locally, accept by Metropolis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasinHoppingConfig {
    /// Number of hops.
    pub hops: usize,
    /// Half-width of the uniform hop.
    pub step_size: f64,
    /// Metropolis temperature for accepting a worse basin.
    pub temperature: f64,
    /// Local refinement after every hop.
    pub local: PatternSearchConfig,
    /// RNG seed (None = seeded from the OS).
    pub seed: Option<u64>,
}

impl Default for BasinHoppingConfig {
    fn default() -> Self {
        Self {
            hops: 100,
            step_size: 0.5,
            temperature: 1.0,
            local: PatternSearchConfig {
                delta: 0.5,
                delta_min: 1e-3,
                ..PatternSearchConfig::default()
            },
            seed: None,
        }
    }
}

/// Differential evolution (best/1/bin with dithered mutation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferentialEvolutionConfig {
    /// Population size per dimension.
    pub population_factor: usize,
    /// Generation cap.
    pub max_generations: usize,
    /// Lower end of the dithered mutation constant.
    pub mutation_min: f64,
    /// Upper end of the dithered mutation constant.
    pub mutation_max: f64,
    /// Binomial crossover probability.
    pub crossover: f64,
    /// Relative spread of population energies at which the search stops.
    pub tolerance: f64,
    /// RNG seed (None = seeded from the OS).
    pub seed: Option<u64>,
}

impl Default for DifferentialEvolutionConfig {
    fn default() -> Self {
        Self {
            population_factor: 15,
            max_generations: 1000,
            mutation_min: 0.5,
            mutation_max: 1.0,
            crossover: 0.7,
            tolerance: 0.01,
            seed: None,
        }
    }
}

/// Nelder-Mead downhill simplex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMeadConfig {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Simplex diameter at which the search stops.
    pub x_tolerance: f64,
    /// Spread of simplex values at which the search stops.
    pub f_tolerance: f64,
    /// Relative size of the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 400,
            x_tolerance: 1e-4,
            f_tolerance: 1e-4,
            initial_step: 0.05,
        }
    }
}

/// A strategy together with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum StrategyConfig {
    GridSearch(GridSearchConfig),
    PatternSearch(PatternSearchConfig),
    SimulatedAnnealing(SimulatedAnnealingConfig),
    BasinHopping(BasinHoppingConfig),
    DifferentialEvolution(DifferentialEvolutionConfig),
    NelderMead(NelderMeadConfig),
}

impl StrategyConfig {
    /// Default parameters for a method.
    pub fn default_for(method: OptMethod) -> Self {
        match method {
            OptMethod::GridSearch => StrategyConfig::GridSearch(GridSearchConfig::default()),
            OptMethod::PatternSearch => {
                StrategyConfig::PatternSearch(PatternSearchConfig::default())
            }
            OptMethod::SimulatedAnnealing => {
                StrategyConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default())
            }
            OptMethod::BasinHopping => StrategyConfig::BasinHopping(BasinHoppingConfig::default()),
            OptMethod::DifferentialEvolution => {
                StrategyConfig::DifferentialEvolution(DifferentialEvolutionConfig::default())
            }
            OptMethod::NelderMead => StrategyConfig::NelderMead(NelderMeadConfig::default()),
        }
    }

    /// The method this config drives.
    pub fn method(&self) -> OptMethod {
        match self {
            StrategyConfig::GridSearch(_) => OptMethod::GridSearch,
            StrategyConfig::PatternSearch(_) => OptMethod::PatternSearch,
            StrategyConfig::SimulatedAnnealing(_) => OptMethod::SimulatedAnnealing,
            StrategyConfig::BasinHopping(_) => OptMethod::BasinHopping,
            StrategyConfig::DifferentialEvolution(_) => OptMethod::DifferentialEvolution,
            StrategyConfig::NelderMead(_) => OptMethod::NelderMead,
        }
    }

    /// Semantic validation.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_strategy(self)
    }

    /// Override the RNG seed of stochastic strategies. No-op otherwise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        match &mut self {
            StrategyConfig::SimulatedAnnealing(c) => c.seed = Some(seed),
            StrategyConfig::BasinHopping(c) => c.seed = Some(seed),
            StrategyConfig::DifferentialEvolution(c) => c.seed = Some(seed),
            StrategyConfig::GridSearch(_)
            | StrategyConfig::PatternSearch(_)
            | StrategyConfig::NelderMead(_) => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_matches_variant() {
        for method in OptMethod::ALL {
            assert_eq!(StrategyConfig::default_for(*method).method(), *method);
        }
    }

    #[test]
    fn test_tagged_json_with_partial_fields() {
        let json = r#"{"method": "simulated_annealing", "rep_max": 40, "seed": 7}"#;
        let config: StrategyConfig = serde_json::from_str(json).unwrap();
        match config {
            StrategyConfig::SimulatedAnnealing(c) => {
                assert_eq!(c.rep_max, 40);
                assert_eq!(c.seed, Some(7));
                assert_eq!(c.cooling_factor, 0.95);
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method_tag_fails() {
        let json = r#"{"method": "bfgs"}"#;
        assert!(serde_json::from_str::<StrategyConfig>(json).is_err());
    }

    #[test]
    fn test_with_seed_only_touches_stochastic() {
        let sa = StrategyConfig::default_for(OptMethod::SimulatedAnnealing).with_seed(3);
        assert!(matches!(sa, StrategyConfig::SimulatedAnnealing(ref c) if c.seed == Some(3)));

        let gs = StrategyConfig::default_for(OptMethod::GridSearch).with_seed(3);
        assert_eq!(gs, StrategyConfig::default_for(OptMethod::GridSearch));
    }
}
