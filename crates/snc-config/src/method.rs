//! Names of the available search strategies.

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search strategy used to minimize a bound over its free parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptMethod {
    /// Exhaustive lattice evaluation inside per-dimension bounds.
    GridSearch,
    /// Coordinate pattern search with a contracting step.
    PatternSearch,
    /// Metropolis acceptance with geometric cooling.
    SimulatedAnnealing,
    /// Random hops followed by local pattern refinement.
    BasinHopping,
    /// Population-based best/1/bin evolution inside bounds.
    DifferentialEvolution,
    /// Downhill simplex search.
    NelderMead,
}

impl OptMethod {
    /// All available methods.
    pub const ALL: &'static [OptMethod] = &[
        OptMethod::GridSearch,
        OptMethod::PatternSearch,
        OptMethod::SimulatedAnnealing,
        OptMethod::BasinHopping,
        OptMethod::DifferentialEvolution,
        OptMethod::NelderMead,
    ];

    /// Stable identifier used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptMethod::GridSearch => "grid_search",
            OptMethod::PatternSearch => "pattern_search",
            OptMethod::SimulatedAnnealing => "simulated_annealing",
            OptMethod::BasinHopping => "basin_hopping",
            OptMethod::DifferentialEvolution => "differential_evolution",
            OptMethod::NelderMead => "nelder_mead",
        }
    }

    /// Whether the method searches inside box bounds (as opposed to
    /// starting from a point).
    pub fn needs_bounds(&self) -> bool {
        matches!(
            self,
            OptMethod::GridSearch | OptMethod::DifferentialEvolution
        )
    }

    /// Parse a method name, accepting the usual abbreviations.
    pub fn parse(s: &str) -> Option<OptMethod> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "grid_search" | "grid" | "gs" => Some(OptMethod::GridSearch),
            "pattern_search" | "pattern" | "ps" => Some(OptMethod::PatternSearch),
            "simulated_annealing" | "annealing" | "sa" => Some(OptMethod::SimulatedAnnealing),
            "basin_hopping" | "basin" | "bh" => Some(OptMethod::BasinHopping),
            "differential_evolution" | "diff_evolution" | "de" => {
                Some(OptMethod::DifferentialEvolution)
            }
            "nelder_mead" | "simplex" | "nm" => Some(OptMethod::NelderMead),
            _ => None,
        }
    }
}

impl fmt::Display for OptMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OptMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptMethod::parse(s).ok_or_else(|| ValidationError::UnknownName {
            kind: "optimization method",
            name: s.to_string(),
        })
    }
}
