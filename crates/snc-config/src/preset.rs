//! Search presets for common accuracy/runtime trade-offs.
//!
//! Provides pre-built strategy sets for:
//! - Quick: coarse grid plus one local refinement
//! - Standard: finer grid, pattern search and simplex
//! - Thorough: every strategy, stochastic ones with fixed seeds

use crate::method::OptMethod;
use crate::strategy::{
    BasinHoppingConfig, DifferentialEvolutionConfig, GridSearchConfig, NelderMeadConfig,
    PatternSearchConfig, SimulatedAnnealingConfig, StrategyConfig,
};
use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seed shared by the stochastic strategies of the thorough preset.
const PRESET_SEED: u64 = 0x5eed_0001;

/// Available search presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Coarse grid plus pattern search
    Quick,
    /// Finer grid, pattern search and Nelder-Mead
    Standard,
    /// All strategies with reproducible seeds
    Thorough,
}

impl PresetName {
    /// All available preset names.
    pub const ALL: &'static [PresetName] =
        &[PresetName::Quick, PresetName::Standard, PresetName::Thorough];

    /// Get preset name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Quick => "quick",
            PresetName::Standard => "standard",
            PresetName::Thorough => "thorough",
        }
    }

    /// Parse preset name from string.
    pub fn parse(s: &str) -> Option<PresetName> {
        match s.to_lowercase().as_str() {
            "quick" | "fast" => Some(PresetName::Quick),
            "standard" | "default" => Some(PresetName::Standard),
            "thorough" | "exhaustive" | "full" => Some(PresetName::Thorough),
            _ => None,
        }
    }

    /// Get a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetName::Quick => "Coarse grid (delta 0.1) refined by pattern search",
            PresetName::Standard => "Grid (delta 0.05), pattern search and Nelder-Mead",
            PresetName::Thorough => {
                "Fine grid plus annealing, basin hopping and differential evolution"
            }
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::parse(s).ok_or_else(|| ValidationError::UnknownName {
            kind: "preset",
            name: s.to_string(),
        })
    }
}

/// Summary of a preset for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: PresetName,
    pub description: &'static str,
    pub methods: Vec<OptMethod>,
}

/// List every preset with the methods it runs.
pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL
        .iter()
        .map(|name| PresetInfo {
            name: *name,
            description: name.description(),
            methods: get_preset(*name).iter().map(StrategyConfig::method).collect(),
        })
        .collect()
}

/// Strategies run by a preset, in execution order.
pub fn get_preset(name: PresetName) -> Vec<StrategyConfig> {
    match name {
        PresetName::Quick => vec![
            StrategyConfig::GridSearch(GridSearchConfig::default()),
            StrategyConfig::PatternSearch(PatternSearchConfig::default()),
        ],
        PresetName::Standard => vec![
            StrategyConfig::GridSearch(GridSearchConfig {
                delta: 0.05,
                ..Default::default()
            }),
            StrategyConfig::PatternSearch(PatternSearchConfig {
                delta_min: 1e-3,
                ..Default::default()
            }),
            StrategyConfig::NelderMead(NelderMeadConfig::default()),
        ],
        PresetName::Thorough => vec![
            StrategyConfig::GridSearch(GridSearchConfig {
                delta: 0.02,
                ..Default::default()
            }),
            StrategyConfig::PatternSearch(PatternSearchConfig {
                delta_min: 1e-4,
                ..Default::default()
            }),
            StrategyConfig::NelderMead(NelderMeadConfig {
                max_iterations: 2000,
                ..Default::default()
            }),
            StrategyConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
                rep_max: 200,
                seed: Some(PRESET_SEED),
                ..Default::default()
            }),
            StrategyConfig::BasinHopping(BasinHoppingConfig {
                seed: Some(PRESET_SEED),
                ..Default::default()
            }),
            StrategyConfig::DifferentialEvolution(DifferentialEvolutionConfig {
                seed: Some(PRESET_SEED),
                ..Default::default()
            }),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!(PresetName::parse("fast"), Some(PresetName::Quick));
        assert_eq!(PresetName::parse("DEFAULT"), Some(PresetName::Standard));
        assert_eq!(PresetName::parse("nope"), None);
        assert!("nope".parse::<PresetName>().is_err());
    }

    #[test]
    fn test_presets_validate() {
        for name in PresetName::ALL {
            for config in get_preset(*name) {
                assert!(config.validate().is_ok(), "{name}: {:?}", config);
            }
        }
    }

    #[test]
    fn test_presets_are_deterministic() {
        for name in PresetName::ALL {
            assert_eq!(get_preset(*name), get_preset(*name));
        }
    }

    #[test]
    fn test_thorough_runs_every_method() {
        let info = list_presets();
        let thorough = info
            .iter()
            .find(|p| p.name == PresetName::Thorough)
            .unwrap();
        for method in OptMethod::ALL {
            assert!(thorough.methods.contains(method), "missing {method}");
        }
    }
}
