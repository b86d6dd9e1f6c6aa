//! Optimizer configuration loading and validation.
//!
//! This crate provides:
//! - The `OptMethod` enum naming every search strategy
//! - Typed, serde-deserializable configs for each strategy
//! - Built-in presets (quick / standard / thorough)
//! - Semantic validation and JSON/TOML file loading

pub mod load;
pub mod method;
pub mod preset;
pub mod strategy;
pub mod validate;

pub use load::{load_strategy, parse_strategy, ConfigFormat};
pub use method::OptMethod;
pub use preset::{get_preset, list_presets, PresetInfo, PresetName};
pub use strategy::{
    BasinHoppingConfig, DifferentialEvolutionConfig, GridSearchConfig, NelderMeadConfig,
    PatternSearchConfig, SimulatedAnnealingConfig, StrategyConfig,
};
pub use validate::{ValidationError, ValidationResult};
