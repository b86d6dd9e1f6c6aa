//! Configuration validation errors and semantic validation.

use crate::strategy::{
    BasinHoppingConfig, DifferentialEvolutionConfig, GridSearchConfig, NelderMeadConfig,
    PatternSearchConfig, SimulatedAnnealingConfig, StrategyConfig,
};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::UnknownName { .. } => 64,
            ValidationError::InvalidValue { .. } => 65,
        }
    }
}

/// Validate any strategy config.
pub fn validate_strategy(config: &StrategyConfig) -> ValidationResult<()> {
    match config {
        StrategyConfig::GridSearch(c) => validate_grid(c),
        StrategyConfig::PatternSearch(c) => validate_pattern("pattern_search", c),
        StrategyConfig::SimulatedAnnealing(c) => validate_annealing(c),
        StrategyConfig::BasinHopping(c) => validate_basin(c),
        StrategyConfig::DifferentialEvolution(c) => validate_evolution(c),
        StrategyConfig::NelderMead(c) => validate_nelder_mead(c),
    }
}

fn positive(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be positive and finite, got {}", value),
        });
    }
    Ok(())
}

fn open_unit(field: &str, value: f64) -> ValidationResult<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be in (0, 1), got {}", value),
        });
    }
    Ok(())
}

fn non_zero(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "Must be > 0".to_string(),
        });
    }
    Ok(())
}

fn validate_grid(c: &GridSearchConfig) -> ValidationResult<()> {
    positive("grid_search.delta", c.delta)?;
    non_zero("grid_search.max_points", c.max_points)?;
    if let Some(workers) = c.workers {
        non_zero("grid_search.workers", workers)?;
    }
    Ok(())
}

fn validate_pattern(prefix: &str, c: &PatternSearchConfig) -> ValidationResult<()> {
    positive(&format!("{}.delta", prefix), c.delta)?;
    positive(&format!("{}.delta_min", prefix), c.delta_min)?;
    open_unit(&format!("{}.contraction", prefix), c.contraction)?;
    non_zero(&format!("{}.max_iterations", prefix), c.max_iterations)?;
    if c.delta_min >= c.delta {
        return Err(ValidationError::SemanticError(format!(
            "{}.delta_min ({}) must be smaller than delta ({})",
            prefix, c.delta_min, c.delta
        )));
    }
    Ok(())
}

fn validate_annealing(c: &SimulatedAnnealingConfig) -> ValidationResult<()> {
    non_zero("simulated_annealing.rep_max", c.rep_max)?;
    positive("simulated_annealing.temp_start", c.temp_start)?;
    open_unit("simulated_annealing.cooling_factor", c.cooling_factor)?;
    positive("simulated_annealing.search_radius", c.search_radius)?;
    Ok(())
}

fn validate_basin(c: &BasinHoppingConfig) -> ValidationResult<()> {
    non_zero("basin_hopping.hops", c.hops)?;
    positive("basin_hopping.step_size", c.step_size)?;
    positive("basin_hopping.temperature", c.temperature)?;
    validate_pattern("basin_hopping.local", &c.local)
}

fn validate_evolution(c: &DifferentialEvolutionConfig) -> ValidationResult<()> {
    non_zero("differential_evolution.population_factor", c.population_factor)?;
    non_zero("differential_evolution.max_generations", c.max_generations)?;
    positive("differential_evolution.mutation_min", c.mutation_min)?;
    positive("differential_evolution.mutation_max", c.mutation_max)?;
    if c.mutation_min > c.mutation_max || c.mutation_max > 2.0 {
        return Err(ValidationError::SemanticError(format!(
            "differential_evolution mutation range [{}, {}] must be ordered and within (0, 2]",
            c.mutation_min, c.mutation_max
        )));
    }
    if !(0.0..=1.0).contains(&c.crossover) {
        return Err(ValidationError::InvalidValue {
            field: "differential_evolution.crossover".to_string(),
            message: format!("Must be in [0, 1], got {}", c.crossover),
        });
    }
    positive("differential_evolution.tolerance", c.tolerance)?;
    Ok(())
}

fn validate_nelder_mead(c: &NelderMeadConfig) -> ValidationResult<()> {
    non_zero("nelder_mead.max_iterations", c.max_iterations)?;
    positive("nelder_mead.x_tolerance", c.x_tolerance)?;
    positive("nelder_mead.f_tolerance", c.f_tolerance)?;
    positive("nelder_mead.initial_step", c.initial_step)?;
    Ok(())
}
