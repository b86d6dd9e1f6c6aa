//! Loading strategy configs from JSON or TOML files.

use crate::strategy::StrategyConfig;
use crate::validate::{ValidationError, ValidationResult};
use std::path::Path;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Infer the format from a file extension (defaults to JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse and validate a strategy config from a string.
pub fn parse_strategy(content: &str, format: ConfigFormat) -> ValidationResult<StrategyConfig> {
    let config: StrategyConfig = match format {
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?,
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))?,
    };
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a strategy config file.
pub fn load_strategy(path: &Path) -> ValidationResult<StrategyConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_strategy(&content, ConfigFormat::from_path(path))
}
