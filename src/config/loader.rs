//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::PoolConfig;
use crate::config::validation::validate_config;
use crate::error::{ChainError, ChainResult};

/// Load and validate a pool configuration from a TOML file.
pub fn load_config(path: &Path) -> ChainResult<PoolConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| ChainError::Config(format!("reading {}: {}", path.display(), e)))?;
    let config: PoolConfig =
        toml::from_str(&content).map_err(|e| ChainError::Config(format!("parse error: {}", e)))?;

    validate_config(&config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ChainError::Config(format!("validation failed: {}", joined))
    })?;

    Ok(config)
}
