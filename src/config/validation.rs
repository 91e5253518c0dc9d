//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports non-zero, hosts non-empty)
//! - Check REST base URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PoolConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::PoolConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Which entry the problem was found in.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a pool configuration, collecting every problem found.
pub fn validate_config(config: &PoolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, node) in config.electrum_nodes.iter().enumerate() {
        if node.host.trim().is_empty() {
            errors.push(ValidationError {
                field: format!("electrum_nodes[{}].host", i),
                message: "host must not be empty".to_string(),
            });
        }
        if node.port == 0 {
            errors.push(ValidationError {
                field: format!("electrum_nodes[{}].port", i),
                message: "port must be non-zero".to_string(),
            });
        }
    }

    for (i, gateway) in config.rest_gateways.iter().enumerate() {
        if let Err(e) = Url::parse(&gateway.base_url) {
            errors.push(ValidationError {
                field: format!("rest_gateways[{}].base_url", i),
                message: format!("invalid URL '{}': {}", gateway.base_url, e),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
