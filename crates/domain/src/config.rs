//! Configuration structures
//!
//! Plain data holders; loading lives in the infra crate.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Maximum number of pooled connections
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "atelier.db".to_string(), pool_size: 4 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { database: DatabaseConfig::default() }
    }
}
