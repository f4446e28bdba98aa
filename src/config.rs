// src/config.rs

//! Manages storage configuration: loading, defaults, and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;

/// Holds tunables for the storage layer, shared by every data type living
/// in the keyspace.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StorageConfig {
    /// The maximum allowed size of a logical key in bytes. Keys are rejected
    /// before any engine I/O happens.
    #[serde(default = "default_max_key_size")]
    pub max_key_size: usize,
    /// Bulk deletes of collections larger than this escalate to engine-level
    /// range hints (file range delete + compaction) before the per-key pass.
    #[serde(default = "default_range_delete_threshold")]
    pub range_delete_threshold: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_key_size: default_max_key_size(),
            range_delete_threshold: default_range_delete_threshold(),
        }
    }
}

fn default_max_key_size() -> usize {
    1024
}
fn default_range_delete_threshold() -> i64 {
    100_000
}

impl StorageConfig {
    /// Creates a new `StorageConfig` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: StorageConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values that would misbehave at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.max_key_size == 0 {
            return Err(anyhow!("max_key_size must be greater than zero"));
        }
        if self.range_delete_threshold <= 0 {
            return Err(anyhow!("range_delete_threshold must be greater than zero"));
        }
        Ok(())
    }
}
