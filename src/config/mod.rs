//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain math
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::{LruMemoCache, MemoCache, PrimeCache};
use crate::error::{PrimesError, Result};
use crate::factor::FastPath;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".primes.config.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

/// @acp:summary "Main configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Primality cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Factorization settings
    #[serde(default)]
    pub factor: FactorConfig,

    /// Differential check settings
    #[serde(default)]
    pub check: CheckConfig,

    /// Worker threads for parallel commands (None = rayon default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            cache: CacheConfig::default(),
            factor: FactorConfig::default(),
            check: CheckConfig::default(),
            workers: None,
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that cannot be honoured
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == Some(0) {
            return Err(PrimesError::InvalidConfig(
                "cache.capacity must be at least 1".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(PrimesError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the configured cache, seeded with 0..=31
    pub fn build_cache(&self) -> Result<Box<dyn PrimeCache + Send>> {
        let cache: Box<dyn PrimeCache + Send> = match self.cache.capacity {
            Some(capacity) => Box::new(LruMemoCache::seeded(capacity)?),
            None => Box::new(MemoCache::seeded()),
        };
        Ok(cache)
    }
}

/// @acp:summary "Primality cache configuration"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum cached entries; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Snapshot file loaded before and written after each command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

/// @acp:summary "Factorization configuration"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorConfig {
    /// Handling of inputs at or below 2
    #[serde(default, rename = "fastPath")]
    pub fast_path: FastPath,
}

fn default_random_count() -> usize {
    5
}

fn default_bounded_capacity() -> usize {
    1024
}

/// @acp:summary "Differential check configuration"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Random inputs added to each run
    #[serde(default = "default_random_count", rename = "randomCount")]
    pub random_count: usize,

    /// Seed for reproducible random inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Capacity of the bounded variant's cache
    #[serde(default = "default_bounded_capacity", rename = "boundedCapacity")]
    pub bounded_capacity: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            random_count: default_random_count(),
            seed: None,
            bounded_capacity: default_bounded_capacity(),
        }
    }
}
