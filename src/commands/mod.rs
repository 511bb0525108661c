//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod cache;
pub mod check;
pub mod factor;
pub mod init;
pub mod prime;

pub use cache::{execute_cache, CacheOptions, CacheSubcommand};
pub use check::{execute_check, CheckOptions};
pub use factor::{execute_factor, FactorOptions, FactorOutcome};
pub use init::{execute_init, InitOptions};
pub use prime::{execute_prime, run_prime, PrimalityResult, PrimeOptions};

use anyhow::{Context, Result};

use crate::cache::{CacheSnapshot, PrimeCache, SharedCache};
use crate::config::Config;

/// Cache handle shared by the parallel commands
pub type CommandCache = SharedCache<Box<dyn PrimeCache + Send>>;

/// Build the configured cache and merge in the snapshot file, if any
pub fn open_cache(config: &Config) -> Result<CommandCache> {
    let mut cache = config.build_cache()?;

    if let Some(path) = &config.cache.snapshot {
        if path.exists() {
            let snapshot = CacheSnapshot::from_json(path)
                .with_context(|| format!("Failed to read cache snapshot {}", path.display()))?;
            let loaded = snapshot.load_into(&mut cache);
            tracing::debug!(loaded, path = %path.display(), "cache snapshot loaded");
        }
    }

    Ok(SharedCache::new(cache))
}

/// Write the cache to the configured snapshot file, if any
pub fn persist_cache(config: &Config, cache: &CommandCache) -> Result<()> {
    if let Some(path) = &config.cache.snapshot {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        CacheSnapshot::capture(cache)
            .write_json(path)
            .with_context(|| format!("Failed to write cache snapshot {}", path.display()))?;
        tracing::debug!(entries = cache.len(), path = %path.display(), "cache snapshot written");
    }
    Ok(())
}

/// Run `f` on a rayon pool sized by `workers`, or on the global pool
pub fn in_worker_pool<R, F>(workers: Option<usize>, f: F) -> Result<R>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match workers {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build worker pool")?;
            Ok(pool.install(f))
        }
        None => Ok(f()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cache.snapshot = Some(dir.path().join("nested").join("cache.json"));

        let mut cache = open_cache(&config).unwrap();
        cache.insert(2381, true);
        persist_cache(&config, &cache).unwrap();

        let reopened = open_cache(&config).unwrap();
        assert_eq!(reopened.peek(2381), Some(true));
    }

    #[test]
    fn test_worker_pool_runs_closure() {
        assert_eq!(in_worker_pool(Some(2), || 41 + 1).unwrap(), 42);
        assert_eq!(in_worker_pool(None, || 7).unwrap(), 7);
    }
}
