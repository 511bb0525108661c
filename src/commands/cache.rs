//! @acp:module "Cache Command"
//! @acp:summary "Inspect and export the primality cache"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::{open_cache, persist_cache};
use crate::cache::{CacheSnapshot, PrimeCache};
use crate::config::Config;
use crate::oracle::PrimalityOracle;

/// Cache subcommands
#[derive(Debug, Clone)]
pub enum CacheSubcommand {
    /// Show cache statistics
    Stats,
    /// Write a snapshot of the cache
    Export { output: PathBuf },
}

/// Options for the cache command
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Test every integer below this bound before reporting
    pub warm: Option<u64>,
    /// Output as JSON
    pub json: bool,
}

/// Execute the cache command
pub fn execute_cache(
    options: CacheOptions,
    subcommand: CacheSubcommand,
    config: Config,
) -> Result<()> {
    let cache = open_cache(&config)?;

    if let Some(limit) = options.warm {
        let mut oracle = PrimalityOracle::new(cache.clone());
        let primes = (0..limit).filter(|n| oracle.is_prime(*n)).count();
        tracing::debug!(limit, primes, "cache warmed");
        persist_cache(&config, &cache)?;
    }

    match subcommand {
        CacheSubcommand::Stats => {
            let stats = cache.stats();
            if options.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("{} Primality cache", style("→").cyan());
            println!("  Entries:   {}", stats.entries);
            match stats.capacity {
                Some(capacity) => println!("  Capacity:  {}", capacity),
                None => println!("  Capacity:  {}", style("unbounded").dim()),
            }
            println!("  Hits:      {}", stats.hits);
            println!("  Misses:    {}", stats.misses);
            println!("  Evictions: {}", stats.evictions);
            println!("  Hit rate:  {:.1}%", stats.hit_rate() * 100.0);
        }

        CacheSubcommand::Export { output } => {
            let snapshot = CacheSnapshot::capture(&cache);
            snapshot.write_json(&output)?;
            println!(
                "{} Snapshot written to {}",
                style("✓").green(),
                output.display()
            );
            println!(
                "  Primes: {}  Composites: {}",
                snapshot.primes.len(),
                snapshot.composites.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_after_warm() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("export.json");
        let options = CacheOptions {
            warm: Some(100),
            json: false,
        };

        execute_cache(
            options,
            CacheSubcommand::Export {
                output: output.clone(),
            },
            Config::default(),
        )
        .unwrap();

        let snapshot = CacheSnapshot::from_json(&output).unwrap();
        assert_eq!(snapshot.len(), 100);
        assert_eq!(snapshot.primes.len(), 25);
    }

    #[test]
    fn test_warm_writes_configured_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cache.snapshot = Some(dir.path().join("cache.json"));
        let options = CacheOptions {
            warm: Some(50),
            json: true,
        };

        execute_cache(options, CacheSubcommand::Stats, config.clone()).unwrap();

        let path = config.cache.snapshot.unwrap();
        let snapshot = CacheSnapshot::from_json(&path).unwrap();
        assert_eq!(snapshot.len(), 50);
        assert_eq!(snapshot.primes.len(), 15);
    }
}
