//! @acp:module "Prime Command"
//! @acp:summary "Test numbers for primality"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::{open_cache, persist_cache};
use crate::config::Config;
use crate::oracle::PrimalityOracle;

/// Options for the is-prime command
#[derive(Debug, Clone)]
pub struct PrimeOptions {
    /// Numbers to test
    pub numbers: Vec<u64>,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimalityResult {
    pub input: u64,
    pub prime: bool,
}

/// Test every number against the configured cache, then persist it
pub fn run_prime(numbers: &[u64], config: &Config) -> Result<Vec<PrimalityResult>> {
    let cache = open_cache(config)?;
    let mut oracle = PrimalityOracle::new(cache.clone());

    let results = numbers
        .iter()
        .map(|&input| PrimalityResult {
            input,
            prime: oracle.is_prime(input),
        })
        .collect();

    persist_cache(config, &cache)?;
    Ok(results)
}

/// Execute the is-prime command
pub fn execute_prime(options: PrimeOptions, config: Config) -> Result<()> {
    let results = run_prime(&options.numbers, &config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        if result.prime {
            println!("{} {} is prime", style("✓").green(), style(result.input).bold());
        } else {
            println!("{} {} is not prime", style("•").dim(), style(result.input).bold());
        }
    }

    Ok(())
}
