//! @acp:module "Factor Command"
//! @acp:summary "Find the distinct prime factors of numbers"
//! @acp:domain cli
//! @acp:layer handler

use std::time::Instant;

use anyhow::Result;
use console::style;
use rayon::prelude::*;
use serde::Serialize;

use super::{in_worker_pool, open_cache, persist_cache};
use crate::config::Config;
use crate::factor::{sorted, Factorizer, FastPath};
use crate::oracle::PrimalityOracle;

/// Options for the factor command
#[derive(Debug, Clone)]
pub struct FactorOptions {
    /// Numbers to factor
    pub numbers: Vec<u64>,
    /// Output as JSON
    pub json: bool,
    /// Report time taken per number
    pub time: bool,
    /// Override the configured fast path
    pub fast_path: Option<FastPath>,
}

/// Result for a single input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorOutcome {
    pub input: u64,
    /// Ascending; absent when the input is out of domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
}

/// Factor every number on the worker pool, sharing one cache
pub fn factor_all(options: &FactorOptions, config: &Config) -> Result<Vec<FactorOutcome>> {
    let cache = open_cache(config)?;
    let fast_path = options.fast_path.unwrap_or(config.factor.fast_path);

    let outcomes = in_worker_pool(config.workers, || {
        options
            .numbers
            .par_iter()
            .map(|&number| {
                let mut factorizer =
                    Factorizer::new(PrimalityOracle::new(cache.clone())).with_fast_path(fast_path);

                let start = Instant::now();
                let result = factorizer.factorize(number);
                let elapsed = start.elapsed().as_secs_f64();

                let (factors, error) = match result {
                    Ok(set) => (Some(sorted(&set)), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                FactorOutcome {
                    input: number,
                    factors,
                    error,
                    seconds: options.time.then_some(elapsed),
                }
            })
            .collect::<Vec<_>>()
    })?;

    persist_cache(config, &cache)?;
    Ok(outcomes)
}

/// Execute the factor command
pub fn execute_factor(options: FactorOptions, config: Config) -> Result<()> {
    tracing::debug!(count = options.numbers.len(), "factoring");
    let outcomes = factor_all(&options, &config)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            print_outcome(outcome);
        }
    }

    if outcomes.iter().any(|o| o.error.is_some()) {
        anyhow::bail!("Some inputs could not be factored");
    }
    Ok(())
}

fn print_outcome(outcome: &FactorOutcome) {
    match (&outcome.factors, &outcome.error) {
        (Some(factors), _) => {
            let list = factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "{} {} → {{{}}}",
                style("✓").green(),
                style(outcome.input).bold(),
                list
            );
        }
        (None, Some(error)) => {
            eprintln!("{} {}: {}", style("✗").red(), outcome.input, error);
        }
        (None, None) => {}
    }

    if let Some(seconds) = outcome.seconds {
        println!(
            "  {} {:.9} seconds",
            style("time").dim(),
            seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(numbers: &[u64]) -> FactorOptions {
        FactorOptions {
            numbers: numbers.to_vec(),
            json: false,
            time: false,
            fast_path: None,
        }
    }

    #[test]
    fn test_factor_all_preserves_input_order() {
        let outcomes = factor_all(&options(&[45732, 77, 2381]), &Config::default()).unwrap();
        let factors: Vec<_> = outcomes.iter().map(|o| o.factors.clone().unwrap()).collect();
        assert_eq!(factors, vec![vec![2, 3, 37, 103], vec![7, 11], vec![2381]]);
        assert!(outcomes.iter().all(|o| o.seconds.is_none()));
    }

    #[test]
    fn test_strict_mode_reports_zero() {
        let mut opts = options(&[0, 1, 12]);
        opts.fast_path = Some(FastPath::Strict);
        let outcomes = factor_all(&opts, &Config::default()).unwrap();

        assert!(outcomes[0].error.is_some());
        assert_eq!(outcomes[1].factors, Some(vec![]));
        assert_eq!(outcomes[2].factors, Some(vec![2, 3]));
    }

    #[test]
    fn test_timing_is_reported_when_requested() {
        let mut opts = options(&[243]);
        opts.time = true;
        let outcomes = factor_all(&opts, &Config::default()).unwrap();
        assert!(outcomes[0].seconds.is_some());
        assert_eq!(outcomes[0].factors, Some(vec![3]));
    }
}
