//! @acp:module "Check Command"
//! @acp:summary "Differential check of every kernel variant"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Runs known scenarios, the fixed `2^n - n` inputs and a batch of random
//! inputs through every variant and fails on the first disagreement.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::conformance::{
    fixed_inputs, known_scenarios, random_inputs, standard_implementations, verify_factorization,
    Differential, DifferentialReport,
};
use crate::factor::sorted;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Random inputs to add (overrides config)
    pub random: Option<usize>,
    /// Seed for random inputs (overrides config)
    pub seed: Option<u64>,
    /// Capacity of the bounded variant (overrides config)
    pub capacity: Option<usize>,
    /// Output the report as JSON
    pub json: bool,
}

/// Run the differential suite and return the agreed results
pub fn run_check(
    options: &CheckOptions,
    config: &Config,
    show_progress: bool,
) -> Result<DifferentialReport> {
    let capacity = options.capacity.unwrap_or(config.check.bounded_capacity);
    let random_count = options.random.unwrap_or(config.check.random_count);
    let seed = options.seed.or(config.check.seed);

    let scenarios = known_scenarios();
    let mut inputs: Vec<u64> = scenarios.iter().map(|(n, _)| *n).collect();
    inputs.extend(fixed_inputs());
    inputs.extend(random_inputs(random_count, seed));

    let mut differential = Differential::new(standard_implementations(capacity)?)?;
    tracing::debug!(
        implementations = ?differential.implementation_names(),
        inputs = inputs.len(),
        "starting differential check"
    );

    let progress = if show_progress {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    for &number in &inputs {
        progress.set_message(number.to_string());
        let agreed = differential.check(number)?;
        if number > 2 {
            verify_factorization(number, &agreed)?;
        }
        if let Some((_, expected)) = scenarios.iter().find(|(n, _)| *n == number) {
            let actual = sorted(&agreed);
            if &actual != expected {
                anyhow::bail!(
                    "Known scenario {} expected {:?}, got {:?}",
                    number,
                    expected,
                    actual
                );
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(differential.finish())
}

/// Execute the check command
pub fn execute_check(options: CheckOptions, config: Config) -> Result<()> {
    let report = match run_check(&options, &config, !options.json) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            return Err(e);
        }
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} implementations agree on {} inputs",
        style("✓").green(),
        report.implementations.len(),
        report.results.len()
    );
    println!("  Implementations: {}", report.implementations.join(", "));

    Ok(())
}
