#![forbid(unsafe_code)]
//! Primes Command Line Interface

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use primes::commands::{
    execute_cache, execute_check, execute_factor, execute_init, execute_prime, CacheOptions,
    CacheSubcommand, CheckOptions, FactorOptions, InitOptions, PrimeOptions,
};
use primes::{Config, FastPath};

#[derive(Parser)]
#[command(name = "primes")]
#[command(about = "Distinct prime factors with a memoized primality oracle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".primes.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Bound the primality cache to this many entries
        #[arg(long)]
        capacity: Option<usize>,

        /// Persist the primality cache to this file
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Find the distinct prime factors of numbers
    Factor {
        /// Numbers to factor
        #[arg(required = true)]
        numbers: Vec<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Report the time taken for each number
        #[arg(long)]
        time: bool,

        /// Reject 0 and return no factors for 1
        #[arg(long)]
        strict: bool,
    },

    /// Test numbers for primality
    IsPrime {
        /// Numbers to test
        #[arg(required = true)]
        numbers: Vec<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare every kernel variant on fixed and random inputs
    Check {
        /// Number of random 64-bit inputs
        #[arg(long)]
        random: Option<usize>,

        /// Seed for random inputs
        #[arg(long)]
        seed: Option<u64>,

        /// Cache capacity of the bounded variant
        #[arg(long)]
        capacity: Option<usize>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or export the primality cache
    Cache {
        #[command(subcommand)]
        cmd: CacheCommands,

        /// Test every integer below this bound first
        #[arg(long, global = true)]
        warm: Option<u64>,

        /// Output as JSON
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache statistics
    Stats,
    /// Write a snapshot of the cache
    Export {
        /// Output file
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        Ok(Config::default())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Loaded per command: init must be able to replace an invalid config
    let config = || load_config(&cli.config);

    match cli.command {
        Commands::Init { force, capacity, snapshot } => {
            let options = InitOptions {
                path: cli.config.clone(),
                force,
                capacity,
                snapshot,
            };
            execute_init(options)?;
        }

        Commands::Factor { numbers, json, time, strict } => {
            let options = FactorOptions {
                numbers,
                json,
                time,
                fast_path: strict.then_some(FastPath::Strict),
            };
            execute_factor(options, config()?)?;
        }

        Commands::IsPrime { numbers, json } => {
            execute_prime(PrimeOptions { numbers, json }, config()?)?;
        }

        Commands::Check { random, seed, capacity, json } => {
            let options = CheckOptions {
                random,
                seed,
                capacity,
                json,
            };
            execute_check(options, config()?)?;
        }

        Commands::Cache { cmd, warm, json } => {
            let subcommand = match cmd {
                CacheCommands::Stats => CacheSubcommand::Stats,
                CacheCommands::Export { output } => CacheSubcommand::Export { output },
            };
            execute_cache(CacheOptions { warm, json }, subcommand, config()?)?;
        }
    }

    Ok(())
}
