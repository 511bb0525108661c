#![forbid(unsafe_code)]

//! @acp:module "Primes Library"
//! @acp:summary "Distinct prime factor extraction backed by a memoized primality oracle"
//! @acp:domain math
//! @acp:layer api
//! @acp:stability stable
//!
//! # Primes
//!
//! Deterministic prime factorization by trial division.
//!
//! ## Features
//!
//! - **Memoized Primality**: Results cached per integer, insert-only
//! - **Explicit Caches**: Unbounded, LRU-bounded, or shared across threads
//! - **Differential Testing**: Independent kernel variants compared input by input
//!
//! ## Example
//!
//! ```rust
//! use primes::{Factorizer, PrimalityOracle, LruMemoCache};
//!
//! // Process-wide convenience functions
//! assert!(primes::is_prime(2381));
//! assert_eq!(primes::find_prime_factors(77), primes::FactorSet::from([7, 11]));
//!
//! // Caller-owned, bounded cache
//! let cache = LruMemoCache::seeded(1024).unwrap();
//! let mut factorizer = Factorizer::new(PrimalityOracle::new(cache));
//! let factors = factorizer.factorize(45732).unwrap();
//! assert_eq!(primes::factor::sorted(&factors), vec![2, 3, 37, 103]);
//! ```

pub mod cache;
pub mod commands;
pub mod config;
pub mod conformance;
pub mod error;
pub mod factor;
pub mod oracle;

use std::sync::{Mutex, OnceLock, PoisonError};

// Re-exports
pub use cache::{CacheSnapshot, CacheStats, LruMemoCache, MemoCache, PrimeCache, SharedCache};
pub use config::Config;
pub use conformance::{
    run_differential, verify_factorization, Differential, DifferentialReport, Implementation,
};
pub use error::{PrimesError, Result};
pub use factor::{find_prime_factors_with, FactorSet, Factorizer, FastPath};
pub use oracle::{compute_primality, PrimalityOracle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static GLOBAL_ORACLE: OnceLock<Mutex<PrimalityOracle<MemoCache>>> = OnceLock::new();

/// Run `f` against the process-wide oracle. The oracle is created, seeded,
/// on first use and lives until the process exits.
pub fn with_global_oracle<R>(f: impl FnOnce(&mut PrimalityOracle<MemoCache>) -> R) -> R {
    let oracle = GLOBAL_ORACLE.get_or_init(|| Mutex::new(PrimalityOracle::seeded()));
    let mut guard = oracle.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard)
}

/// @acp:summary "Memoized primality test over the process-wide cache"
pub fn is_prime(number: u64) -> bool {
    with_global_oracle(|oracle| oracle.is_prime(number))
}

/// @acp:summary "Distinct prime factors using the process-wide cache"
///
/// Returns `{number}` for inputs at or below 2.
pub fn find_prime_factors(number: u64) -> FactorSet {
    with_global_oracle(|oracle| find_prime_factors_with(oracle, number))
}
