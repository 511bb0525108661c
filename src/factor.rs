//! @acp:module "Factor Extractor"
//! @acp:summary "Distinct prime factor extraction by trial division"
//! @acp:domain math
//! @acp:layer service
//! @acp:stability stable
//!
//! Strips factors of 2 and 3, then walks 6k +/- 1 candidates while
//! `candidate^2 <= remaining`. Whatever is left above 1 is itself prime.
//! Multiplicities are discarded: the result is a set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::cache::{MemoCache, PrimeCache};
use crate::error::{PrimesError, Result};
use crate::oracle::PrimalityOracle;

/// Distinct prime factors of a number, unordered
pub type FactorSet = HashSet<u64>;

/// @acp:summary "Handling of inputs at or below 2"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastPath {
    /// Return `{n}` for every `n <= 2`, including 0 and 1
    #[default]
    Reference,
    /// 0 is rejected, 1 has no prime factors
    Strict,
}

impl FastPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastPath::Reference => "reference",
            FastPath::Strict => "strict",
        }
    }
}

impl FromStr for FastPath {
    type Err = PrimesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reference" => Ok(FastPath::Reference),
            "strict" => Ok(FastPath::Strict),
            other => Err(PrimesError::InvalidConfig(format!(
                "unknown fast path mode: {}",
                other
            ))),
        }
    }
}

/// @acp:summary "Find the distinct prime factors of a number"
///
/// Inputs at or below 2, and inputs the oracle reports as prime, return
/// `{number}` without any division. For 0 and 1 this is not a factorization;
/// use [`Factorizer`] with [`FastPath::Strict`] to reject them instead.
pub fn find_prime_factors_with<C: PrimeCache>(
    oracle: &mut PrimalityOracle<C>,
    number: u64,
) -> FactorSet {
    if number <= 2 || oracle.is_prime(number) {
        return FactorSet::from([number]);
    }
    trial_division(number)
}

/// Trial division to exhaustion, without the primality fast path.
///
/// Callers must pass `number >= 1`.
pub(crate) fn trial_division(mut number: u64) -> FactorSet {
    let mut factors = FactorSet::new();

    while number % 2 == 0 {
        factors.insert(2);
        number >>= 1;
    }

    while number % 3 == 0 {
        factors.insert(3);
        number /= 3;
    }

    let mut candidate: u64 = 5;
    while candidate <= number / candidate {
        while number % candidate == 0 {
            factors.insert(candidate);
            number /= candidate;
        }

        let paired = candidate + 2;
        while number % paired == 0 {
            factors.insert(paired);
            number /= paired;
        }

        candidate += 6;
    }

    if number > 1 {
        factors.insert(number);
    }

    factors
}

/// Number of times `prime` divides `number`
pub fn multiplicity(mut number: u64, prime: u64) -> u32 {
    if prime < 2 || number == 0 {
        return 0;
    }
    let mut count = 0;
    while number % prime == 0 {
        number /= prime;
        count += 1;
    }
    count
}

/// Factor set as an ascending vector, for display and stable output
pub fn sorted(factors: &FactorSet) -> Vec<u64> {
    let mut out: Vec<u64> = factors.iter().copied().collect();
    out.sort_unstable();
    out
}

/// @acp:summary "Primality oracle plus fast-path policy"
#[derive(Debug, Clone)]
pub struct Factorizer<C = MemoCache> {
    oracle: PrimalityOracle<C>,
    fast_path: FastPath,
}

impl Default for Factorizer<MemoCache> {
    fn default() -> Self {
        Self::new(PrimalityOracle::seeded())
    }
}

impl<C: PrimeCache> Factorizer<C> {
    pub fn new(oracle: PrimalityOracle<C>) -> Self {
        Self {
            oracle,
            fast_path: FastPath::default(),
        }
    }

    pub fn with_fast_path(mut self, fast_path: FastPath) -> Self {
        self.fast_path = fast_path;
        self
    }

    pub fn fast_path(&self) -> FastPath {
        self.fast_path
    }

    /// @acp:summary "Factor one number under the configured policy"
    pub fn factorize(&mut self, number: u64) -> Result<FactorSet> {
        match (self.fast_path, number) {
            (FastPath::Strict, 0) => Err(PrimesError::OutOfDomain(0)),
            (FastPath::Strict, 1) => Ok(FactorSet::new()),
            _ => Ok(find_prime_factors_with(&mut self.oracle, number)),
        }
    }

    /// Factor each number in order, stopping at the first error
    pub fn factorize_many(&mut self, numbers: &[u64]) -> Result<Vec<FactorSet>> {
        numbers.iter().map(|n| self.factorize(*n)).collect()
    }

    pub fn oracle(&self) -> &PrimalityOracle<C> {
        &self.oracle
    }
}
