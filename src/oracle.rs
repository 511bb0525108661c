//! @acp:module "Primality Oracle"
//! @acp:summary "Deterministic trial-division primality test with memoization"
//! @acp:domain math
//! @acp:layer service
//! @acp:stability stable
//!
//! The oracle owns its cache explicitly. A process-wide instance backs the
//! free function [`crate::is_prime`].

use crate::cache::{MemoCache, PrimeCache};

/// @acp:summary "Uncached primality by 6k +/- 1 trial division"
///
/// Multiples of 2 and 3 other than 2 and 3 themselves are composite. Remaining
/// candidates are tested against `k` and `k + 2` for `k = 5, 11, 17, ...`
/// until `k * k` exceeds `number`.
pub fn compute_primality(number: u64) -> bool {
    if number < 2 {
        return false;
    }
    if number == 2 || number == 3 {
        return true;
    }
    if number % 2 == 0 || number % 3 == 0 {
        return false;
    }

    let mut candidate: u64 = 5;
    // Division form of `candidate * candidate <= number`, safe near u64::MAX
    while candidate <= number / candidate {
        if number % candidate == 0 || number % (candidate + 2) == 0 {
            return false;
        }
        candidate += 6;
    }
    true
}

/// @acp:summary "Memoized primality test over an explicit cache"
#[derive(Debug, Clone)]
pub struct PrimalityOracle<C = MemoCache> {
    cache: C,
}

impl PrimalityOracle<MemoCache> {
    /// Oracle over an unbounded cache seeded with 0..=31
    pub fn seeded() -> Self {
        Self::new(MemoCache::seeded())
    }
}

impl Default for PrimalityOracle<MemoCache> {
    fn default() -> Self {
        Self::seeded()
    }
}

impl<C: PrimeCache> PrimalityOracle<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    /// @acp:summary "Test primality, consulting and updating the cache"
    pub fn is_prime(&mut self, number: u64) -> bool {
        if let Some(known) = self.cache.get(number) {
            return known;
        }

        let result = compute_primality(number);
        tracing::trace!(number, is_prime = result, "primality cache miss");
        self.cache.insert(number, result);
        result
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{LruMemoCache, SMALL_PRIMES};

    #[test]
    fn test_boundaries() {
        let mut oracle = PrimalityOracle::seeded();
        assert!(!oracle.is_prime(0));
        assert!(!oracle.is_prime(1));
        assert!(oracle.is_prime(2));
        assert!(oracle.is_prime(3));
    }

    #[test]
    fn test_compute_primality_matches_seeds() {
        for n in 0..=31 {
            assert_eq!(compute_primality(n), SMALL_PRIMES.contains(&n), "n = {}", n);
        }
    }

    #[test]
    fn test_squares_of_primes_are_composite() {
        for p in [5u64, 7, 11, 13, 4547, 10639] {
            assert!(!compute_primality(p * p), "{}^2", p);
        }
        // Divisible only by the candidate + 2 branch
        assert!(!compute_primality(7 * 7 * 7));
        assert!(!compute_primality(77));
    }

    #[test]
    fn test_wide_inputs() {
        assert!(!compute_primality(u64::MAX));
        // Largest 32-bit prime
        assert!(compute_primality(4_294_967_291));
        assert!(!compute_primality(4_294_967_291 * 3));
    }

    #[test]
    fn test_result_is_memoized() {
        let mut oracle = PrimalityOracle::seeded();
        assert!(oracle.is_prime(2381));
        assert_eq!(oracle.cache().peek(2381), Some(true));

        let before = oracle.cache().stats();
        assert!(oracle.is_prime(2381));
        let after = oracle.cache().stats();

        assert_eq!(after.hits, before.hits + 1);
        assert_eq!(after.inserts, before.inserts);
        assert_eq!(oracle.cache().peek(2381), Some(true));
    }

    #[test]
    fn test_seeded_values_not_recomputed() {
        let mut oracle = PrimalityOracle::seeded();
        for n in 0..=31 {
            oracle.is_prime(n);
        }
        assert_eq!(oracle.cache().stats().misses, 0);
        assert_eq!(oracle.cache().len(), 32);
    }

    #[test]
    fn test_bounded_oracle_agrees_with_unbounded() {
        let mut bounded = PrimalityOracle::new(LruMemoCache::seeded(4).unwrap());
        let mut unbounded = PrimalityOracle::seeded();
        for n in 0..2_000 {
            assert_eq!(bounded.is_prime(n), unbounded.is_prime(n), "n = {}", n);
        }
        assert!(bounded.cache().len() <= 4);
    }
}
