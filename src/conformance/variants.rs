//! @acp:module "Kernel Variants"
//! @acp:summary "Factorization variants built from the same kernel"
//! @acp:domain math
//! @acp:layer service
//!
//! Each variant differs in how it stores primality results or schedules work:
//!
//! - `memoized`: one unbounded cache behind a lock
//! - `bounded`: LRU cache of fixed capacity behind a lock
//! - `concurrent`: shared cache, batches factored on rayon workers
//! - `thread-local`: one cache per worker thread, nothing shared
//! - `uncached`: plain trial division, no oracle

use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use super::Implementation;
use crate::cache::{LruMemoCache, MemoCache, SharedCache};
use crate::error::Result;
use crate::factor::{find_prime_factors_with, trial_division, FactorSet};
use crate::oracle::{compute_primality, PrimalityOracle};

/// Every variant, `memoized` first. `capacity` sizes the bounded variant.
pub fn standard_implementations(capacity: usize) -> Result<Vec<Box<dyn Implementation>>> {
    let implementations: Vec<Box<dyn Implementation>> = vec![
        Box::new(MemoizedVariant::default()),
        Box::new(BoundedVariant::new(capacity)?),
        Box::new(ConcurrentVariant::default()),
        Box::new(ThreadLocalVariant),
        Box::new(UncachedVariant),
    ];
    Ok(implementations)
}

/// Unbounded seeded cache, exclusive access per call
#[derive(Debug, Default)]
pub struct MemoizedVariant {
    oracle: Mutex<PrimalityOracle<MemoCache>>,
}

impl Implementation for MemoizedVariant {
    fn name(&self) -> &str {
        "memoized"
    }

    fn find_prime_factors(&self, number: u64) -> FactorSet {
        let mut oracle = self.oracle.lock().unwrap_or_else(PoisonError::into_inner);
        find_prime_factors_with(&mut *oracle, number)
    }
}

/// LRU-bounded cache, exclusive access per call
#[derive(Debug)]
pub struct BoundedVariant {
    oracle: Mutex<PrimalityOracle<LruMemoCache>>,
}

impl BoundedVariant {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            oracle: Mutex::new(PrimalityOracle::new(LruMemoCache::seeded(capacity)?)),
        })
    }
}

impl Implementation for BoundedVariant {
    fn name(&self) -> &str {
        "bounded"
    }

    fn find_prime_factors(&self, number: u64) -> FactorSet {
        let mut oracle = self.oracle.lock().unwrap_or_else(PoisonError::into_inner);
        find_prime_factors_with(&mut *oracle, number)
    }
}

/// Shared cache with idempotent inserts; batches run in parallel
#[derive(Debug, Clone)]
pub struct ConcurrentVariant {
    cache: SharedCache<MemoCache>,
}

impl Default for ConcurrentVariant {
    fn default() -> Self {
        Self {
            cache: SharedCache::new(MemoCache::seeded()),
        }
    }
}

impl ConcurrentVariant {
    pub fn cache(&self) -> &SharedCache<MemoCache> {
        &self.cache
    }
}

impl Implementation for ConcurrentVariant {
    fn name(&self) -> &str {
        "concurrent"
    }

    fn find_prime_factors(&self, number: u64) -> FactorSet {
        let mut oracle = PrimalityOracle::new(self.cache.clone());
        find_prime_factors_with(&mut oracle, number)
    }

    fn find_prime_factors_batch(&self, numbers: &[u64]) -> Vec<FactorSet> {
        numbers
            .par_iter()
            .map(|n| self.find_prime_factors(*n))
            .collect()
    }
}

thread_local! {
    static LOCAL_ORACLE: RefCell<PrimalityOracle<MemoCache>> =
        RefCell::new(PrimalityOracle::seeded());
}

/// Per-thread caches; batches run in parallel without any shared state
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLocalVariant;

impl Implementation for ThreadLocalVariant {
    fn name(&self) -> &str {
        "thread-local"
    }

    fn find_prime_factors(&self, number: u64) -> FactorSet {
        LOCAL_ORACLE.with(|oracle| find_prime_factors_with(&mut *oracle.borrow_mut(), number))
    }

    fn find_prime_factors_batch(&self, numbers: &[u64]) -> Vec<FactorSet> {
        numbers
            .par_iter()
            .map(|n| self.find_prime_factors(*n))
            .collect()
    }
}

/// Trial division with an uncached primality check
#[derive(Debug, Clone, Copy, Default)]
pub struct UncachedVariant;

impl Implementation for UncachedVariant {
    fn name(&self) -> &str {
        "uncached"
    }

    fn find_prime_factors(&self, number: u64) -> FactorSet {
        if number <= 2 || compute_primality(number) {
            return FactorSet::from([number]);
        }
        trial_division(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PrimeCache;

    #[test]
    fn test_names_are_unique() {
        let implementations = standard_implementations(16).unwrap();
        let mut names: Vec<&str> = implementations.iter().map(|i| i.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_concurrent_batch_preserves_order() {
        let variant = ConcurrentVariant::default();
        let batch = variant.find_prime_factors_batch(&[77, 2381, 45732]);
        assert_eq!(batch[0], FactorSet::from([7, 11]));
        assert_eq!(batch[1], FactorSet::from([2381]));
        assert_eq!(batch[2], FactorSet::from([2, 3, 37, 103]));
        assert!(variant.cache().peek(2381).is_some());
    }

    #[test]
    fn test_bounded_variant_rejects_zero_capacity() {
        assert!(BoundedVariant::new(0).is_err());
    }

    #[test]
    fn test_uncached_matches_reference_fast_path() {
        assert_eq!(UncachedVariant.find_prime_factors(0), FactorSet::from([0]));
        assert_eq!(UncachedVariant.find_prime_factors(1), FactorSet::from([1]));
        assert_eq!(
            UncachedVariant.find_prime_factors(32523423),
            FactorSet::from([3, 1019, 10639])
        );
    }
}
